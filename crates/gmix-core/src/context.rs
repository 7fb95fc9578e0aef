//! Simulation context.
//!
//! A [`Context`] owns every piece of state belonging to one simulation run:
//! the demand series, the generator fleet and the spill, generation and
//! unserved tables filled in by dispatch. Nothing is shared between contexts,
//! so several runs can be built from the same inputs, mutated independently
//! and compared afterwards.
//!
//! ```ignore
//! let mut context = Context::new(&demand, &ConfigStore::default())?;
//! context.set_capacities(&[12_000.0, 8_000.0]);
//! dispatch(&mut context); // fills spill / generation / unserved
//! println!("{context}");
//! ```

use crate::config::ConfigStore;
use crate::costs::{CostModel, NullCosts};
use crate::demand::DemandSource;
use crate::error::MixResult;
use crate::generators::{default_fleet, Generator};
use crate::regions::RegionSelection;
use crate::table::{sum_values, TimeTable};
use crate::units::{MegawattHours, Megawatts};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::{debug, warn};

/// Maximum tolerable unserved energy, in percent of demand.
pub const RELIABILITY_STANDARD: f64 = 0.002;

const HOURS_PER_YEAR: f64 = 365.25 * 24.0;

/// Years covered by `hours` of hourly data. A full common or leap year counts
/// as exactly one.
pub fn year_count(hours: usize) -> f64 {
    if hours == 8760 || hours == 8784 {
        1.0
    } else {
        hours as f64 / HOURS_PER_YEAR
    }
}

/// A maximal run of consecutive hours with unserved energy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnservedEvent {
    pub start: NaiveDateTime,
    pub hours: usize,
    pub energy: MegawattHours,
}

/// Headline numbers for one run, suitable for comparing runs side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetrics {
    pub hours: usize,
    pub years: f64,
    pub total_demand: MegawattHours,
    pub surplus_energy: MegawattHours,
    pub unserved_energy: MegawattHours,
    /// NaN (serialized as `null`) when total demand is zero.
    pub unserved_percent: f64,
    pub unserved_hours: usize,
    pub unserved_events: usize,
    pub reliability_standard_met: bool,
}

#[derive(Debug)]
pub struct Context {
    pub verbose: bool,
    pub regions: RegionSelection,
    start_date: NaiveDateTime,
    hours: usize,
    years: f64,
    relstd: f64,
    pub generators: Vec<Box<dyn Generator>>,
    /// Hourly demand per region, copied from the demand source.
    ///
    /// Reassigning this table does not update [`Context::timesteps`].
    pub demand: TimeTable,
    timesteps: usize,
    pub spill: TimeTable,
    pub generation: TimeTable,
    pub unserved: TimeTable,
    nsp_limit: f64,
    pub costs: Box<dyn CostModel>,
}

impl Context {
    /// Build a context over `demand` with the default fleet.
    ///
    /// Fails if `config` does not provide `[limits] nonsync-penetration`.
    pub fn new(demand: &DemandSource, config: &ConfigStore) -> MixResult<Self> {
        let nsp_limit = config.nonsync_penetration()?;
        let table = demand.table().clone();
        let hours = table.len();
        let years = year_count(hours);
        debug!(hours, years, nsp_limit, start = %demand.start(), "initialised context");

        Ok(Self {
            verbose: false,
            regions: RegionSelection::all(),
            start_date: demand.start(),
            hours,
            years,
            relstd: RELIABILITY_STANDARD,
            generators: default_fleet(),
            timesteps: table.len(),
            demand: table,
            spill: TimeTable::default(),
            generation: TimeTable::default(),
            unserved: TimeTable::default(),
            nsp_limit,
            costs: Box::new(NullCosts),
        })
    }

    /// Replace the fleet.
    pub fn with_generators(mut self, generators: Vec<Box<dyn Generator>>) -> Self {
        let mut seen = HashSet::new();
        for gen in &generators {
            if !seen.insert(gen.label().to_string()) {
                warn!(label = gen.label(), "duplicate generator label in fleet");
            }
        }
        self.generators = generators;
        self
    }

    pub fn start_date(&self) -> NaiveDateTime {
        self.start_date
    }

    pub fn hours(&self) -> usize {
        self.hours
    }

    pub fn years(&self) -> f64 {
        self.years
    }

    /// Demand rows counted at construction.
    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    pub fn reliability_standard(&self) -> f64 {
        self.relstd
    }

    pub fn nsp_limit(&self) -> f64 {
        self.nsp_limit
    }

    pub fn total_demand(&self) -> MegawattHours {
        MegawattHours(self.demand.sum())
    }

    pub fn unserved_energy(&self) -> MegawattHours {
        MegawattHours(self.unserved.sum())
    }

    pub fn surplus_energy(&self) -> MegawattHours {
        MegawattHours(self.spill.sum())
    }

    /// Unserved energy as a percentage of total demand, or NaN when there is
    /// no demand at all.
    pub fn unserved_percent(&self) -> f64 {
        let total = self.total_demand();
        if total.value() == 0.0 {
            return f64::NAN;
        }
        self.unserved_energy() / total * 100.0
    }

    /// True when unserved energy is over the reliability standard (with 0.1%
    /// tolerance). Always false when the percentage is NaN.
    pub fn exceeds_reliability_standard(&self) -> bool {
        self.unserved_percent() > self.relstd * 1.001
    }

    /// Number of values [`Context::set_capacities`] expects.
    pub fn tunable_count(&self) -> usize {
        self.generators.iter().map(|g| g.tunables().len()).sum()
    }

    /// Assign every tunable parameter of the fleet from `caps`, in fleet order
    /// and then tunable order, clamping each value to its bounds.
    ///
    /// # Panics
    ///
    /// If `caps.len()` differs from [`Context::tunable_count`].
    pub fn set_capacities(&mut self, caps: &[f64]) {
        let expected = self.tunable_count();
        assert_eq!(
            expected,
            caps.len(),
            "capacity count mismatch: fleet has {} tunable parameters, got {} values",
            expected,
            caps.len()
        );

        let mut values = caps.iter().copied();
        for gen in self.generators.iter_mut() {
            for (tunable, value) in gen.tunables().into_iter().zip(values.by_ref()) {
                let clamped = tunable.clamp(value);
                if clamped != value {
                    debug!(label = gen.label(), value, clamped, "clamped tunable");
                }
                gen.apply(tunable.param, clamped);
            }
        }
    }

    /// Energy produced by the unit whose label names a generation column.
    pub fn supplied_energy(&self, label: &str) -> Option<MegawattHours> {
        self.generation
            .column(label)
            .map(|values| MegawattHours(sum_values(&values)))
    }

    /// Number of spill rows with a positive total.
    pub fn spill_timesteps(&self) -> usize {
        self.spill.row_sums().filter(|sum| *sum > 0.0).count()
    }

    /// Group unserved rows into events of consecutive hours.
    ///
    /// Row `i` is compared against `first + i` hours. Within a contiguous run
    /// that offset stays constant and each gap shifts it, so rows sharing an
    /// offset form one event.
    pub fn unserved_events(&self) -> Vec<UnservedEvent> {
        let Some(&first) = self.unserved.index().first() else {
            return Vec::new();
        };
        let mut groups: BTreeMap<Duration, UnservedEvent> = BTreeMap::new();
        for (i, (timestamp, row)) in self.unserved.rows().enumerate() {
            let offset = timestamp - (first + Duration::hours(i as i64));
            let event = groups.entry(offset).or_insert(UnservedEvent {
                start: timestamp,
                hours: 0,
                energy: MegawattHours(0.0),
            });
            event.hours += 1;
            event.energy = event.energy + MegawattHours(sum_values(row));
        }
        let mut events: Vec<UnservedEvent> = groups.into_values().collect();
        events.sort_by_key(|e| e.start);
        events
    }

    /// Smallest and largest shortfall in the unserved table.
    pub fn shortfall_range(&self) -> Option<(Megawatts, Megawatts)> {
        Some((Megawatts(self.unserved.min()?), Megawatts(self.unserved.max()?)))
    }

    /// Generation rows where the non-synchronous share of output exceeds the
    /// penetration limit. Columns that match no generator label are ignored.
    pub fn nonsync_exceedances(&self) -> usize {
        let nonsync: Vec<Option<bool>> = self
            .generation
            .columns()
            .iter()
            .map(|col| {
                self.generators
                    .iter()
                    .find(|g| g.label() == col)
                    .map(|g| g.non_synchronous())
            })
            .collect();

        self.generation
            .rows()
            .filter(|(_, row)| {
                let mut total = 0.0;
                let mut inverter = 0.0;
                for (value, flag) in row.iter().zip(&nonsync) {
                    match flag {
                        Some(true) => {
                            total += value;
                            inverter += value;
                        }
                        Some(false) => total += value,
                        None => {}
                    }
                }
                total > 0.0 && inverter / total > self.nsp_limit
            })
            .count()
    }

    pub fn metrics(&self) -> RunMetrics {
        RunMetrics {
            hours: self.hours,
            years: self.years,
            total_demand: self.total_demand(),
            surplus_energy: self.surplus_energy(),
            unserved_energy: self.unserved_energy(),
            unserved_percent: self.unserved_percent(),
            unserved_hours: self.unserved.len(),
            unserved_events: self.unserved_events().len(),
            reliability_standard_met: !self.exceeds_reliability_standard(),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.regions.is_all() {
            writeln!(f, "Regions: {}", self.regions)?;
        }
        if self.verbose {
            writeln!(f, "Generators:")?;
            for gen in &self.generators {
                write!(f, "\t{gen}")?;
                match gen.summary(self) {
                    Some(summary) => write!(f, "\n\t   {summary}\n")?,
                    None => writeln!(f)?,
                }
            }
        }
        writeln!(f, "Timesteps: {} h", self.hours)?;
        writeln!(f, "Demand energy: {}", self.total_demand())?;
        let surplus = self.surplus_energy();
        writeln!(f, "Unused surplus energy: {surplus}")?;
        if surplus.value() > 0.0 {
            writeln!(
                f,
                "Timesteps with unused surplus energy: {}",
                self.spill_timesteps()
            )?;
        }

        if self.unserved.is_empty() {
            return write!(f, "No unserved energy");
        }
        writeln!(f, "Unserved energy: {:.3}%", self.unserved_percent())?;
        if self.exceeds_reliability_standard() {
            writeln!(f, "WARNING: reliability standard exceeded")?;
        }
        writeln!(f, "Unserved total hours: {}", self.unserved.len())?;
        writeln!(
            f,
            "Number of unserved energy events: {}",
            self.unserved_events().len()
        )?;
        if let Some((min, max)) = self.shortfall_range() {
            write!(f, "Shortfalls (min, max): ({min}, {max})")?;
        }
        Ok(())
    }
}
