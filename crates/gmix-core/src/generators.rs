//! Generating units and their tunable parameters.
//!
//! Dispatch physics live with whoever runs the simulation; a context only
//! needs each unit's identity, current sizing and the parameters an
//! optimiser may adjust. Those are exposed through the [`Generator`] trait.
//!
//! Every unit declares its [`Technology`] explicitly. Projections and reports
//! read the tag instead of inspecting concrete types.

use crate::context::Context;
use crate::error::MixError;
use crate::polygons::Polygon;
use crate::units::{MegawattHours, Megawatts};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Upper bound on any single tunable capacity (MW).
pub const MAX_CAPACITY_MW: f64 = 40_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technology {
    #[serde(rename = "CCGT")]
    Ccgt,
    #[serde(rename = "OCGT")]
    Ocgt,
    #[serde(rename = "Black_Coal")]
    BlackCoal,
    Biofuel,
    Hydro,
    Wind,
    #[serde(rename = "PV1Axis")]
    Pv1Axis,
    Battery,
}

impl Technology {
    pub fn as_str(self) -> &'static str {
        match self {
            Technology::Ccgt => "CCGT",
            Technology::Ocgt => "OCGT",
            Technology::BlackCoal => "Black_Coal",
            Technology::Biofuel => "Biofuel",
            Technology::Hydro => "Hydro",
            Technology::Wind => "Wind",
            Technology::Pv1Axis => "PV1Axis",
            Technology::Battery => "Battery",
        }
    }

    /// Inverter-connected technologies that count towards the
    /// non-synchronous penetration limit.
    pub fn is_non_synchronous(self) -> bool {
        matches!(
            self,
            Technology::Wind | Technology::Pv1Axis | Technology::Battery
        )
    }
}

impl FromStr for Technology {
    type Err = MixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ccgt" => Ok(Technology::Ccgt),
            "ocgt" => Ok(Technology::Ocgt),
            "black_coal" | "coal" => Ok(Technology::BlackCoal),
            "biofuel" => Ok(Technology::Biofuel),
            "hydro" => Ok(Technology::Hydro),
            "wind" => Ok(Technology::Wind),
            "pv1axis" | "pv" => Ok(Technology::Pv1Axis),
            "battery" => Ok(Technology::Battery),
            other => Err(MixError::Parse(format!("unknown technology '{other}'"))),
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a tunable value controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// Rated output in MW.
    Capacity,
    /// Storage energy in MWh.
    Storage,
}

/// One adjustable parameter and its admissible range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunable {
    pub param: Param,
    pub min: f64,
    pub max: f64,
}

impl Tunable {
    pub fn new(param: Param, min: f64, max: f64) -> Self {
        Self { param, min, max }
    }

    /// Clamp `value` into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

pub trait Generator: fmt::Display + fmt::Debug {
    fn technology(&self) -> Technology;

    /// Display name, also the column name of this unit in a generation table.
    fn label(&self) -> &str;

    fn polygon(&self) -> Polygon;

    fn capacity(&self) -> Megawatts;

    /// Adjustable parameters in the order bulk assignment consumes them.
    fn tunables(&self) -> Vec<Tunable>;

    /// Set one parameter. Callers clamp the value beforehand.
    fn apply(&mut self, param: Param, value: f64);

    fn non_synchronous(&self) -> bool {
        self.technology().is_non_synchronous()
    }

    /// One-line summary of this unit's output in `context`, if it has any.
    fn summary(&self, context: &Context) -> Option<String> {
        let energy = context.supplied_energy(self.label())?;
        Some(supply_summary(energy, self.capacity(), context.hours()))
    }
}

fn supply_summary(energy: MegawattHours, capacity: Megawatts, hours: usize) -> String {
    let possible = capacity.over_hours(hours as f64);
    if possible.value() > 0.0 {
        format!("supplied {}, CF {:.1}%", energy, energy / possible * 100.0)
    } else {
        format!("supplied {energy}")
    }
}

/// A conventional or variable-output plant with a single capacity parameter.
#[derive(Debug, Clone)]
pub struct Plant {
    technology: Technology,
    polygon: Polygon,
    capacity: Megawatts,
    label: String,
    bounds: (f64, f64),
}

impl Plant {
    pub fn new(technology: Technology, polygon: Polygon, capacity: f64) -> Self {
        Self {
            technology,
            polygon,
            capacity: Megawatts(capacity),
            label: format!("{technology} ({polygon})"),
            bounds: (0.0, MAX_CAPACITY_MW),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = (min, max);
        self
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.label, self.capacity)
    }
}

impl Generator for Plant {
    fn technology(&self) -> Technology {
        self.technology
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn polygon(&self) -> Polygon {
        self.polygon
    }

    fn capacity(&self) -> Megawatts {
        self.capacity
    }

    fn tunables(&self) -> Vec<Tunable> {
        vec![Tunable::new(Param::Capacity, self.bounds.0, self.bounds.1)]
    }

    fn apply(&mut self, param: Param, value: f64) {
        match param {
            Param::Capacity => self.capacity = Megawatts(value),
            Param::Storage => warn!(label = %self.label, "plant has no storage; ignoring"),
        }
    }
}

/// Battery storage sized by power (MW) and energy (MWh).
#[derive(Debug, Clone)]
pub struct Battery {
    polygon: Polygon,
    capacity: Megawatts,
    storage: MegawattHours,
    label: String,
}

impl Battery {
    pub fn new(polygon: Polygon, capacity: f64, storage: f64) -> Self {
        Self {
            polygon,
            capacity: Megawatts(capacity),
            storage: MegawattHours(storage),
            label: format!("{} ({polygon})", Technology::Battery),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn storage(&self) -> MegawattHours {
        self.storage
    }
}

impl fmt::Display for Battery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.label, self.capacity, self.storage)
    }
}

impl Generator for Battery {
    fn technology(&self) -> Technology {
        Technology::Battery
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn polygon(&self) -> Polygon {
        self.polygon
    }

    fn capacity(&self) -> Megawatts {
        self.capacity
    }

    fn tunables(&self) -> Vec<Tunable> {
        vec![
            Tunable::new(Param::Capacity, 0.0, MAX_CAPACITY_MW),
            // up to 24 hours of storage at full capacity
            Tunable::new(Param::Storage, 0.0, MAX_CAPACITY_MW * 24.0),
        ]
    }

    fn apply(&mut self, param: Param, value: f64) {
        match param {
            Param::Capacity => self.capacity = Megawatts(value),
            Param::Storage => self.storage = MegawattHours(value),
        }
    }
}

/// Fleet used when a run does not supply its own: one CCGT and one OCGT at the
/// wildcard polygon, 20 GW each.
pub fn default_fleet() -> Vec<Box<dyn Generator>> {
    vec![
        Box::new(Plant::new(Technology::Ccgt, Polygon::WILDCARD, 20_000.0)),
        Box::new(Plant::new(Technology::Ocgt, Polygon::WILDCARD, 20_000.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_label_and_display() {
        let ccgt = Plant::new(Technology::Ccgt, Polygon::WILDCARD, 20_000.0);
        assert_eq!(ccgt.label(), "CCGT (WILDCARD)");
        assert_eq!(ccgt.to_string(), "CCGT (WILDCARD), 20.00 GW");
        assert!(!ccgt.non_synchronous());
    }

    #[test]
    fn battery_has_two_tunables() {
        let mut battery = Battery::new(Polygon::WILDCARD, 100.0, 400.0);
        let tunables = battery.tunables();
        assert_eq!(tunables.len(), 2);
        assert_eq!(tunables[1].param, Param::Storage);
        battery.apply(Param::Storage, 800.0);
        assert_eq!(battery.storage(), MegawattHours(800.0));
        assert!(battery.non_synchronous());
    }

    #[test]
    fn tunable_clamps() {
        let t = Tunable::new(Param::Capacity, 10.0, 50.0);
        assert_eq!(t.clamp(5.0), 10.0);
        assert_eq!(t.clamp(60.0), 50.0);
        assert_eq!(t.clamp(25.0), 25.0);
    }

    #[test]
    fn technology_serializes_bare_name() {
        assert_eq!(
            serde_json::to_string(&Technology::Ccgt).unwrap(),
            "\"CCGT\""
        );
        assert_eq!(Technology::Pv1Axis.to_string(), "PV1Axis");
        assert!(Technology::Wind.is_non_synchronous());
        assert!(!Technology::Hydro.is_non_synchronous());
    }

    #[test]
    fn technology_from_str() {
        assert_eq!("CCGT".parse::<Technology>().unwrap(), Technology::Ccgt);
        assert_eq!("coal".parse::<Technology>().unwrap(), Technology::BlackCoal);
        assert_eq!("PV".parse::<Technology>().unwrap(), Technology::Pv1Axis);
        assert!("fusion".parse::<Technology>().is_err());
    }

    #[test]
    fn default_fleet_shape() {
        let fleet = default_fleet();
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet[0].technology(), Technology::Ccgt);
        assert_eq!(fleet[1].technology(), Technology::Ocgt);
        assert_eq!(fleet[1].capacity(), Megawatts(20_000.0));
    }
}
