//! # gmix-core: Generation-Mix Run State
//!
//! Holds the state of one generation-mix simulation run and derives the
//! reliability and energy metrics reported for it.
//!
//! ## Design Philosophy
//!
//! Every run gets its own [`Context`]. Inputs are passed in explicitly
//! (a [`DemandSource`] and a [`ConfigStore`]) and copied on construction, so
//! contexts never share mutable state and can be compared after their runs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gmix_core::*;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let table = TimeTable::hourly(["NSW1"], start, vec![vec![7000.0]; 24]).unwrap();
//! let demand = DemandSource::new(table).unwrap();
//!
//! let mut context = Context::new(&demand, &ConfigStore::default()).unwrap();
//! context.set_capacities(&[5000.0, 3000.0]);
//! println!("{context}");
//! ```
//!
//! ## Modules
//!
//! - [`context`] - run state, metrics and the text report
//! - [`projection`] - fleet records for JSON output
//! - [`generators`] - the [`Generator`] trait and stock unit kinds
//! - [`table`] - time-indexed numeric tables
//! - [`config`] - TOML configuration store
//! - [`units`] - MW / MWh newtypes with compact display

pub mod config;
pub mod context;
pub mod costs;
pub mod demand;
pub mod error;
pub mod generators;
pub mod polygons;
pub mod projection;
pub mod regions;
pub mod table;
pub mod units;

pub use config::ConfigStore;
pub use context::{year_count, Context, RunMetrics, UnservedEvent, RELIABILITY_STANDARD};
pub use costs::{CostModel, NullCosts};
pub use demand::DemandSource;
pub use error::{MixError, MixResult};
pub use generators::{default_fleet, Battery, Generator, Param, Plant, Technology, Tunable};
pub use polygons::Polygon;
pub use projection::{project_context, GeneratorRecord};
pub use regions::{Region, RegionSelection};
pub use table::TimeTable;
pub use units::{MegawattHours, Megawatts};
