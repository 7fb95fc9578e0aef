//! Structured projection of a context's fleet.
//!
//! [`project_context`] turns a [`Context`] into one [`GeneratorRecord`] per
//! unit and declines anything else, leaving the caller's own encoder to deal
//! with it:
//!
//! ```ignore
//! let value = match project_context(object) {
//!     Some(records) => serde_json::to_value(records)?,
//!     None => fallback(object)?,
//! };
//! ```

use crate::context::Context;
use crate::error::MixResult;
use crate::generators::Technology;
use crate::polygons::Polygon;
use crate::units::Megawatts;
use serde::Serialize;
use std::any::Any;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorRecord {
    pub label: String,
    pub polygon: Polygon,
    pub capacity: Megawatts,
    pub technology: Technology,
}

/// Records for `object` if it is a [`Context`], `None` otherwise.
pub fn project_context(object: &dyn Any) -> Option<Vec<GeneratorRecord>> {
    object.downcast_ref::<Context>().map(Context::fleet_records)
}

impl Context {
    /// One record per generator, in fleet order.
    pub fn fleet_records(&self) -> Vec<GeneratorRecord> {
        self.generators
            .iter()
            .map(|gen| GeneratorRecord {
                label: gen.label().to_string(),
                polygon: gen.polygon(),
                capacity: gen.capacity(),
                technology: gen.technology(),
            })
            .collect()
    }

    pub fn fleet_json(&self) -> MixResult<String> {
        Ok(serde_json::to_string_pretty(&self.fleet_records())?)
    }
}
