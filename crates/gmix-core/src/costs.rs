//! Cost models attached to a context.
//!
//! Costing happens outside this crate; the context only carries the model so
//! that whoever evaluates a run can reach it.

use crate::generators::Technology;
use std::fmt::Debug;

pub trait CostModel: Debug {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Capital cost in $/kW for a technology.
    fn capital_cost(&self, technology: Technology) -> f64;

    /// Fixed operations and maintenance in $/kW/yr.
    fn fixed_om(&self, technology: Technology) -> f64;

    /// Variable operations and maintenance in $/MWh.
    fn variable_om(&self, technology: Technology) -> f64;
}

/// Placeholder model where everything is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCosts;

impl CostModel for NullCosts {
    fn name(&self) -> &str {
        "null"
    }

    fn capital_cost(&self, _technology: Technology) -> f64 {
        0.0
    }

    fn fixed_om(&self, _technology: Technology) -> f64 {
        0.0
    }

    fn variable_om(&self, _technology: Technology) -> f64 {
        0.0
    }
}
