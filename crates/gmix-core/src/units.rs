//! Unit-safe power and energy quantities.
//!
//! Generator capacities and shortfalls are instantaneous power (MW); demand,
//! spill and unserved totals are energy (MWh). Wrapping both in newtypes keeps
//! a capacity from being summed into an energy total by accident.
//!
//! # Compact display
//!
//! `Display` rescales the value to the SI prefix that keeps its magnitude in
//! `[1, 1000)` and prints two decimals:
//!
//! ```
//! use gmix_core::units::{MegawattHours, Megawatts};
//!
//! assert_eq!(MegawattHours(123_450.0).to_string(), "123.45 GWh");
//! assert_eq!(Megawatts(0.25).to_string(), "250.00 kW");
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div};

/// SI prefixes by power-of-ten exponent relative to the bare unit.
const PREFIXES: [(i32, &str); 8] = [
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
    (15, "P"),
    (18, "E"),
];

/// Render `value` (expressed at `exponent`, e.g. 6 for mega) with the most
/// readable SI prefix.
pub fn format_compact(value: f64, exponent: i32, unit: &str) -> String {
    let (lowest, highest) = (PREFIXES[0].0, PREFIXES[PREFIXES.len() - 1].0);
    let mut target = exponent;
    let mut scaled = value;
    if value != 0.0 && value.is_finite() {
        while scaled.abs() >= 1000.0 && target < highest {
            scaled /= 1000.0;
            target += 3;
        }
        while scaled.abs() < 1.0 && target > lowest {
            scaled *= 1000.0;
            target -= 3;
        }
    }
    let prefix = PREFIXES
        .iter()
        .find(|(exp, _)| *exp == target)
        .map(|(_, p)| *p)
        .unwrap_or("");
    format!("{scaled:.2} {prefix}{unit}")
}

macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&format_compact(self.0, 6, $unit_name))
            }
        }

        impl $type {
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }
        }
    };
}

/// Instantaneous power in megawatts (MW)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Megawatts(pub f64);

impl_unit_ops!(Megawatts, "W");

/// Energy in megawatt-hours (MWh)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MegawattHours(pub f64);

impl_unit_ops!(MegawattHours, "Wh");

impl Megawatts {
    /// Energy delivered when held for `hours`.
    #[inline]
    pub fn over_hours(self, hours: f64) -> MegawattHours {
        MegawattHours(self.0 * hours)
    }
}
