//! Siting polygons.
//!
//! Generators are sited in one of [`NUM_POLYGONS`] numbered polygons. The
//! [`Polygon::WILDCARD`] polygon stands in for units whose location does not
//! matter to the run.

use crate::error::{MixError, MixResult};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const NUM_POLYGONS: u8 = 43;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Polygon(u8);

impl Polygon {
    pub const WILDCARD: Polygon = Polygon(31);

    pub fn new(id: u8) -> MixResult<Self> {
        if id == 0 || id > NUM_POLYGONS {
            return Err(MixError::Validation(format!(
                "polygon {id} out of range 1..={NUM_POLYGONS}"
            )));
        }
        Ok(Polygon(id))
    }

    #[inline]
    pub fn id(self) -> u8 {
        self.0
    }

    pub fn is_wildcard(self) -> bool {
        self == Self::WILDCARD
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            f.write_str("WILDCARD")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Polygon {
    type Err = MixError;

    /// Accepts a polygon number or `WILDCARD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("wildcard") {
            return Ok(Self::WILDCARD);
        }
        let id = trimmed
            .parse::<u8>()
            .map_err(|_| MixError::Parse(format!("invalid polygon '{trimmed}'")))?;
        Self::new(id)
    }
}

// Serialized through Display so the wildcard reads as "WILDCARD" in projections.
impl Serialize for Polygon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
