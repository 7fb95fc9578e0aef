//! Market regions and region selections.

use crate::error::{MixError, MixResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A market region with its own demand column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "QLD1")]
    Qld,
    #[serde(rename = "NSW1")]
    Nsw,
    #[serde(rename = "VIC1")]
    Vic,
    #[serde(rename = "TAS1")]
    Tas,
    #[serde(rename = "SA1")]
    Sa,
}

impl Region {
    pub const ALL: [Region; 5] = [Region::Qld, Region::Nsw, Region::Vic, Region::Tas, Region::Sa];

    /// Region code as used in demand column headers.
    pub fn code(self) -> &'static str {
        match self {
            Region::Qld => "QLD1",
            Region::Nsw => "NSW1",
            Region::Vic => "VIC1",
            Region::Tas => "TAS1",
            Region::Sa => "SA1",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = MixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| MixError::Parse(format!("unknown region '{trimmed}'")))
    }
}

/// The set of regions a run is restricted to.
///
/// The default selection holds every region and compares equal to
/// [`RegionSelection::all`], which is how reports detect an unrestricted run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSelection(BTreeSet<Region>);

impl RegionSelection {
    pub fn all() -> Self {
        Self(Region::ALL.into_iter().collect())
    }

    /// Restrict to the given regions. An empty selection is rejected.
    pub fn only<I: IntoIterator<Item = Region>>(regions: I) -> MixResult<Self> {
        let set: BTreeSet<Region> = regions.into_iter().collect();
        if set.is_empty() {
            return Err(MixError::Validation(
                "region selection cannot be empty".into(),
            ));
        }
        Ok(Self(set))
    }

    pub fn is_all(&self) -> bool {
        self.0.len() == Region::ALL.len()
    }

    pub fn contains(&self, region: Region) -> bool {
        self.0.contains(&region)
    }

    pub fn iter(&self) -> impl Iterator<Item = Region> + '_ {
        self.0.iter().copied()
    }
}

impl Default for RegionSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for RegionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.0.iter().map(|r| r.code()).collect();
        write!(f, "[{}]", codes.join(", "))
    }
}

impl FromStr for RegionSelection {
    type Err = MixError;

    /// Parse a comma-separated list of region codes, e.g. `NSW1,VIC1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let regions = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Region::from_str)
            .collect::<MixResult<Vec<_>>>()?;
        Self::only(regions)
    }
}
