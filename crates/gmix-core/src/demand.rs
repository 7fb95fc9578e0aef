//! Hourly demand input for a run.

use crate::error::{MixError, MixResult};
use crate::table::TimeTable;
use chrono::NaiveDateTime;

/// Per-region hourly demand and the timestamp anchoring it.
///
/// A context copies the table on construction, so one source can seed any
/// number of independent runs.
#[derive(Debug, Clone)]
pub struct DemandSource {
    start: NaiveDateTime,
    table: TimeTable,
}

impl DemandSource {
    /// Wrap a demand table; the start date is its first timestamp.
    pub fn new(table: TimeTable) -> MixResult<Self> {
        let start = table
            .index()
            .first()
            .copied()
            .ok_or_else(|| MixError::Validation("demand table has no rows".into()))?;
        Ok(Self { start, table })
    }

    /// Use an explicit start date, e.g. for an empty demand series.
    pub fn with_start(start: NaiveDateTime, table: TimeTable) -> Self {
        Self { start, table }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn table(&self) -> &TimeTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn start_is_first_row() {
        let t0 = NaiveDate::from_ymd_opt(2010, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let table = TimeTable::hourly(["NSW1"], t0, vec![vec![1.0], vec![2.0]]).unwrap();
        let source = DemandSource::new(table).unwrap();
        assert_eq!(source.start(), t0);
        assert_eq!(source.table().len(), 2);
    }

    #[test]
    fn empty_table_needs_explicit_start() {
        assert!(DemandSource::new(TimeTable::new(["NSW1"])).is_err());
    }
}
