//! Time-indexed numeric tables.
//!
//! Demand, spill, generation and unserved energy are all stored as a
//! [`TimeTable`]: a strictly increasing timestamp index, named columns and
//! one row of `f64` values per timestamp.

use crate::error::{MixError, MixResult};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeTable {
    columns: Vec<String>,
    index: Vec<NaiveDateTime>,
    rows: Vec<Vec<f64>>,
}

impl TimeTable {
    /// An empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            index: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Build a table with one row per hour starting at `start`.
    pub fn hourly<I, S>(columns: I, start: NaiveDateTime, rows: Vec<Vec<f64>>) -> MixResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        for (i, row) in rows.into_iter().enumerate() {
            table.push_row(start + Duration::hours(i as i64), row)?;
        }
        Ok(table)
    }

    /// Append a row. Timestamps must be strictly increasing and the row must
    /// have one value per column.
    pub fn push_row(&mut self, timestamp: NaiveDateTime, values: Vec<f64>) -> MixResult<()> {
        if values.len() != self.columns.len() {
            return Err(MixError::Table(format!(
                "row at {timestamp} has {} values, expected {}",
                values.len(),
                self.columns.len()
            )));
        }
        if let Some(last) = self.index.last() {
            if timestamp <= *last {
                return Err(MixError::Table(format!(
                    "timestamp {timestamp} does not follow {last}"
                )));
            }
        }
        self.index.push(timestamp);
        self.rows.push(values);
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty() || self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn rows(&self) -> impl Iterator<Item = (NaiveDateTime, &[f64])> + '_ {
        self.index
            .iter()
            .copied()
            .zip(self.rows.iter().map(Vec::as_slice))
    }

    /// Values of one column, or `None` if the column does not exist.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let pos = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[pos]).collect())
    }

    /// Sum over every cell; `+0.0` for an empty table.
    pub fn sum(&self) -> f64 {
        sum_values(self.rows.iter().flatten())
    }

    /// Per-row sums across all columns.
    pub fn row_sums(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| sum_values(row))
    }

    pub fn min(&self) -> Option<f64> {
        self.rows.iter().flatten().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.rows.iter().flatten().copied().reduce(f64::max)
    }
}

/// Sum starting from `+0.0`, so an empty input sums to positive zero.
pub(crate) fn sum_values<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> f64 {
    values.into_iter().fold(0.0, |acc, v| acc + v)
}
