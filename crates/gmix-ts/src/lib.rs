//! Frame adapters between files on disk and [`TimeTable`]s.
//!
//! Files hold one row per timestep. The first column is the timestamp and
//! every other column is a numeric series (a region's demand, a generator's
//! output, ...). CSV is always available; Parquet needs the `parquet` feature.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDateTime};
use gmix_core::{DemandSource, TimeTable};
use polars::prelude::*;
#[cfg(feature = "parquet")]
use polars::prelude::{ParquetReader, ParquetWriter};
use tracing::debug;

/// Accepted timestamp layouts, tried in order after RFC 3339.
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Load an hourly demand series; its first timestamp becomes the start date.
pub fn load_demand(path: &Path) -> Result<DemandSource> {
    let table = load_table(path)?;
    debug!(
        path = %path.display(),
        rows = table.len(),
        regions = table.columns().len(),
        "loaded demand"
    );
    DemandSource::new(table).with_context(|| format!("demand series {}", path.display()))
}

/// Load a spill, generation or unserved table.
pub fn load_table(path: &Path) -> Result<TimeTable> {
    let df = read_frame(path)?;
    frame_to_table(&df).with_context(|| format!("converting {}", path.display()))
}

pub fn write_table(table: &TimeTable, path: &Path) -> Result<()> {
    let mut df = table_to_frame(table)?;
    write_frame(&mut df, path)
}

pub fn frame_to_table(df: &DataFrame) -> Result<TimeTable> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let (timestamp_column, value_columns) = names
        .split_first()
        .ok_or_else(|| anyhow!("frame has no columns"))?;

    let timestamp_series = df
        .column(timestamp_column)?
        .cast(&DataType::Utf8)
        .context("casting timestamp column to Utf8")?;
    let timestamps = timestamp_series.utf8()?;

    let mut columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(value_columns.len());
    for name in value_columns {
        let series = df
            .column(name)?
            .cast(&DataType::Float64)
            .with_context(|| format!("casting column '{name}' to Float64"))?;
        columns.push(series.f64()?.into_iter().collect());
    }

    let mut table = TimeTable::new(value_columns.iter().cloned());
    for (row, stamp) in timestamps.into_iter().enumerate() {
        let stamp = stamp.ok_or_else(|| anyhow!("row {row}: missing timestamp"))?;
        let timestamp = parse_timestamp(stamp).with_context(|| format!("row {row}"))?;
        let values = columns
            .iter()
            .zip(value_columns)
            .map(|(values, name)| {
                values[row].ok_or_else(|| anyhow!("row {row}: missing value in '{name}'"))
            })
            .collect::<Result<Vec<f64>>>()?;
        table.push_row(timestamp, values)?;
    }
    Ok(table)
}

pub fn table_to_frame(table: &TimeTable) -> Result<DataFrame> {
    let stamps: Vec<String> = table
        .index()
        .iter()
        .map(|ts| ts.format(WRITE_FORMAT).to_string())
        .collect();
    let mut series = Vec::with_capacity(table.columns().len() + 1);
    series.push(Series::new("timestamp", stamps));
    for name in table.columns() {
        let values = table.column(name).unwrap_or_default();
        series.push(Series::new(name.as_str(), values));
    }
    DataFrame::new(series).context("building frame from table")
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_local());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| anyhow!("parsing timestamp '{value}'; use RFC3339 or YYYY-MM-DD HH:MM:SS"))
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    let extension = extension_of(path);
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    match extension.as_str() {
        #[cfg(feature = "parquet")]
        "parquet" => {
            let reader = ParquetReader::new(&mut file);
            reader.finish().context("reading Parquet file")
        }
        #[cfg(not(feature = "parquet"))]
        "parquet" => Err(anyhow!(
            "parquet support is disabled; rebuild with the 'parquet' feature"
        )),
        "csv" => {
            let reader = CsvReader::new(&mut file);
            reader.has_header(true).finish().context("reading CSV file")
        }
        _ => Err(anyhow!(
            "unsupported file extension '{}'; use .csv or .parquet",
            extension
        )),
    }
}

fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let extension = extension_of(path);
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match extension.as_str() {
        #[cfg(feature = "parquet")]
        "parquet" => ParquetWriter::new(&mut file)
            .finish(df)
            .map(|_| ())
            .context("writing Parquet file"),
        #[cfg(not(feature = "parquet"))]
        "parquet" => Err(anyhow!(
            "parquet support is disabled; rebuild with the 'parquet' feature"
        )),
        "csv" => CsvWriter::new(&mut file)
            .finish(df)
            .context("writing CSV file"),
        _ => Err(anyhow!(
            "unsupported output extension for {}; use .csv or .parquet",
            path.display()
        )),
    }
}
