//! Error types for simulation contexts and their collaborators
//!
//! [`MixError`] covers everything that can go wrong while assembling a run:
//! reading configuration, parsing demand data, or building time-indexed
//! tables. Adapter crates wrap it in `anyhow::Error` at their own boundaries.
//!
//! # Example
//!
//! ```ignore
//! use gmix_core::{Context, MixResult};
//!
//! fn build(demand: &DemandSource, config: &ConfigStore) -> MixResult<Context> {
//!     let context = Context::new(demand, config)?;
//!     Ok(context)
//! }
//! ```

use thiserror::Error;

/// Error type for all context operations.
#[derive(Error, Debug)]
pub enum MixError {
    /// I/O errors (reading configuration files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or malformed configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Time-indexed table shape errors
    #[error("Table error: {0}")]
    Table(String),
}

/// Convenience type alias for Results using MixError.
pub type MixResult<T> = Result<T, MixError>;

impl From<serde_json::Error> for MixError {
    fn from(err: serde_json::Error) -> Self {
        MixError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for MixError {
    fn from(err: toml::de::Error) -> Self {
        MixError::Config(err.to_string())
    }
}
