//! Configuration store.
//!
//! Run-wide settings live in a TOML file organised in sections:
//!
//! ```toml
//! [limits]
//! nonsync-penetration = 0.75
//! ```
//!
//! The store keeps the raw table and hands out typed values on request so a
//! missing key surfaces where it is needed, not when the file is read.

use crate::error::{MixError, MixResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "GMIX_CONFIG";

const DEFAULT_CONFIG: &str = "\
[limits]
nonsync-penetration = 0.75
";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    table: toml::Table,
    source: Option<PathBuf>,
}

impl ConfigStore {
    pub fn from_toml_str(contents: &str) -> MixResult<Self> {
        let table: toml::Table = toml::from_str(contents)?;
        Ok(Self {
            table,
            source: None,
        })
    }

    pub fn load(path: &Path) -> MixResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            MixError::Config(format!("reading config '{}': {err}", path.display()))
        })?;
        let mut store = Self::from_toml_str(&contents)?;
        store.source = Some(path.to_path_buf());
        Ok(store)
    }

    /// Resolve the configuration: an explicit path wins, then the file named by
    /// `GMIX_CONFIG`, then the built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> MixResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// File the store was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Numeric value at `[section] key`. Integers are widened to `f64`.
    pub fn get_f64(&self, section: &str, key: &str) -> MixResult<f64> {
        let value = self
            .table
            .get(section)
            .and_then(|s| s.as_table())
            .and_then(|s| s.get(key))
            .ok_or_else(|| MixError::Config(format!("missing [{section}] {key}")))?;
        match value {
            toml::Value::Float(f) => Ok(*f),
            toml::Value::Integer(i) => Ok(*i as f64),
            toml::Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
                MixError::Config(format!("[{section}] {key} is not a number: '{s}'"))
            }),
            other => Err(MixError::Config(format!(
                "[{section}] {key} is not a number: {other}"
            ))),
        }
    }

    /// System non-synchronous penetration limit as a fraction.
    pub fn nonsync_penetration(&self) -> MixResult<f64> {
        self.get_f64("limits", "nonsync-penetration")
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            table: toml::from_str(DEFAULT_CONFIG).unwrap_or_default(),
            source: None,
        }
    }
}
