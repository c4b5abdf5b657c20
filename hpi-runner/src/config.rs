//! Run configuration.
//!
//! Defaults describe the published HPI exports, so running without a
//! config file needs no setup. A TOML file may override any subset:
//!
//! ```toml
//! [county]
//! header_offset = 4
//!
//! [county.columns]
//! fips = "FIPS"
//!
//! [state]
//! sheet = "HPI"
//! ```

use std::path::{Path, PathBuf};

use hpi_core::{CountySource, StateSource};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Input layouts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub county: CountySource,
    pub state: StateSource,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
