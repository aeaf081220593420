use std::path::Path;

use config::Config as CConfig;
use serde::{Deserialize, Serialize};

use crate::core::BenchError::{self, ConfigParsingError};

use super::{BenchConfig, MemcachedConfig, RedisConfig, ReportConfig};

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub bench: BenchConfig,
    pub report: ReportConfig,
    pub redis: RedisConfig,
    pub memcached: MemcachedConfig,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, BenchError> {
        let config = CConfig::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml))
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Config, BenchError> {
        let toml_str = std::fs::read_to_string(path)
            .map_err(|e| ConfigParsingError(format!("{}: {e}", path.display())))?;
        Self::from_str(&toml_str)
    }
}
