use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default = "ReportConfig::default_output_path")]
    pub output_path: PathBuf,
}

impl ReportConfig {
    fn default_output_path() -> PathBuf {
        PathBuf::from("results/benchmark.csv")
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: Self::default_output_path(),
        }
    }
}
