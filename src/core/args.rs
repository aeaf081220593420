use std::path::PathBuf;

use clap::Parser;
use log::kv::{ToValue, Value};

#[derive(Parser, Debug, PartialEq)]
#[command(version, about)]
pub struct CliArgs {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overrides the report output path from the config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ToValue for CliArgs {
    fn to_value(&self) -> Value<'_> {
        Value::from_debug(self)
    }
}
