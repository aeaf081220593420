mod backend;
mod bench;
mod config;
mod report;

pub use backend::{MemcachedConfig, RedisConfig};
pub use bench::{BenchConfig, QueryMode};
pub use config::Config;
pub use report::ReportConfig;
