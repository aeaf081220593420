use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backend::BackendKind;
use crate::record::{FieldKind, FieldSpec};

/// Whether the filter scan observes values before or after the UPDATE phase.
///
/// Post-update is canonical: matched size values then reflect the applied
/// increment, which is an intended consequence of phase ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    PreUpdate,
    PostUpdate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct BenchConfig {
    /// JSON array of flat records replayed by every iteration.
    pub dataset_path: PathBuf,
    /// Record counts to benchmark, ascending.
    pub dataset_sizes: Vec<usize>,
    pub backends: Vec<BackendKind>,
    pub table: String,
    /// Keys are this prefix plus the record's ordinal index.
    pub key_prefix: String,
    /// Expected field set, in order; absent source fields are default-filled.
    pub fields: Vec<FieldSpec>,
    /// Numeric field the UPDATE phase increments.
    pub update_field: String,
    pub update_increment: f64,
    /// Filter scan predicate: status == status_equals && size > size_threshold.
    pub status_field: String,
    pub status_equals: i64,
    pub size_field: String,
    pub size_threshold: f64,
    pub query_mode: QueryMode,
    /// Best-effort full flush of backend state after each iteration.
    pub flush_after_run: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/parsed_NASA_access_log.json"),
            dataset_sizes: vec![1000, 10_000, 100_000, 1_000_000],
            backends: vec![BackendKind::Redis, BackendKind::Memcached],
            table: String::from("usertable"),
            key_prefix: String::from("user"),
            fields: default_fields(),
            update_field: String::from("bytes"),
            update_increment: 1000.0,
            status_field: String::from("http_reply_code"),
            status_equals: 200,
            size_field: String::from("bytes"),
            size_threshold: 5000.0,
            query_mode: QueryMode::PostUpdate,
            flush_after_run: true,
        }
    }
}

/// Field schema of the parsed NASA access log.
fn default_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("host", FieldKind::Text),
        FieldSpec::new("timestamp", FieldKind::Text),
        FieldSpec::new("request", FieldKind::Text),
        FieldSpec::new("http_reply_code", FieldKind::Integer),
        FieldSpec::new("bytes", FieldKind::Integer),
    ]
}
