//! Test fixtures.
//!
//! Available to integration tests through the `testutil` feature.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::backend::BackendKind;
use crate::conf::Config;
use crate::record::RawRecord;

/// Builds a raw dataset record from field name/value pairs.
pub fn raw_record(pairs: &[(&str, Value)]) -> RawRecord {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// Three access-log records exercising both predicate branches: after the
/// +1000 update only the first passes `status == 200 && size > 5000`.
pub fn sample_log_records() -> Vec<RawRecord> {
    vec![
        raw_record(&[
            ("host", json!("alpha.example.com")),
            ("timestamp", json!("01/Jul/1995:00:00:01 -0400")),
            ("request", json!("GET /history/apollo/ HTTP/1.0")),
            ("http_reply_code", json!(200)),
            ("bytes", json!(6000)),
        ]),
        raw_record(&[
            ("host", json!("beta.example.com")),
            ("timestamp", json!("01/Jul/1995:00:00:06 -0400")),
            ("request", json!("GET /shuttle/countdown/ HTTP/1.0")),
            ("http_reply_code", json!(200)),
            ("bytes", json!(100)),
        ]),
        raw_record(&[
            ("host", json!("gamma.example.com")),
            ("timestamp", json!("01/Jul/1995:00:00:09 -0400")),
            ("request", json!("GET /images/NASA-logosmall.gif HTTP/1.0")),
            ("http_reply_code", json!(500)),
            ("bytes", json!(9000)),
        ]),
    ]
}

/// Writes `records` as a JSON array dataset file under `dir`.
pub fn write_dataset(dir: &Path, records: &[RawRecord]) -> PathBuf {
    let path = dir.join("dataset.json");
    let json = serde_json::to_string_pretty(records).unwrap();
    fs::write(&path, json).unwrap();
    path
}

/// Config running only the in-memory backend over `dataset_path`.
pub fn test_config(dataset_path: &Path, sizes: &[usize]) -> Config {
    let mut config = Config::default();
    config.bench.dataset_path = dataset_path.to_path_buf();
    config.bench.dataset_sizes = sizes.to_vec();
    config.bench.backends = vec![BackendKind::Memory];
    config
}
