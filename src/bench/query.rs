//! Client-side filter scan.
//!
//! Key-value stores have no native query layer, so the scan re-reads every
//! record through the adapter and applies the predicate on the client. The
//! scan never mutates stored records.

use std::time::{Duration, Instant};

use log::info;

use crate::backend::KvBackend;
use crate::conf::BenchConfig;
use crate::core::BenchError;
use crate::record::{float_value_or, int_value_or};

use super::phase::record_key;

/// Matches records whose status field equals `status_equals` and whose size
/// field exceeds `size_threshold`. Absent and unparseable values default to
/// 0 / 0.0 before the comparison, same as everywhere else.
pub struct QueryEvaluator {
    table: String,
    key_prefix: String,
    status_field: String,
    status_equals: i64,
    size_field: String,
    size_threshold: f64,
}

#[derive(Debug)]
pub struct QueryOutcome {
    pub matched_keys: Vec<String>,
    pub elapsed: Duration,
}

impl QueryEvaluator {
    pub fn new(conf: &BenchConfig) -> Self {
        Self {
            table: conf.table.clone(),
            key_prefix: conf.key_prefix.clone(),
            status_field: conf.status_field.clone(),
            status_equals: conf.status_equals,
            size_field: conf.size_field.clone(),
            size_threshold: conf.size_threshold,
        }
    }

    pub async fn run(
        &self,
        backend: &mut dyn KvBackend,
        count: usize,
    ) -> Result<QueryOutcome, BenchError> {
        let start = Instant::now();
        let mut matched_keys = Vec::new();
        for index in 0..count {
            let key = record_key(&self.key_prefix, index);
            let fields = backend.read(&self.table, &key, None).await?;
            let status = int_value_or(&fields, &self.status_field, 0);
            let size = float_value_or(&fields, &self.size_field, 0.0);
            if status == self.status_equals && size > self.size_threshold {
                matched_keys.push(key);
            }
        }
        let elapsed = start.elapsed();
        info!(
            "filter scan on {} matched {} of {} records",
            backend.name(),
            matched_keys.len(),
            count
        );
        Ok(QueryOutcome {
            matched_keys,
            elapsed,
        })
    }
}
