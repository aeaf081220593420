//! Timed operation phases.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::backend::KvBackend;
use crate::conf::BenchConfig;
use crate::core::BenchError;
use crate::record::{NormalizedRecord, float_value_or};

/// One timed category of operation applied to the full dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Insert,
    Read,
    Update,
    CustomQuery,
    Delete,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Insert => "INSERT",
            Phase::Read => "READ",
            Phase::Update => "UPDATE",
            Phase::CustomQuery => "CUSTOM_QUERY",
            Phase::Delete => "DELETE",
        }
    }
}

/// Key for the record at ordinal `index`. Deterministic, so every phase of
/// one iteration addresses exactly the rows INSERT created.
pub fn record_key(prefix: &str, index: usize) -> String {
    format!("{prefix}{index}")
}

/// Drives one adapter operation per record over the full dataset, measuring
/// wall-clock time from the first call to the last return. Dataset loading
/// and session setup are outside every measurement.
///
/// Per-record conditions (absent rows, unparseable values) are defaulted and
/// never fail a phase; only adapter errors do, and those unwind to the
/// controller.
pub struct PhaseRunner {
    table: String,
    key_prefix: String,
    update_field: String,
    update_increment: f64,
}

impl PhaseRunner {
    pub fn new(conf: &BenchConfig) -> Self {
        Self {
            table: conf.table.clone(),
            key_prefix: conf.key_prefix.clone(),
            update_field: conf.update_field.clone(),
            update_increment: conf.update_increment,
        }
    }

    pub async fn insert(
        &self,
        backend: &mut dyn KvBackend,
        dataset: &[NormalizedRecord],
    ) -> Result<Duration, BenchError> {
        let start = Instant::now();
        for (index, record) in dataset.iter().enumerate() {
            let key = record_key(&self.key_prefix, index);
            backend.insert(&self.table, &key, record).await?;
        }
        Ok(start.elapsed())
    }

    pub async fn read(
        &self,
        backend: &mut dyn KvBackend,
        count: usize,
    ) -> Result<Duration, BenchError> {
        let start = Instant::now();
        for index in 0..count {
            let key = record_key(&self.key_prefix, index);
            backend.read(&self.table, &key, None).await?;
        }
        Ok(start.elapsed())
    }

    /// Read, add the configured increment to the target field, write back
    /// only that field. The read and write are separate adapter calls; the
    /// contract assumes no atomicity between them.
    pub async fn update(
        &self,
        backend: &mut dyn KvBackend,
        count: usize,
    ) -> Result<Duration, BenchError> {
        let start = Instant::now();
        for index in 0..count {
            let key = record_key(&self.key_prefix, index);
            let current = backend.read(&self.table, &key, None).await?;
            // Unparseable or absent values floor at 0.0, so one bad record
            // never aborts the phase.
            let value = float_value_or(&current, &self.update_field, 0.0) + self.update_increment;
            let mut fields = HashMap::new();
            fields.insert(self.update_field.clone(), value.to_string());
            backend.update(&self.table, &key, &fields).await?;
        }
        Ok(start.elapsed())
    }

    pub async fn delete(
        &self,
        backend: &mut dyn KvBackend,
        count: usize,
    ) -> Result<Duration, BenchError> {
        let start = Instant::now();
        for index in 0..count {
            let key = record_key(&self.key_prefix, index);
            backend.delete(&self.table, &key).await?;
        }
        Ok(start.elapsed())
    }
}
