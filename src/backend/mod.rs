//! Pluggable key-value backend adapters.
//!
//! The harness is written purely against [`KvBackend`]; each store satisfies
//! the same capability set and picks its own storage strategy (Redis keeps a
//! hash per key, Memcached a serialized blob, the in-memory backend a plain
//! map). Backend selection is a compile-time registry over [`BackendKind`].

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::conf::Config;
use crate::core::BenchError;
use crate::record::NormalizedRecord;

mod memcached;
mod memory;
mod redis_hash;

pub use memcached::MemcachedBackend;
pub use memory::MemoryBackend;
pub use redis_hash::RedisBackend;

/// Field map returned by a read. An absent key yields an empty map, never an
/// error; callers treat empty results as default-filled input.
pub type ReadResult = HashMap<String, String>;

#[async_trait]
pub trait KvBackend: Send {
    fn name(&self) -> &'static str;

    /// Establishes the session. Failure aborts the whole backend x size
    /// iteration it was created for.
    async fn init(&mut self) -> Result<(), BenchError>;

    /// Stores the record under `key`, replacing any previous value.
    async fn insert(
        &mut self,
        table: &str,
        key: &str,
        record: &NormalizedRecord,
    ) -> Result<(), BenchError>;

    /// Reads the fields stored under `key`; `fields = None` reads all of
    /// them.
    async fn read(
        &mut self,
        table: &str,
        key: &str,
        fields: Option<&[String]>,
    ) -> Result<ReadResult, BenchError>;

    /// Merges `fields` into the stored record; fields not named keep their
    /// current value. Not atomic with any preceding read.
    async fn update(
        &mut self,
        table: &str,
        key: &str,
        fields: &HashMap<String, String>,
    ) -> Result<(), BenchError>;

    /// Removes `key`. Deleting an absent key is not an error.
    async fn delete(&mut self, table: &str, key: &str) -> Result<(), BenchError>;

    /// Clears all stored state. Invoked best-effort between runs.
    async fn flush(&mut self) -> Result<(), BenchError>;

    /// Releases the session. Always invoked, including on failure paths.
    async fn cleanup(&mut self) -> Result<(), BenchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Redis,
    Memcached,
    Memory,
}

/// Compile-time registry mapping a backend identifier to its adapter.
pub fn create_backend(kind: BackendKind, config: &Config) -> Box<dyn KvBackend> {
    match kind {
        BackendKind::Redis => Box::new(RedisBackend::new(config.redis.clone())),
        BackendKind::Memcached => Box::new(MemcachedBackend::new(config.memcached.clone())),
        BackendKind::Memory => Box::new(MemoryBackend::new()),
    }
}
