//! Memcached adapter storing one JSON blob per record key.
//!
//! Memcached has no server-side field access, so the whole field map is
//! serialized into a single value and merges happen client-side.

use std::collections::HashMap;

use async_trait::async_trait;
use log::info;

use crate::conf::MemcachedConfig;
use crate::core::BenchError;
use crate::record::NormalizedRecord;

use super::{KvBackend, ReadResult};

pub struct MemcachedBackend {
    conf: MemcachedConfig,
    client: Option<memcache::Client>,
}

impl MemcachedBackend {
    pub fn new(conf: MemcachedConfig) -> Self {
        Self { conf, client: None }
    }

    fn client(&self) -> Result<&memcache::Client, BenchError> {
        self.client.as_ref().ok_or_else(|| {
            BenchError::BackendError("memcached session not initialized".to_string())
        })
    }

    fn read_map(&self, key: &str) -> Result<HashMap<String, String>, BenchError> {
        let blob: Option<String> = self.client()?.get(key)?;
        match blob {
            None => Ok(HashMap::new()),
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                BenchError::BackendError(format!("corrupt record under '{key}': {e}"))
            }),
        }
    }

    fn write_map(&self, key: &str, map: &HashMap<String, String>) -> Result<(), BenchError> {
        let json = serde_json::to_string(map)
            .map_err(|e| BenchError::BackendError(e.to_string()))?;
        self.client()?.set(key, json.as_str(), 0)?;
        Ok(())
    }
}

#[async_trait]
impl KvBackend for MemcachedBackend {
    fn name(&self) -> &'static str {
        "memcached"
    }

    async fn init(&mut self) -> Result<(), BenchError> {
        let url = format!("memcache://{}:{}", self.conf.host, self.conf.port);
        let client = memcache::Client::connect(url.as_str())?;
        // Force a round trip so unreachable servers fail here, not mid-phase.
        client.version()?;
        info!(
            "connected to memcached at {}:{}",
            self.conf.host, self.conf.port
        );
        self.client = Some(client);
        Ok(())
    }

    async fn insert(
        &mut self,
        _table: &str,
        key: &str,
        record: &NormalizedRecord,
    ) -> Result<(), BenchError> {
        self.write_map(key, &record.to_map())
    }

    async fn read(
        &mut self,
        _table: &str,
        key: &str,
        fields: Option<&[String]>,
    ) -> Result<ReadResult, BenchError> {
        let mut result = self.read_map(key)?;
        if let Some(wanted) = fields {
            result.retain(|name, _| wanted.iter().any(|w| w == name));
        }
        Ok(result)
    }

    async fn update(
        &mut self,
        _table: &str,
        key: &str,
        fields: &HashMap<String, String>,
    ) -> Result<(), BenchError> {
        let mut current = self.read_map(key)?;
        for (name, value) in fields {
            current.insert(name.clone(), value.clone());
        }
        self.write_map(key, &current)
    }

    async fn delete(&mut self, _table: &str, key: &str) -> Result<(), BenchError> {
        // Returns false for an absent key, which is not an error here.
        self.client()?.delete(key)?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), BenchError> {
        self.client()?.flush()?;
        Ok(())
    }

    async fn cleanup(&mut self) -> Result<(), BenchError> {
        self.client = None;
        Ok(())
    }
}
