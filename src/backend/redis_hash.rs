//! Redis adapter storing one hash per record key.
//!
//! Field-by-field HSET storage, so partial updates are native merges on the
//! server side.

use std::collections::HashMap;

use async_trait::async_trait;
use log::info;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

use crate::conf::RedisConfig;
use crate::core::BenchError;
use crate::record::NormalizedRecord;

use super::{KvBackend, ReadResult};

pub struct RedisBackend {
    conf: RedisConfig,
    conn: Option<MultiplexedConnection>,
}

impl RedisBackend {
    pub fn new(conf: RedisConfig) -> Self {
        Self { conf, conn: None }
    }

    fn conn(&mut self) -> Result<&mut MultiplexedConnection, BenchError> {
        self.conn
            .as_mut()
            .ok_or_else(|| BenchError::BackendError("redis session not initialized".to_string()))
    }
}

#[async_trait]
impl KvBackend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn init(&mut self) -> Result<(), BenchError> {
        let url = format!("redis://{}:{}", self.conf.host, self.conf.port);
        let client = redis::Client::open(url.as_str())?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("connected to redis at {}:{}", self.conf.host, self.conf.port);
        self.conn = Some(conn);
        Ok(())
    }

    async fn insert(
        &mut self,
        _table: &str,
        key: &str,
        record: &NormalizedRecord,
    ) -> Result<(), BenchError> {
        let pairs: Vec<(String, String)> = record
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let conn = self.conn()?;
        let _: () = conn.hset_multiple(key, &pairs).await?;
        Ok(())
    }

    async fn read(
        &mut self,
        _table: &str,
        key: &str,
        fields: Option<&[String]>,
    ) -> Result<ReadResult, BenchError> {
        let conn = self.conn()?;
        // HGETALL returns an empty map for an absent key.
        let mut result: HashMap<String, String> = conn.hgetall(key).await?;
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
        let pairs: Vec<(String, String)> = fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let conn = self.conn()?;
        let _: () = conn.hset_multiple(key, &pairs).await?;
        Ok(())
    }

    async fn delete(&mut self, _table: &str, key: &str) -> Result<(), BenchError> {
        let conn = self.conn()?;
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), BenchError> {
        let conn = self.conn()?;
        redis::cmd("FLUSHDB").query_async::<()>(conn).await?;
        Ok(())
    }

    async fn cleanup(&mut self) -> Result<(), BenchError> {
        self.conn = None;
        Ok(())
    }
}
