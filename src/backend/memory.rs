//! In-process backend used as a latency baseline and as the test double.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::BenchError;
use crate::record::NormalizedRecord;

use super::{KvBackend, ReadResult};

type Table = HashMap<String, HashMap<String, String>>;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: HashMap<String, Table>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn init(&mut self) -> Result<(), BenchError> {
        Ok(())
    }

    async fn insert(
        &mut self,
        table: &str,
        key: &str,
        record: &NormalizedRecord,
    ) -> Result<(), BenchError> {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), record.to_map());
        Ok(())
    }

    async fn read(
        &mut self,
        table: &str,
        key: &str,
        fields: Option<&[String]>,
    ) -> Result<ReadResult, BenchError> {
        let mut result = self
            .tables
            .get(table)
            .and_then(|t| t.get(key))
            .cloned()
            .unwrap_or_default();
        if let Some(wanted) = fields {
            result.retain(|name, _| wanted.iter().any(|w| w == name));
        }
        Ok(result)
    }

    async fn update(
        &mut self,
        table: &str,
        key: &str,
        fields: &HashMap<String, String>,
    ) -> Result<(), BenchError> {
        let row = self
            .tables
            .entry(table.to_string())
            .or_default()
            .entry(key.to_string())
            .or_default();
        for (name, value) in fields {
            row.insert(name.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&mut self, table: &str, key: &str) -> Result<(), BenchError> {
        if let Some(t) = self.tables.get_mut(table) {
            t.remove(key);
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), BenchError> {
        self.tables.clear();
        Ok(())
    }

    async fn cleanup(&mut self) -> Result<(), BenchError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::record::{FieldKind, FieldSpec, Normalizer};
    use crate::testutil::raw_record;

    use super::*;

    fn record(status: i64, bytes: i64) -> NormalizedRecord {
        let normalizer = Normalizer::new(vec![
            FieldSpec::new("http_reply_code", FieldKind::Integer),
            FieldSpec::new("bytes", FieldKind::Integer),
        ]);
        normalizer.normalize(&raw_record(&[
            ("http_reply_code", json!(status)),
            ("bytes", json!(bytes)),
        ]))
    }

    #[tokio::test]
    async fn test_insert_then_read_roundtrip() {
        let mut backend = MemoryBackend::new();
        let rec = record(200, 6000);
        backend.insert("t", "user0", &rec).await.unwrap();

        let result = backend.read("t", "user0", None).await.unwrap();
        assert_eq!(result, rec.to_map());
    }

    #[tokio::test]
    async fn test_read_absent_key_is_empty_not_error() {
        let mut backend = MemoryBackend::new();
        let result = backend.read("t", "nope", None).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_read_with_requested_fields_filters() {
        let mut backend = MemoryBackend::new();
        backend.insert("t", "user0", &record(200, 6000)).await.unwrap();

        let wanted = vec!["bytes".to_string()];
        let result = backend.read("t", "user0", Some(&wanted)).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("bytes").map(String::as_str), Some("6000"));
    }

    #[tokio::test]
    async fn test_update_merges_only_named_fields() {
        let mut backend = MemoryBackend::new();
        backend.insert("t", "user0", &record(200, 6000)).await.unwrap();

        let mut patch = HashMap::new();
        patch.insert("bytes".to_string(), "7000".to_string());
        backend.update("t", "user0", &patch).await.unwrap();

        let result = backend.read("t", "user0", None).await.unwrap();
        assert_eq!(result.get("bytes").map(String::as_str), Some("7000"));
        assert_eq!(
            result.get("http_reply_code").map(String::as_str),
            Some("200")
        );
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_not_an_error() {
        let mut backend = MemoryBackend::new();
        backend.delete("t", "nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_then_read_is_empty() {
        let mut backend = MemoryBackend::new();
        backend.insert("t", "user0", &record(200, 6000)).await.unwrap();
        backend.delete("t", "user0").await.unwrap();
        let result = backend.read("t", "user0", None).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_flush_clears_everything() {
        let mut backend = MemoryBackend::new();
        backend.insert("a", "user0", &record(200, 6000)).await.unwrap();
        backend.insert("b", "user0", &record(404, 100)).await.unwrap();
        backend.flush().await.unwrap();
        assert!(backend.read("a", "user0", None).await.unwrap().is_empty());
        assert!(backend.read("b", "user0", None).await.unwrap().is_empty());
    }
}
