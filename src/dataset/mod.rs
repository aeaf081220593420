//! Dataset loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;

use crate::core::BenchError;
use crate::record::{NormalizedRecord, Normalizer, RawRecord};

/// Loads at most `limit` records from a JSON array file, normalized in
/// source order. An unreadable or malformed source is fatal.
pub fn load_dataset(
    path: &Path,
    limit: usize,
    normalizer: &Normalizer,
) -> Result<Vec<NormalizedRecord>, BenchError> {
    let file = File::open(path)
        .map_err(|e| BenchError::DatasetError(format!("cannot open {}: {e}", path.display())))?;
    let raw: Vec<RawRecord> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| BenchError::DatasetError(format!("cannot parse {}: {e}", path.display())))?;

    let available = raw.len();
    let records: Vec<NormalizedRecord> = raw
        .iter()
        .take(limit)
        .map(|r| normalizer.normalize(r))
        .collect();

    info!(
        "loaded {} of {} records from {}",
        records.len(),
        available,
        path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::record::{FieldKind, FieldSpec};
    use crate::testutil::{sample_log_records, write_dataset};

    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(vec![
            FieldSpec::new("host", FieldKind::Text),
            FieldSpec::new("http_reply_code", FieldKind::Integer),
            FieldSpec::new("bytes", FieldKind::Integer),
        ])
    }

    #[test]
    fn test_load_truncates_to_limit_in_source_order() {
        let temp = TempDir::new().unwrap();
        let path = write_dataset(temp.path(), &sample_log_records());

        let records = load_dataset(&path, 2, &normalizer()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("bytes"), Some("6000"));
        assert_eq!(records[1].get("bytes"), Some("100"));
    }

    #[test]
    fn test_load_caps_at_available_records() {
        let temp = TempDir::new().unwrap();
        let path = write_dataset(temp.path(), &sample_log_records());

        let records = load_dataset(&path, 1000, &normalizer()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = load_dataset(Path::new("/no/such/dataset.json"), 10, &normalizer());
        assert!(matches!(result, Err(BenchError::DatasetError(_))));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        let result = load_dataset(&path, 10, &normalizer());
        assert!(matches!(result, Err(BenchError::DatasetError(_))));
    }
}
