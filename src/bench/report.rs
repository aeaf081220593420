//! CSV result artifact.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::BenchError;

/// One phase measurement. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub backend: String,
    pub dataset_size: usize,
    pub operation: String,
    pub elapsed_ms: u128,
}

pub const RESULT_HEADER: &str = "Database, Dataset Size, Operation, Time (ms)";

/// Append-only writer for the result table. No deduplication, no
/// reordering; rows land in the order they are written.
pub struct ResultWriter {
    out: BufWriter<File>,
}

impl ResultWriter {
    /// Creates the artifact, including its parent directory.
    pub fn create(path: &Path) -> Result<Self, BenchError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| BenchError::IoError(format!("{}: {e}", parent.display())))?;
            }
        }
        let file = File::create(path)
            .map_err(|e| BenchError::IoError(format!("{}: {e}", path.display())))?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    pub fn write_header(&mut self) -> Result<(), BenchError> {
        writeln!(self.out, "{RESULT_HEADER}")?;
        Ok(())
    }

    pub fn write_record(&mut self, result: &BenchmarkResult) -> Result<(), BenchError> {
        writeln!(
            self.out,
            "{}, {}, {}, {}",
            result.backend, result.dataset_size, result.operation, result.elapsed_ms
        )?;
        Ok(())
    }

    pub fn close(mut self) -> Result<(), BenchError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn result(operation: &str, elapsed_ms: u128) -> BenchmarkResult {
        BenchmarkResult {
            backend: "redis".to_string(),
            dataset_size: 1000,
            operation: operation.to_string(),
            elapsed_ms,
        }
    }

    #[test]
    fn test_written_file_has_header_and_rows_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.csv");

        let mut writer = ResultWriter::create(&path).unwrap();
        writer.write_header().unwrap();
        writer.write_record(&result("INSERT", 12)).unwrap();
        writer.write_record(&result("READ", 7)).unwrap();
        writer.close().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Database, Dataset Size, Operation, Time (ms)\n\
             redis, 1000, INSERT, 12\n\
             redis, 1000, READ, 7\n"
        );
    }

    #[test]
    fn test_create_makes_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deep/nested/results.csv");
        let writer = ResultWriter::create(&path).unwrap();
        writer.close().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_create_fails_on_unwritable_path() {
        let result = ResultWriter::create(Path::new("/proc/kvbench/results.csv"));
        assert!(matches!(result, Err(BenchError::IoError(_))));
    }
}
