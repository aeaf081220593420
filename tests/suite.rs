//! End-to-end suite runs over the in-memory backend.

use std::fs;

use tempfile::TempDir;

use kvbench::bench::{RESULT_HEADER, ResultWriter, RunController};
use kvbench::testutil::{sample_log_records, test_config, write_dataset};

#[tokio::test]
async fn suite_produces_a_complete_csv_artifact() {
    let temp = TempDir::new().unwrap();
    let dataset = write_dataset(temp.path(), &sample_log_records());
    let config = test_config(&dataset, &[2, 3]);

    let results = RunController::new(config).run().await.unwrap();

    let report_path = temp.path().join("results.csv");
    let mut writer = ResultWriter::create(&report_path).unwrap();
    writer.write_header().unwrap();
    for result in &results {
        writer.write_record(result).unwrap();
    }
    writer.close().unwrap();

    let content = fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], RESULT_HEADER);
    // 2 sizes x 5 phases, plus the header.
    assert_eq!(lines.len(), 11);

    for line in &lines[1..] {
        let columns: Vec<&str> = line.split(", ").collect();
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0], "memory");
        // elapsed must always be a non-negative number
        assert!(columns[3].parse::<u128>().is_ok());
    }

    // sizes appear in ascending run order
    assert!(lines[1].contains(", 2, "));
    assert!(lines[6].contains(", 3, "));
}

#[tokio::test]
async fn every_operation_is_recorded_exactly_once_per_size() {
    let temp = TempDir::new().unwrap();
    let dataset = write_dataset(temp.path(), &sample_log_records());
    let config = test_config(&dataset, &[1, 2, 3]);

    let results = RunController::new(config).run().await.unwrap();

    for size in [1usize, 2, 3] {
        for op in ["INSERT", "READ", "UPDATE", "CUSTOM_QUERY", "DELETE"] {
            let count = results
                .iter()
                .filter(|r| r.dataset_size == size && r.operation == op)
                .count();
            assert_eq!(count, 1, "expected one {op} row for size {size}");
        }
    }
}
