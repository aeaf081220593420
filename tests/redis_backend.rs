//! End-to-end suite run against a containerized Redis.
//!
//! Requires a running Docker daemon; execute with `cargo test -- --ignored`.

use tempfile::TempDir;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::redis::{REDIS_PORT, Redis};

use kvbench::backend::BackendKind;
use kvbench::bench::RunController;
use kvbench::testutil::{sample_log_records, test_config, write_dataset};

#[tokio::test]
#[ignore = "requires docker"]
async fn redis_suite_end_to_end() {
    let container = Redis::default().start().await.unwrap();
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(REDIS_PORT).await.unwrap();

    let temp = TempDir::new().unwrap();
    let dataset = write_dataset(temp.path(), &sample_log_records());

    let mut config = test_config(&dataset, &[3]);
    config.bench.backends = vec![BackendKind::Redis];
    config.redis.host = host.to_string();
    config.redis.port = port;

    let results = RunController::new(config).run().await.unwrap();

    assert_eq!(results.len(), 5);
    let ops: Vec<&str> = results.iter().map(|r| r.operation.as_str()).collect();
    assert_eq!(ops, vec!["INSERT", "READ", "UPDATE", "CUSTOM_QUERY", "DELETE"]);
    assert!(results.iter().all(|r| r.backend == "redis"));

    drop(container);
}
