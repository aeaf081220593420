//! Suite sequencing.

use log::{error, info, warn};

use crate::backend::{KvBackend, create_backend};
use crate::conf::{Config, QueryMode};
use crate::core::BenchError;
use crate::dataset::load_dataset;
use crate::record::Normalizer;

use super::phase::{Phase, PhaseRunner};
use super::query::QueryEvaluator;
use super::report::BenchmarkResult;

/// Runs every backend x dataset-size combination, strictly in sequence so
/// backends never interfere with each other's timings.
pub struct RunController {
    config: Config,
}

impl RunController {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the whole suite and returns results in run order.
    ///
    /// An unreachable backend skips its iteration and the suite continues;
    /// only an unreadable dataset fails the run as a whole. The session is
    /// cleaned up after every iteration, including failed ones.
    pub async fn run(&self) -> Result<Vec<BenchmarkResult>, BenchError> {
        let normalizer = Normalizer::new(self.config.bench.fields.clone());
        let runner = PhaseRunner::new(&self.config.bench);
        let evaluator = QueryEvaluator::new(&self.config.bench);
        let mut results = Vec::new();

        for &kind in &self.config.bench.backends {
            for &size in &self.config.bench.dataset_sizes {
                let mut backend = create_backend(kind, &self.config);
                let name = backend.name();
                info!("starting {} with dataset size {}", name, size);

                if let Err(e) = backend.init().await {
                    error!("{} init failed, skipping size {}: {}", name, size, e);
                    continue;
                }

                let outcome = self
                    .run_iteration(backend.as_mut(), &runner, &evaluator, &normalizer, size, &mut results)
                    .await;

                if self.config.bench.flush_after_run {
                    if let Err(e) = backend.flush().await {
                        warn!("{} flush failed (ignored): {}", name, e);
                    }
                }
                if let Err(e) = backend.cleanup().await {
                    warn!("{} cleanup failed (ignored): {}", name, e);
                }

                match outcome {
                    Ok(()) => {}
                    Err(e @ BenchError::DatasetError(_)) => return Err(e),
                    Err(e) => {
                        error!("{} size {} aborted: {}", name, size, e);
                    }
                }
            }
        }
        Ok(results)
    }

    /// One backend x size iteration: load, then the fixed phase order
    /// INSERT, READ, UPDATE, CUSTOM_QUERY, DELETE (query and update swap
    /// under [`QueryMode::PreUpdate`]).
    async fn run_iteration(
        &self,
        backend: &mut dyn KvBackend,
        runner: &PhaseRunner,
        evaluator: &QueryEvaluator,
        normalizer: &Normalizer,
        size: usize,
        results: &mut Vec<BenchmarkResult>,
    ) -> Result<(), BenchError> {
        let dataset = load_dataset(&self.config.bench.dataset_path, size, normalizer)?;
        let count = dataset.len();
        let name = backend.name().to_string();

        let elapsed = runner.insert(backend, &dataset).await?;
        self.record(results, &name, size, Phase::Insert, elapsed);

        let elapsed = runner.read(backend, count).await?;
        self.record(results, &name, size, Phase::Read, elapsed);

        match self.config.bench.query_mode {
            QueryMode::PostUpdate => {
                let elapsed = runner.update(backend, count).await?;
                self.record(results, &name, size, Phase::Update, elapsed);
                let outcome = evaluator.run(backend, count).await?;
                self.record(results, &name, size, Phase::CustomQuery, outcome.elapsed);
            }
            QueryMode::PreUpdate => {
                let outcome = evaluator.run(backend, count).await?;
                self.record(results, &name, size, Phase::CustomQuery, outcome.elapsed);
                let elapsed = runner.update(backend, count).await?;
                self.record(results, &name, size, Phase::Update, elapsed);
            }
        }

        let elapsed = runner.delete(backend, count).await?;
        self.record(results, &name, size, Phase::Delete, elapsed);
        Ok(())
    }

    fn record(
        &self,
        results: &mut Vec<BenchmarkResult>,
        backend: &str,
        size: usize,
        phase: Phase,
        elapsed: std::time::Duration,
    ) {
        info!(
            "{} size {} {} took {} ms",
            backend,
            size,
            phase.name(),
            elapsed.as_millis()
        );
        results.push(BenchmarkResult {
            backend: backend.to_string(),
            dataset_size: size,
            operation: phase.name().to_string(),
            elapsed_ms: elapsed.as_millis(),
        });
    }
}
