//! Benchmark orchestration: timed phases, the client-side filter scan, the
//! CSV result artifact, and the controller sequencing all of it.

mod controller;
mod phase;
mod query;
mod report;

pub use controller::RunController;
pub use phase::{Phase, PhaseRunner, record_key};
pub use query::{QueryEvaluator, QueryOutcome};
pub use report::{BenchmarkResult, RESULT_HEADER, ResultWriter};
