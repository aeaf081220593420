use std::path::Path;

use clap::Parser;
use log::info;

use kvbench::bench::{ResultWriter, RunController};
use kvbench::conf::Config;
use kvbench::core::{CliArgs, setup_logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    let args = CliArgs::parse();
    info!(args; "kvbench started");

    let mut config = match &args.config {
        Some(path) => Config::from_path(Path::new(path))?,
        None => Config::default(),
    };
    if let Some(output) = &args.output {
        config.report.output_path = output.clone();
    }

    let output_path = config.report.output_path.clone();
    let results = RunController::new(config).run().await?;

    let mut writer = ResultWriter::create(&output_path)?;
    writer.write_header()?;
    for result in &results {
        writer.write_record(result)?;
    }
    writer.close()?;
    info!(
        "wrote {} result rows to {}",
        results.len(),
        output_path.display()
    );
    Ok(())
}
