mod bootstrap;
mod report;

use anyhow::Result;
use grouper_core::settings::{GrouperConfig, Settings};
use grouper_data::pipeline;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("History Grouper v{} starting", env!("CARGO_PKG_VERSION"));

    let config = GrouperConfig::default();
    let run_report = match pipeline::run(&config) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Run failed: {:?}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    report::write_diagnostics(&mut std::io::stderr().lock(), &run_report.diagnostics)?;
    report::write_summary(&mut std::io::stdout().lock(), &run_report)?;

    tracing::info!("Finished at {}", run_report.generated_at);

    Ok(())
}
