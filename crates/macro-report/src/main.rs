mod bootstrap;
mod pipeline;

use std::process::ExitCode;

use report_core::settings::Settings;
use report_data::registry::ReportRegistry;

fn main() -> ExitCode {
    let registry = ReportRegistry::with_builtin_reports();
    let settings = Settings::parse_for_reports(registry.list_names());

    if let Err(e) = bootstrap::setup_logging(&settings.log_level) {
        eprintln!("Failed to initialise logging: {e}");
    }

    tracing::debug!("macro-report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Report: {}, Files: {}, Format: {:?}",
        settings.report,
        settings.files.len(),
        settings.format
    );

    match pipeline::run(&settings, &registry) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
