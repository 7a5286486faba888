use std::path::PathBuf;

use report_core::error::Result;
use report_core::models::TabularResult;
use report_core::settings::{OutputFormat, Settings};
use report_data::reader::read_csv_files;
use report_data::registry::ReportRegistry;
use report_ui::table_view;
use tracing::{debug, info};

/// Resolve the report, read every file and generate the result.
///
/// The report name is looked up before any file is read. Returns `None` when
/// the files hold no data rows at all.
pub fn generate_report(
    registry: &ReportRegistry,
    report_name: &str,
    files: &[PathBuf],
) -> Result<Option<TabularResult>> {
    let report = registry.get(report_name)?;
    let rows = read_csv_files(files)?;

    if rows.is_empty() {
        info!("No data to analyse");
        return Ok(None);
    }

    debug!("Generating '{}' report from {} rows", report_name, rows.len());
    Ok(Some(report.generate(&rows)))
}

/// Turn a generated result into the text printed on stdout.
pub fn render_output(result: Option<&TabularResult>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table_view::render(result)),
        OutputFormat::Json => {
            let empty = TabularResult::default();
            table_view::render_json(result.unwrap_or(&empty))
        }
    }
}

/// Run the whole pipeline for `settings`.
pub fn run(settings: &Settings, registry: &ReportRegistry) -> Result<String> {
    let result = generate_report(registry, &settings.report, &settings.files)?;
    render_output(result.as_ref(), settings.format)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
