use clap::builder::PossibleValuesParser;
use clap::{CommandFactory, FromArgMatches, Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

// ── OutputFormat ───────────────────────────────────────────────────────────────

/// How the generated report is written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Boxed grid table
    Table,
    /// Pretty-printed JSON with `headers` and `rows`
    Json,
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Analyse macroeconomic data from CSV files and print a report
#[derive(Parser, Debug, Clone)]
#[command(
    name = "macro-report",
    about = "Analyse macroeconomic data from CSV files and print a report",
    version
)]
pub struct Settings {
    /// Paths to CSV files, separated by spaces
    #[arg(long, required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Report type to generate
    #[arg(long)]
    pub report: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Build the clap command with `--report` restricted to `report_names`.
    ///
    /// Report names come from the registry at runtime, so an unknown name is
    /// rejected here, before any file is touched.
    pub fn command_for_reports<I, S>(report_names: I) -> clap::Command
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = report_names.into_iter().map(Into::into).collect();
        Settings::command().mut_arg("report", |arg| {
            arg.value_parser(PossibleValuesParser::new(names))
        })
    }

    /// Parse the process arguments, exiting with a usage message on error.
    pub fn parse_for_reports<I, S>(report_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match Self::try_parse_for_reports_from(report_names, std::env::args_os()) {
            Ok(settings) => settings,
            Err(e) => e.exit(),
        }
    }

    /// Same as [`parse_for_reports`](Self::parse_for_reports) but with an
    /// explicit argument list and no process exit.
    pub fn try_parse_for_reports_from<I, S, A, T>(
        report_names: I,
        args: A,
    ) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        A: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command_for_reports(report_names).try_get_matches_from(args)?;
        let settings = Settings::from_arg_matches(&matches)?;
        Ok(settings.resolve_log_level())
    }

    /// `--debug` overrides the log level.
    fn resolve_log_level(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
