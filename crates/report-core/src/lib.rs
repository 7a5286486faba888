//! Shared building blocks for the macro-report workspace.
//!
//! Holds the data model passed between ingestion, aggregation and rendering,
//! the [`models::ReportStrategy`] capability, the error taxonomy, numeric
//! rounding helpers and the command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{ReportError, Result};
pub use models::{CellValue, ReportStrategy, RowRecord, TabularResult};
