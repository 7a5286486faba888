//! Output layer for macro-report.
//!
//! Turns a [`report_core::TabularResult`] into the text written to stdout:
//! a grid table, JSON, or a fixed notice when there is no data.

pub mod table_view;

pub use report_core as core;
