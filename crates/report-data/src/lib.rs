//! Data layer for macro-report.
//!
//! Responsible for reading CSV input into row records, the aggregation
//! strategies that turn those records into tables, and the registry that
//! maps report names to strategies.

pub mod aggregator;
pub mod reader;
pub mod registry;

pub use report_core as core;
