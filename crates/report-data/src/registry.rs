//! Name → constructor table for report strategies.
//!
//! Built once at startup and then passed around by shared reference; there is
//! no global registry.

use indexmap::IndexMap;

use report_core::error::{ReportError, Result};
use report_core::models::ReportStrategy;
use tracing::debug;

use crate::aggregator::AverageGdpReport;

/// Builds a fresh strategy instance on every lookup.
pub type ReportConstructor = Box<dyn Fn() -> Box<dyn ReportStrategy> + Send + Sync>;

/// Registered report kinds, listed in registration order.
#[derive(Default)]
pub struct ReportRegistry {
    reports: IndexMap<String, ReportConstructor>,
}

impl ReportRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every report kind shipped with the workspace.
    pub fn with_builtin_reports() -> Self {
        let mut registry = Self::new();
        registry.register_default::<AverageGdpReport>(AverageGdpReport::NAME);
        registry
    }

    /// Register `constructor` under `name`.
    ///
    /// Re-registering a name replaces the previous constructor; the name keeps
    /// its original position in [`list_names`](Self::list_names).
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn ReportStrategy> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("Registering report '{}'", name);
        self.reports.insert(name, Box::new(constructor));
    }

    /// Register a strategy type that can be built with [`Default`].
    pub fn register_default<T>(&mut self, name: impl Into<String>)
    where
        T: ReportStrategy + Default + 'static,
    {
        self.register(name, || Box::new(T::default()) as Box<dyn ReportStrategy>);
    }

    /// Construct a new instance of the report registered as `name`.
    pub fn get(&self, name: &str) -> Result<Box<dyn ReportStrategy>> {
        self.reports
            .get(name)
            .map(|constructor| constructor())
            .ok_or_else(|| ReportError::UnknownReportKind(name.to_string()))
    }

    /// All registered names, in registration order.
    pub fn list_names(&self) -> Vec<&str> {
        self.reports.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.reports.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl std::fmt::Debug for ReportRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportRegistry")
            .field("reports", &self.list_names())
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
