//! Error taxonomy for dashboard orchestration.
//!
//! Failures are recovered at the smallest enclosing scope: a [`CycleError`]
//! skips one refresh cycle of one widget, a widget-scoped [`DashboardError`]
//! is rendered inline without aborting its siblings, and only catalog or
//! definition failures escape to the caller.

use crate::relay::error::RelayError;
use thiserror::Error;

/// Failures scoped to startup, one load attempt, or one widget.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The dashboard catalog could not be fetched. Fatal to startup.
    #[error("dashboard catalog unavailable: {0}")]
    CatalogUnavailable(#[source] RelayError),

    /// One dashboard definition could not be fetched. Fatal to this load
    /// attempt only.
    #[error("dashboard definition '{name}' unavailable: {source}")]
    DefinitionUnavailable {
        name: String,
        #[source]
        source: RelayError,
    },

    /// No implementation registered for a widget's type tag.
    #[error("unknown widget type '{0}'")]
    UnknownWidgetType(String),

    /// Two widgets in one definition share an id. Overwriting the first
    /// instance would orphan its poll handle, so construction fails instead.
    #[error("duplicate widget id '{0}'")]
    DuplicateWidgetId(String),

    /// The widget factory rejected its configuration.
    #[error("widget '{id}' construction failed: {reason}")]
    WidgetConstructionFailed { id: String, reason: String },
}

impl DashboardError {
    /// Whether the failure is scoped to a single widget (rendered inline,
    /// siblings unaffected) rather than the whole load attempt.
    pub fn is_widget_scoped(&self) -> bool {
        matches!(
            self,
            DashboardError::UnknownWidgetType(_)
                | DashboardError::DuplicateWidgetId(_)
                | DashboardError::WidgetConstructionFailed { .. }
        )
    }
}

/// Failures scoped to one aggregation cycle of one widget. The cycle's
/// update is skipped wholesale; the next scheduled tick is the retry.
#[derive(Debug, Error)]
pub enum CycleError {
    /// A source's network fetch failed or returned a non-success status.
    #[error("source fetch failed for '{label}': {source}")]
    SourceFetchFailed {
        label: String,
        #[source]
        source: RelayError,
    },

    /// A source answered with an `error` field in its payload.
    #[error("source '{label}' reported error: {message}")]
    SourceReportedError { label: String, message: String },

    /// A source's payload lacks the configured `dataKey`.
    #[error("data key '{data_key}' not found in response from '{label}'")]
    MissingDataKey { label: String, data_key: String },
}
