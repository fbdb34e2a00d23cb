//! Error types for the report crate.

use unitils_types::ReflectError;

/// Errors that can occur while building a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A formatter style name that is neither `default` nor `tree`.
    #[error("unknown formatter style '{0}' (expected 'default' or 'tree')")]
    UnknownStyle(String),

    /// A value could not be captured for display.
    #[error("cannot format value: {0}")]
    Reflect(#[from] ReflectError),
}

/// Convenience alias for report results.
pub type ReportResult<T> = Result<T, ReportError>;
