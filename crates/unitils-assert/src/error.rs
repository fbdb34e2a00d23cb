use std::path::PathBuf;

use thiserror::Error;
use unitils_compare::CompareError;
use unitils_types::ReflectError;

#[derive(Debug, Error)]
pub enum AssertError {
    /// The values differ; the payload is the full report.
    #[error("{0}")]
    Mismatch(String),

    #[error("property '{path}' of {target}: {source}")]
    Property {
        path: String,
        target: String,
        #[source]
        source: ReflectError,
    },

    #[error("{}property '{property}' of {target} is null", prefix(.message))]
    NullProperty {
        property: String,
        target: String,
        message: Option<String>,
    },

    #[error("expected an object with properties, got {0}")]
    NotAnObject(String),

    #[error("expected a collection of objects, got {0}")]
    NotACollection(String),

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error("cannot format values: {0}")]
    Report(#[from] unitils_report::ReportError),

    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type AssertResult<T> = Result<T, AssertError>;

fn prefix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!("{m}\n"))
        .unwrap_or_default()
}
