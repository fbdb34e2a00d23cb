use std::fmt;

use unitils_types::ReflectError;

/// Errors that abort a comparison.
///
/// A mismatch is never an error; it is reported as a `Difference`.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// A value could not be reflected, e.g. a `RefCell` that is mutably
    /// borrowed elsewhere.
    #[error("cannot reflect value at {path}: {source}")]
    Reflect {
        path: String,
        #[source]
        source: ReflectError,
    },

    /// No comparator in the chain accepts the pair.
    #[error("no comparator accepts {left} and {right} at {path}")]
    NoComparator {
        path: String,
        left: &'static str,
        right: &'static str,
    },
}

impl CompareError {
    /// Wrap a reflection failure together with the path where it happened.
    pub fn reflect(path: impl Into<String>, source: ReflectError) -> Self {
        Self::Reflect {
            path: path.into(),
            source,
        }
    }
}

impl PartialEq for CompareError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by display representation for test convenience.
        fmt::format(format_args!("{self}")) == fmt::format(format_args!("{other}"))
    }
}

impl Eq for CompareError {}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
