use thiserror::Error;

/// Errors produced while reflecting over a value.
///
/// These are environment or programming errors, never comparison outcomes:
/// the comparator propagates them instead of reporting a difference.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReflectError {
    #[error("value of type {type_name} is already mutably borrowed")]
    BorrowConflict { type_name: &'static str },

    #[error("invalid property path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("unknown property '{property}' on {type_name}")]
    UnknownProperty { property: String, type_name: String },

    #[error("index {index} out of bounds for {type_name} of length {len}")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        type_name: String,
    },

    #[error("value of type {type_name} cannot be indexed with [{index}]")]
    NotIndexable { index: usize, type_name: String },

    #[error("cannot resolve '{property}': the value holding it is null")]
    NullInPath { property: String },
}

/// Convenience alias for reflection results.
pub type ReflectResult<T> = Result<T, ReflectError>;
