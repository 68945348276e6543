//! Object invocation errors.

use thiserror::Error;

/// An operation could not be invoked on an object instance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObjectError {
    #[error("object '{object}' has no operation '{name}'")]
    UnknownOperation { object: String, name: String },

    #[error("operation '{name}' takes {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("operation '{name}' failed: {message}")]
    Failed { name: String, message: String },
}

/// Result type for object operations.
pub type ObjectResult<T> = Result<T, ObjectError>;
