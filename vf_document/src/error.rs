use thiserror::Error;

/// Errors surfaced by document operations. All of these are recoverable;
/// callers present a message and keep the current document as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invariant violated: {0}")]
    Invariant(String),
    #[error("index {index} out of range for list of length {len}")]
    Range { index: usize, len: usize },
}
