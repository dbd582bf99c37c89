//! Defines custom error types for the application.

use std::convert::Infallible;
use thiserror::Error;

#[derive(Error, Debug)]
/// Error type returned when a line-range splice fails.
pub enum SpliceError {
    #[error("Invalid line range {start}:{end}: lines are 1-indexed and start must not exceed end.")]
    InvalidRange { start: usize, end: usize },

    #[error("Line range ends at line {end}, but the document only has {line_count} line(s).")]
    RangeOutOfBounds { end: usize, line_count: usize },

    #[error("Both content and a content file were provided (--content/--content-file). Please choose one.")]
    AmbiguousContentSource,

    #[error("Neither content nor a content file was provided (--content/--content-file). Please specify the replacement content.")]
    NoContent,

    #[error("Cannot read both the target document and the replacement content from stdin.")]
    AmbiguousStdinSource,

    #[error("Failed to parse operations: {0}")]
    OperationParse(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<Infallible> for SpliceError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
