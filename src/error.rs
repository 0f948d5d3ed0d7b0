//! Error types for zero2pypi
//!
//! Defines an error enum covering the failure modes of a conversion run.
//! Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for zero2pypi operations
pub type Result<T> = std::result::Result<T, Zero2PypiError>;

/// Error type for zero2pypi operations
#[derive(Error, Debug)]
pub enum Zero2PypiError {
    /// XML parsing errors (malformed document, bad attributes)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Feed carries neither a root `uri` attribute nor a `feed-for` element
    #[error("Feed {} has no uri attribute and no feed-for element", .0.display())]
    MissingIdentifier(PathBuf),

    /// Structural expectations the converter cannot work without
    /// (a feed with no group, or a group with no implementation)
    #[error("Feed structure error: {0}")]
    FeedStructure(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
