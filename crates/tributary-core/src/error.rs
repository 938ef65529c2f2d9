//! Error types for tributary-core.

use miette::Diagnostic;
use thiserror::Error;

/// Core error type for repository composition and queries.
///
/// Only [`CoreError::InvalidArgument`] ever escapes repository composition;
/// the remaining variants are produced by repositories and collaborators and
/// are recovered from inside the aggregate and the composer.
#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(tributary::invalid_argument),
        help("This is a caller error, check the value passed to the composer")
    )]
    InvalidArgument(String),

    #[error("Failed to resolve source '{source_id}': {reason}")]
    #[diagnostic(
        code(tributary::source_resolution),
        help("Check that the source is reachable and its location is correct")
    )]
    SourceResolution { source_id: String, reason: String },

    #[error("Failed to load package sources: {0}")]
    #[diagnostic(
        code(tributary::source_provider),
        help("Check your configured package sources")
    )]
    SourceProvider(String),

    #[error("Repository '{source_id}' failed: {reason}")]
    #[diagnostic(code(tributary::repository))]
    Repository { source_id: String, reason: String },
}

impl CoreError {
    pub fn repository(source_id: impl Into<String>, reason: impl ToString) -> Self {
        Self::Repository {
            source_id: source_id.into(),
            reason: reason.to_string(),
        }
    }

    pub fn source_resolution(source_id: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceResolution {
            source_id: source_id.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
