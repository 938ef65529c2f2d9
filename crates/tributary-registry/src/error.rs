//! Error types for the registry crate.

use miette::Diagnostic;
use thiserror::Error;
use tributary_config::error::ConfigError;

/// Errors that can occur while locating or loading a package index.
#[derive(Error, Diagnostic, Debug)]
pub enum RegistryError {
    #[error("Error while {action}: {source}")]
    #[diagnostic(code(tributary_registry::io))]
    IoError {
        action: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(
        code(tributary_registry::http),
        help("Check your network connection and the source URL")
    )]
    UreqError(#[from] ureq::Error),

    #[error("Failed to fetch from remote source: {0}")]
    #[diagnostic(
        code(tributary_registry::fetch_remote),
        help("Verify the source URL is correct and accessible")
    )]
    FailedToFetchRemote(String),

    #[error(transparent)]
    #[diagnostic(
        code(tributary_registry::json),
        help("The package index may be corrupted or in an invalid format")
    )]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    #[diagnostic(
        code(tributary_registry::invalid_url),
        help("Ensure the URL is valid and properly formatted")
    )]
    InvalidUrl(String),

    #[error("Invalid source '{0}'")]
    #[diagnostic(
        code(tributary_registry::invalid_source),
        help("A source must be an http(s) URL or the path of an existing index file")
    )]
    InvalidSource(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// A specialized Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Extension trait for adding context to I/O errors.
pub trait ErrorContext<T> {
    /// Adds context to an error, describing what action was being performed.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            RegistryError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
