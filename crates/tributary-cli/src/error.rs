//! Errors reported by the `tributary` binary.

use miette::Diagnostic;
use thiserror::Error;
use tributary_config::error::ConfigError;
use tributary_core::CoreError;
use tributary_registry::RegistryError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error("Unknown source '{0}'")]
    #[diagnostic(
        code(tributary_cli::unknown_source),
        help("Run `tributary sources` to list the enabled sources")
    )]
    UnknownSource(String),

    #[error("No enabled package sources")]
    #[diagnostic(
        code(tributary_cli::no_sources),
        help("Add a [[sources]] entry to your config file or enable an existing one")
    )]
    NoSources,

    #[error("Package '{0}' not found")]
    #[diagnostic(
        code(tributary_cli::package_not_found),
        help("Check the package id, or browse another source with --source")
    )]
    PackageNotFound(String),

    #[error("Error while {action}: {source}")]
    #[diagnostic(code(tributary_cli::io))]
    IoError {
        action: String,
        source: std::io::Error,
    },
}

pub type CliResult<T> = std::result::Result<T, CliError>;

pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> CliResult<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> CliResult<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            CliError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
