use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(tributary_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(tributary_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(tributary_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists,

    #[error("Invalid source: {0}")]
    #[diagnostic(
        code(tributary_config::invalid_source),
        help("Every source needs a non-empty name and url")
    )]
    InvalidSource(String),

    #[error("Reserved source name '{0}' cannot be used")]
    #[diagnostic(
        code(tributary_config::reserved_source_name),
        help("Choose a different name for your source")
    )]
    ReservedSourceName(String),

    #[error("Duplicate source name: {0}")]
    #[diagnostic(
        code(tributary_config::duplicate_source),
        help("Each source must have a unique name")
    )]
    DuplicateSourceName(String),

    #[error("Primary source '{0}' is not configured")]
    #[diagnostic(
        code(tributary_config::missing_primary_source),
        help("Set primary_source to the name of one of the configured sources")
    )]
    MissingPrimarySource(String),

    #[error("Primary source '{0}' is disabled")]
    #[diagnostic(
        code(tributary_config::disabled_primary_source),
        help("Enable the source, or point primary_source at an enabled one")
    )]
    DisabledPrimarySource(String),

    #[error("Path is empty")]
    #[diagnostic(code(tributary_config::empty_path))]
    EmptyPath,

    #[error("Unclosed variable expression starting at `{0}`")]
    #[diagnostic(code(tributary_config::unclosed_variable))]
    UnclosedVariable(String),

    #[error("Environment variable `{var}` not set in `{input}`")]
    #[diagnostic(
        code(tributary_config::missing_env_var),
        help("Set the variable or use an absolute path")
    )]
    MissingEnvVar { var: String, input: String },

    #[error("IO error: {0}")]
    #[diagnostic(code(tributary_config::io))]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    #[diagnostic(code(tributary_config::toml))]
    Toml(#[from] toml_edit::TomlError),

    #[error("Encountered unexpected TOML item: {0}")]
    #[diagnostic(code(tributary_config::unexpected_toml_item))]
    UnexpectedTomlItem(String),

    #[error("Failed to annotate first table in array: {0}")]
    #[diagnostic(code(tributary_config::annotate_first_table))]
    AnnotateFirstTable(String),

    #[error("Configuration lock poisoned")]
    #[diagnostic(
        code(tributary_config::poison),
        help("This is an internal error, please report it")
    )]
    PoisonError,
}

impl<T> From<std::sync::PoisonError<T>> for ConfigError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::PoisonError
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
