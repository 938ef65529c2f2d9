use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::{LazyLock, PoisonError, RwLock},
};

use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};
use toml_edit::DocumentMut;
use tracing::{debug, info};

use crate::{
    annotations::{annotate_toml_array_of_tables, annotate_toml_table},
    error::{ConfigError, Result},
    source::{get_default_sources, Source, RESERVED_SOURCE_NAME},
    utils::xdg_config_home,
};

/// Application's configuration
#[derive(Clone, Debug, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Config {
    /// Name of the source used for browsing when none is given on the command line.
    /// Default: the first enabled source
    pub primary_source: Option<String>,

    /// If true, dependencies are looked up in every enabled source, not only the primary one.
    /// Default: true
    pub use_fallback: Option<bool>,

    /// Timeout in seconds for fetching remote package indexes.
    /// Default: no timeout
    pub fetch_timeout: Option<u64>,

    /// List of configured package sources, in lookup order.
    pub sources: Vec<Source>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("TRIBUTARY_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("tributary").join("config.toml"),
    })
});

pub fn config_path() -> PathBuf {
    CONFIG_PATH
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .to_path_buf()
}

pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global_config = CONFIG.write()?;
    *global_config = Some(config);
    Ok(())
}

pub fn get_config() -> Config {
    let mut config_guard = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    config_guard.get_or_insert_with(Config::default_config).clone()
}

impl Config {
    pub fn default_config() -> Self {
        let sources = get_default_sources()
            .into_iter()
            .map(|info| {
                Source {
                    name: info.name.to_string(),
                    url: info.url.to_string(),
                    enabled: info.enabled,
                }
            })
            .collect();

        Self {
            primary_source: None,
            use_fallback: Some(true),
            fetch_timeout: None,
            sources,
        }
    }

    /// Creates a new configuration by loading it from the configuration file.
    /// If the configuration file is not found, it uses the default configuration.
    pub fn new() -> Result<Self> {
        Self::load_from(config_path())
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("config file {} not found, using defaults", path.display());
                Self::default_config()
            }
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;

        Ok(config)
    }

    pub fn resolve(&mut self) -> Result<()> {
        self.use_fallback.get_or_insert(true);

        let mut seen_sources = HashSet::new();

        for source in &mut self.sources {
            if source.name.trim().is_empty() {
                return Err(ConfigError::InvalidSource("source name is empty".into()));
            }
            if source.url.trim().is_empty() {
                return Err(ConfigError::InvalidSource(format!(
                    "source '{}' has an empty url",
                    source.name
                )));
            }
            if source.name.eq_ignore_ascii_case(RESERVED_SOURCE_NAME) {
                return Err(ConfigError::ReservedSourceName(source.name.clone()));
            }
            if !seen_sources.insert(source.name.clone()) {
                return Err(ConfigError::DuplicateSourceName(source.name.clone()));
            }

            source.enabled.get_or_insert(true);
        }

        if let Some(ref primary) = self.primary_source {
            if self.get_source(primary).is_none() {
                return Err(if self.sources.iter().any(|s| &s.name == primary) {
                    ConfigError::DisabledPrimarySource(primary.clone())
                } else {
                    ConfigError::MissingPrimarySource(primary.clone())
                });
            }
        }

        Ok(())
    }

    pub fn use_fallback(&self) -> bool {
        self.use_fallback.unwrap_or(true)
    }

    /// Enabled sources, in configured order.
    pub fn enabled_sources(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter().filter(|source| source.is_enabled())
    }

    pub fn get_source(&self, name: &str) -> Option<&Source> {
        self.enabled_sources().find(|source| source.name == name)
    }

    /// The configured primary source, falling back to the first enabled one.
    pub fn primary_source(&self) -> Option<&Source> {
        match self.primary_source {
            Some(ref name) => self.get_source(name),
            None => self.enabled_sources().next(),
        }
    }

    pub fn to_annotated_document(&self) -> Result<DocumentMut> {
        let toml_string = toml::to_string_pretty(self)?;
        let mut doc = toml_string.parse::<DocumentMut>()?;

        annotate_toml_table::<Config>(doc.as_table_mut(), true)?;

        if let Some(sources_item) = doc.get_mut("sources") {
            if let Some(sources_array) = sources_item.as_array_of_tables_mut() {
                annotate_toml_array_of_tables::<Source>(sources_array)?;
            }
        }

        Ok(doc)
    }
}

pub fn generate_default_config() -> Result<()> {
    let config_path = config_path();

    if config_path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    let annotated_doc = Config::default_config().to_annotated_document()?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&config_path, annotated_doc.to_string())?;
    info!(
        "Default configuration file generated with documentation at: {}",
        config_path.display()
    );
    Ok(())
}
