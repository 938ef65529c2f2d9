//! Opens the repositories the commands browse.

use std::sync::Arc;

use tracing::{debug, warn};
use tributary_config::{config::Config, source::Source};
use tributary_core::{
    AggregateRepository, RepositoryComposer, RepositoryFactory, RepositoryHandle,
    AGGREGATE_SOURCE_NAME,
};
use tributary_registry::{ConfigSourceProvider, IndexRepositoryFactory};

use crate::error::{CliError, CliResult};

pub struct CliContext {
    config: Config,
    factory: Arc<IndexRepositoryFactory>,
}

impl CliContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            factory: Arc::new(IndexRepositoryFactory::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Picks the source to browse: `name` when given, else the configured
    /// primary source, else the first enabled one.
    pub fn select_source(&self, name: Option<&str>) -> CliResult<&Source> {
        match name {
            Some(name) => {
                self.config
                    .get_source(name)
                    .ok_or_else(|| CliError::UnknownSource(name.to_string()))
            }
            None => self.config.primary_source().ok_or(CliError::NoSources),
        }
    }

    /// Opens the browsed repository. `All` opens every enabled source as one
    /// aggregate.
    pub fn open_primary(&self, name: Option<&str>) -> CliResult<RepositoryHandle> {
        if let Some(name) = name {
            if name.eq_ignore_ascii_case(AGGREGATE_SOURCE_NAME) {
                return self.open_all();
            }
        }

        let source = self.select_source(name)?;
        debug!(name = source.name, url = source.url, "opening source");
        Ok(self.factory.create_repository(&source.url)?)
    }

    fn open_all(&self) -> CliResult<RepositoryHandle> {
        let mut members = Vec::new();
        for source in self.config.enabled_sources() {
            match self.factory.create_repository(&source.url) {
                Ok(repo) => members.push(repo),
                Err(err) => warn!("Skipping source {}: {}", source.name, err),
            }
        }

        if members.is_empty() {
            return Err(CliError::NoSources);
        }

        Ok(Arc::new(AggregateRepository::new(members)))
    }

    /// Wraps `primary` so dependencies are looked up across every enabled
    /// source when `use_fallback` is set.
    pub fn compose(
        &self,
        primary: RepositoryHandle,
        use_fallback: bool,
    ) -> CliResult<RepositoryHandle> {
        let composer = RepositoryComposer::new(
            Arc::new(ConfigSourceProvider::new(self.config.clone())),
            self.factory.clone(),
        );
        Ok(composer.create_package_manager_repository(primary, use_fallback)?)
    }
}
