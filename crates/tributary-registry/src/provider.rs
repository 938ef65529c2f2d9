//! Package sources read from the tributary configuration.

use tributary_config::config::Config;
use tributary_core::{CoreResult, PackageSource, SourceProvider};

/// Lists the enabled sources of a [`Config`] in configured order.
///
/// When more than one source is enabled the list ends with
/// [`PackageSource::AggregateOfAll`], the "All" entry of a source picker.
#[derive(Clone)]
pub struct ConfigSourceProvider {
    config: Config,
}

impl ConfigSourceProvider {
    pub fn new(config: Config) -> Self {
        Self {
            config,
        }
    }
}

impl SourceProvider for ConfigSourceProvider {
    fn load_package_sources(&self) -> CoreResult<Vec<PackageSource>> {
        let mut sources: Vec<PackageSource> = self
            .config
            .enabled_sources()
            .map(|source| PackageSource::feed(&source.name, &source.url))
            .collect();

        if sources.len() > 1 {
            sources.push(PackageSource::AggregateOfAll);
        }

        Ok(sources)
    }
}
