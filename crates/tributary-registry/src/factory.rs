//! Resolves source identifiers into in-memory repositories.

use std::sync::Arc;

use tracing::debug;
use tributary_core::{
    CoreError, CoreResult, MemoryRepository, Package, RepositoryFactory, RepositoryHandle,
};

use crate::{error::Result, index::PackageIndex};

/// Builds repositories by loading the package index behind each source.
///
/// The whole index is loaded when the repository is created, so an
/// unreachable or malformed source fails here rather than on first query.
#[derive(Debug, Default, Clone)]
pub struct IndexRepositoryFactory;

impl IndexRepositoryFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, source: &str) -> Result<MemoryRepository> {
        let index = PackageIndex::load(source)?;

        let total = index.packages.len();
        let packages: Vec<Package> = index
            .packages
            .iter()
            .filter(|pkg| !pkg.is_disabled())
            .map(Package::from)
            .collect();

        debug!(
            source = source,
            resolved = index.source,
            packages = packages.len(),
            skipped = total - packages.len(),
            "loaded package index"
        );

        Ok(MemoryRepository::with_packages(index.source, packages))
    }
}

impl RepositoryFactory for IndexRepositoryFactory {
    fn create_repository(&self, source: &str) -> CoreResult<RepositoryHandle> {
        let repo = self
            .load(source)
            .map_err(|err| CoreError::source_resolution(source, err))?;
        Ok(Arc::new(repo))
    }
}
