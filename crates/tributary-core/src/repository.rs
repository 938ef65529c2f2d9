//! The repository capability and an in-memory implementation.

use std::sync::Arc;

use crate::{
    aggregate::AggregateRepository, error::Result, fallback::FallbackRepository, package::Package,
};

/// Shared handle to a repository.
pub type RepositoryHandle = Arc<dyn PackageRepository>;

/// A queryable collection of packages.
///
/// Implementations backed by a network feed may fail on any call; callers that
/// combine repositories decide how such failures are handled.
pub trait PackageRepository: Send + Sync {
    /// Resolved source identifier reported by the repository itself.
    ///
    /// This is the identity used when deduplicating repositories and may differ
    /// from the string that was used to request the repository, e.g. when a feed
    /// redirects to its canonical endpoint.
    fn source(&self) -> &str;

    /// Enumerates every package the repository holds.
    fn packages(&self) -> Result<Vec<Package>>;

    /// Returns the packages whose id matches `id`.
    fn find_packages_by_id(&self, id: &str) -> Result<Vec<Package>> {
        Ok(self
            .packages()?
            .into_iter()
            .filter(|pkg| pkg.matches_id(id))
            .collect())
    }

    fn as_aggregate(&self) -> Option<&AggregateRepository> {
        None
    }

    fn as_fallback(&self) -> Option<&FallbackRepository> {
        None
    }

    fn as_dependency_provider(&self) -> Option<&dyn DependencyProvider> {
        None
    }
}

/// A repository that can answer dependency lookups from somewhere other than
/// its own package list.
pub trait DependencyProvider {
    /// Returns the candidate packages that can satisfy a dependency on `id`.
    fn dependencies(&self, id: &str) -> Result<Vec<Package>>;
}

/// Repository over a fixed list of packages.
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    source: String,
    packages: Vec<Package>,
}

impl MemoryRepository {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            packages: Vec::new(),
        }
    }

    pub fn with_packages(source: impl Into<String>, packages: Vec<Package>) -> Self {
        Self {
            source: source.into(),
            packages,
        }
    }

    pub fn add_package(&mut self, package: Package) {
        self.packages.push(package);
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn into_handle(self) -> RepositoryHandle {
        Arc::new(self)
    }
}

impl PackageRepository for MemoryRepository {
    fn source(&self) -> &str {
        &self.source
    }

    fn packages(&self) -> Result<Vec<Package>> {
        Ok(self.packages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_repository_find_by_id() {
        let mut repo = MemoryRepository::new("Source1");
        repo.add_package(Package::new("A", "1.0"));
        repo.add_package(Package::new("B", "2.0"));
        repo.add_package(Package::new("a", "1.1"));

        let found = repo.find_packages_by_id("A").unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].version, "1.0");
        assert_eq!(found[1].version, "1.1");

        assert!(repo.find_packages_by_id("C").unwrap().is_empty());
    }

    #[test]
    fn test_memory_repository_has_no_capabilities() {
        let repo = MemoryRepository::new("Source1");
        assert_eq!(repo.source(), "Source1");
        assert!(repo.is_empty());
        assert!(repo.as_aggregate().is_none());
        assert!(repo.as_fallback().is_none());
        assert!(repo.as_dependency_provider().is_none());
    }
}
