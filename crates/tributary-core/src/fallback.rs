//! Primary repository with a separate dependency resolver.

use crate::{
    error::Result,
    package::Package,
    repository::{DependencyProvider, PackageRepository, RepositoryHandle},
};

/// Wraps a primary repository for browsing while sending dependency lookups to
/// another repository, normally an aggregate of every configured source.
///
/// Enumeration and id lookups see only `primary`; the resolver is reachable
/// solely through [`DependencyProvider::dependencies`].
pub struct FallbackRepository {
    primary: RepositoryHandle,
    dependency_resolver: RepositoryHandle,
}

impl FallbackRepository {
    pub fn new(primary: RepositoryHandle, dependency_resolver: RepositoryHandle) -> Self {
        Self {
            primary,
            dependency_resolver,
        }
    }

    pub fn primary(&self) -> &RepositoryHandle {
        &self.primary
    }

    pub fn dependency_resolver(&self) -> &RepositoryHandle {
        &self.dependency_resolver
    }
}

impl PackageRepository for FallbackRepository {
    fn source(&self) -> &str {
        self.primary.source()
    }

    fn packages(&self) -> Result<Vec<Package>> {
        self.primary.packages()
    }

    fn find_packages_by_id(&self, id: &str) -> Result<Vec<Package>> {
        self.primary.find_packages_by_id(id)
    }

    fn as_fallback(&self) -> Option<&FallbackRepository> {
        Some(self)
    }

    fn as_dependency_provider(&self) -> Option<&dyn DependencyProvider> {
        Some(self)
    }
}

impl DependencyProvider for FallbackRepository {
    fn dependencies(&self, id: &str) -> Result<Vec<Package>> {
        self.dependency_resolver.find_packages_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{aggregate::AggregateRepository, test_utils::repo_with};

    fn fallback_over_two_feeds() -> (FallbackRepository, RepositoryHandle) {
        let primary = repo_with("Source1", &[("A", "1.0")]);
        let other = repo_with("Source2", &[("A", "1.2"), ("B", "2.0")]);
        let aggregate: RepositoryHandle =
            Arc::new(AggregateRepository::new([primary.clone(), other]));
        (FallbackRepository::new(primary.clone(), aggregate), primary)
    }

    #[test]
    fn test_enumeration_uses_primary_only() {
        let (fallback, _) = fallback_over_two_feeds();
        assert_eq!(fallback.packages().unwrap(), vec![Package::new("A", "1.0")]);
        assert!(fallback.find_packages_by_id("B").unwrap().is_empty());
    }

    #[test]
    fn test_dependencies_use_resolver() {
        let (fallback, _) = fallback_over_two_feeds();
        assert_eq!(
            fallback.dependencies("A").unwrap(),
            vec![Package::new("A", "1.0"), Package::new("A", "1.2")]
        );
        assert_eq!(
            fallback.dependencies("B").unwrap(),
            vec![Package::new("B", "2.0")]
        );
    }

    #[test]
    fn test_accessors_and_identity() {
        let (fallback, primary) = fallback_over_two_feeds();
        assert!(Arc::ptr_eq(fallback.primary(), &primary));
        assert!(fallback.dependency_resolver().as_aggregate().is_some());
        assert_eq!(fallback.source(), "Source1");
        assert!(fallback.as_dependency_provider().is_some());
        assert!(fallback.as_aggregate().is_none());
    }
}
