//! Builds the repository a package manager works against.

use std::{collections::HashSet, sync::Arc};

use tracing::{debug, trace, warn};

use crate::{
    aggregate::AggregateRepository,
    error::{CoreError, Result},
    fallback::FallbackRepository,
    repository::RepositoryHandle,
    source::{PackageSource, RepositoryFactory, SourceProvider},
};

/// Composes a primary repository with every configured source.
///
/// Each call resolves the configured sources again and builds fresh
/// repositories; nothing is cached between calls.
#[derive(Clone)]
pub struct RepositoryComposer {
    source_provider: Arc<dyn SourceProvider>,
    repository_factory: Arc<dyn RepositoryFactory>,
}

impl RepositoryComposer {
    pub fn new(
        source_provider: Arc<dyn SourceProvider>,
        repository_factory: Arc<dyn RepositoryFactory>,
    ) -> Self {
        Self {
            source_provider,
            repository_factory,
        }
    }

    /// Returns the repository a package manager should use for `primary`.
    ///
    /// Without fallback this is `primary` itself. With fallback, dependency
    /// lookups are answered by every configured source, see
    /// [`Self::create_fallback_repository`].
    pub fn create_package_manager_repository(
        &self,
        primary: RepositoryHandle,
        use_fallback: bool,
    ) -> Result<RepositoryHandle> {
        if !use_fallback {
            return Ok(primary);
        }
        self.create_fallback_repository(primary)
    }

    /// Wraps `primary` in a [`FallbackRepository`] whose dependency resolver is
    /// an [`AggregateRepository`] of `primary` followed by every configured
    /// source that could be resolved.
    ///
    /// A `primary` that is already an aggregate is returned unchanged. Sources
    /// that fail to resolve are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] if `primary` reports a blank
    /// source identifier.
    pub fn create_fallback_repository(&self, primary: RepositoryHandle) -> Result<RepositoryHandle> {
        if primary.as_aggregate().is_some() {
            debug!("primary repository is already an aggregate");
            return Ok(primary);
        }

        if primary.source().trim().is_empty() {
            return Err(CoreError::InvalidArgument(
                "primary repository reports an empty source".to_string(),
            ));
        }

        let mut seen = HashSet::from([primary.source().to_string()]);
        let mut members = vec![primary.clone()];

        for repo in self.resolve_configured_sources() {
            if seen.insert(repo.source().to_string()) {
                members.push(repo);
            } else {
                trace!(source = repo.source(), "source already in aggregate");
            }
        }

        debug!(
            primary = primary.source(),
            members = members.len(),
            "built dependency resolver"
        );

        let aggregate: RepositoryHandle = Arc::new(AggregateRepository::new(members));
        Ok(Arc::new(FallbackRepository::new(primary, aggregate)))
    }

    fn resolve_configured_sources(&self) -> Vec<RepositoryHandle> {
        let sources = match self.source_provider.load_package_sources() {
            Ok(sources) => sources,
            Err(err) => {
                warn!("Failed to load package sources: {}", err);
                return Vec::new();
            }
        };

        sources
            .iter()
            .filter_map(PackageSource::source)
            .filter_map(|source| {
                match self.repository_factory.create_repository(source) {
                    Ok(repo) => {
                        trace!(source = source, resolved = repo.source(), "resolved source");
                        Some(repo)
                    }
                    Err(err) => {
                        warn!("Skipping source {}: {}", source, err);
                        None
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        package::Package,
        repository::{DependencyProvider, MemoryRepository},
        test_utils::{
            repo_with, BrokenSourceProvider, MapRepositoryFactory, RecordingRepositoryFactory,
            StaticSourceProvider,
        },
    };

    fn two_feed_factory(
        repo1: &RepositoryHandle,
        repo2: &RepositoryHandle,
    ) -> MapRepositoryFactory {
        MapRepositoryFactory::default()
            .with("Source1", repo1.clone())
            .with("Source2", repo2.clone())
    }

    fn composer<P>(provider: P, factory: MapRepositoryFactory) -> RepositoryComposer
    where
        P: SourceProvider + 'static,
    {
        RepositoryComposer::new(Arc::new(provider), Arc::new(factory))
    }

    fn resolver_members(repo: &RepositoryHandle) -> Vec<RepositoryHandle> {
        let fallback = repo.as_fallback().expect("expected a fallback repository");
        let aggregate = fallback
            .dependency_resolver()
            .as_aggregate()
            .expect("expected an aggregate dependency resolver");
        aggregate.repositories().to_vec()
    }

    #[test]
    fn test_without_fallback_returns_primary() {
        let repo1 = repo_with("Source1", &[("A", "1.0")]);
        let repo2 = repo_with("Source2", &[("A", "1.2")]);
        let composer = composer(
            StaticSourceProvider::feeds(&["Source1", "Source2"]),
            two_feed_factory(&repo1, &repo2),
        );

        let repo = composer
            .create_package_manager_repository(repo1.clone(), false)
            .unwrap();

        assert!(Arc::ptr_eq(&repo, &repo1));
        assert!(repo.as_fallback().is_none());
    }

    #[test]
    fn test_with_fallback_aggregates_configured_sources() {
        let repo1 = repo_with("Source1", &[("A", "1.0")]);
        let repo2 = repo_with("Source2", &[("A", "1.2")]);
        let composer = composer(
            StaticSourceProvider::feeds(&["Source1", "Source2"]),
            two_feed_factory(&repo1, &repo2),
        );

        let repo = composer
            .create_package_manager_repository(repo1.clone(), true)
            .unwrap();

        let fallback = repo.as_fallback().unwrap();
        assert!(Arc::ptr_eq(fallback.primary(), &repo1));

        let members = resolver_members(&repo);
        assert_eq!(members.len(), 2);
        assert!(Arc::ptr_eq(&members[0], &repo1));
        assert!(Arc::ptr_eq(&members[1], &repo2));
    }

    #[test]
    fn test_primary_goes_first_followed_by_configured_order() {
        let primary = repo_with("Primary", &[]);
        let repo1 = repo_with("Source1", &[]);
        let repo2 = repo_with("Source2", &[]);
        let repo3 = repo_with("Source3", &[]);
        let composer = composer(
            StaticSourceProvider::feeds(&["Source3", "Source1", "Source2"]),
            two_feed_factory(&repo1, &repo2).with("Source3", repo3.clone()),
        );

        let repo = composer.create_fallback_repository(primary.clone()).unwrap();

        let sources: Vec<_> = resolver_members(&repo)
            .iter()
            .map(|r| r.source().to_string())
            .collect();
        assert_eq!(sources, ["Primary", "Source3", "Source1", "Source2"]);
    }

    #[test]
    fn test_dependencies_come_from_every_source() {
        let repo1 = repo_with("Source1", &[("A", "1.0")]);
        let repo2 = repo_with("Source2", &[("A", "1.2")]);
        let composer = composer(
            StaticSourceProvider::feeds(&["Source1", "Source2"]),
            two_feed_factory(&repo1, &repo2),
        );

        let repo = composer.create_fallback_repository(repo1.clone()).unwrap();

        let dependencies = repo
            .as_dependency_provider()
            .unwrap()
            .dependencies("A")
            .unwrap();
        let packages = repo.packages().unwrap();

        assert_eq!(packages, vec![Package::new("A", "1.0")]);
        assert_eq!(
            dependencies,
            vec![Package::new("A", "1.0"), Package::new("A", "1.2")]
        );
    }

    #[test]
    fn test_aggregate_primary_is_returned_unchanged() {
        let repo1 = repo_with("Source1", &[("A", "1.0")]);
        let repo2 = repo_with("Source2", &[("A", "1.2")]);
        let aggregate: RepositoryHandle =
            Arc::new(AggregateRepository::new([repo1.clone(), repo2.clone()]));
        let composer = composer(
            StaticSourceProvider::feeds(&["Source1", "Source2"]).with_aggregate(),
            two_feed_factory(&repo1, &repo2),
        );

        let repo = composer.create_fallback_repository(aggregate.clone()).unwrap();
        assert!(Arc::ptr_eq(&repo, &aggregate));

        let repo = composer
            .create_package_manager_repository(aggregate.clone(), true)
            .unwrap();
        assert!(Arc::ptr_eq(&repo, &aggregate));
    }

    #[test]
    fn test_uses_resolved_source_when_deduplicating_primary() {
        let repo1 = repo_with("Source1", &[("A", "1.0")]);
        let redirected = repo_with("http://redirected", &[("A", "1.2")]);
        let composer = composer(
            StaticSourceProvider::feeds(&["Source1", "Source2"]).with_aggregate(),
            two_feed_factory(&repo1, &redirected),
        );

        let repo = composer.create_fallback_repository(redirected.clone()).unwrap();

        let members = resolver_members(&repo);
        assert_eq!(members.len(), 2);
        assert!(Arc::ptr_eq(&members[0], &redirected));
        assert!(Arc::ptr_eq(&members[1], &repo1));
    }

    #[test]
    fn test_equal_source_instances_are_included_once() {
        let primary = repo_with("Source1", &[("A", "1.0")]);
        // A distinct instance built from the same feed.
        let same_feed = repo_with("Source1", &[("A", "1.0")]);
        let repo2 = repo_with("Source2", &[("A", "1.2")]);
        let composer = composer(
            StaticSourceProvider::feeds(&["Source1", "Source2"]),
            two_feed_factory(&same_feed, &repo2),
        );

        let repo = composer.create_fallback_repository(primary.clone()).unwrap();

        let members = resolver_members(&repo);
        assert_eq!(members.len(), 2);
        assert!(Arc::ptr_eq(&members[0], &primary));
        assert!(Arc::ptr_eq(&members[1], &repo2));
    }

    #[test]
    fn test_failing_sources_are_skipped() {
        let repo1 = repo_with("Source1", &[]);
        let redirected = repo_with("http://redirected", &[]);
        let composer = composer(
            StaticSourceProvider::feeds(&["Source1", "SourceBad", "Source2"]).with_aggregate(),
            two_feed_factory(&repo1, &redirected),
        );

        let repo = composer.create_fallback_repository(redirected.clone()).unwrap();

        let members = resolver_members(&repo);
        assert_eq!(members.len(), 2);
        assert!(Arc::ptr_eq(&members[0], &redirected));
        assert!(Arc::ptr_eq(&members[1], &repo1));
    }

    #[test]
    fn test_no_usable_sources_degrades_to_primary() {
        let primary = repo_with("Primary", &[("A", "1.0")]);
        let composer = composer(
            StaticSourceProvider::feeds(&["SourceBad"]).with_aggregate(),
            MapRepositoryFactory::default(),
        );

        let repo = composer.create_fallback_repository(primary.clone()).unwrap();

        let members = resolver_members(&repo);
        assert_eq!(members.len(), 1);
        assert!(Arc::ptr_eq(&members[0], &primary));

        let fallback = repo.as_fallback().unwrap();
        assert_eq!(
            fallback.dependencies("A").unwrap(),
            primary.find_packages_by_id("A").unwrap()
        );
    }

    #[test]
    fn test_aggregate_entry_is_never_resolved() {
        let factory = Arc::new(RecordingRepositoryFactory::default());
        let provider = StaticSourceProvider(vec![
            PackageSource::AggregateOfAll,
            PackageSource::feed("S1", "S1"),
            PackageSource::feed("Primary", "Primary"),
        ]);
        let composer = RepositoryComposer::new(Arc::new(provider), factory.clone());
        let primary = repo_with("Primary", &[]);

        let repo = composer.create_fallback_repository(primary.clone()).unwrap();

        assert_eq!(factory.calls(), ["S1", "Primary"]);
        let sources: Vec<_> = resolver_members(&repo)
            .iter()
            .map(|r| r.source().to_string())
            .collect();
        assert_eq!(sources, ["Primary", "S1"]);
        assert!(Arc::ptr_eq(&resolver_members(&repo)[0], &primary));
    }

    #[test]
    fn test_source_provider_failure_is_not_fatal() {
        let primary = repo_with("Primary", &[]);
        let composer = composer(BrokenSourceProvider, MapRepositoryFactory::default());

        let repo = composer.create_fallback_repository(primary.clone()).unwrap();
        assert_eq!(resolver_members(&repo).len(), 1);
    }

    #[test]
    fn test_blank_primary_source_is_rejected() {
        let composer = composer(
            StaticSourceProvider::feeds(&[]),
            MapRepositoryFactory::default(),
        );
        let primary = MemoryRepository::new("  ").into_handle();

        let result = composer.create_fallback_repository(primary);
        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }

    #[test]
    fn test_each_call_builds_fresh_repositories() {
        let repo1 = repo_with("Source1", &[]);
        let repo2 = repo_with("Source2", &[]);
        let composer = composer(
            StaticSourceProvider::feeds(&["Source1", "Source2"]),
            two_feed_factory(&repo1, &repo2),
        );

        let first = composer.create_fallback_repository(repo1.clone()).unwrap();
        let second = composer.create_fallback_repository(repo1.clone()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
