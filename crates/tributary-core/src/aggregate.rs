//! Aggregation of several repositories into one.

use std::collections::HashSet;

use tracing::{trace, warn};

use crate::{
    error::Result,
    package::Package,
    repository::{PackageRepository, RepositoryHandle},
    source::AGGREGATE_SOURCE_NAME,
};

/// An ordered set of repositories queried as one.
///
/// Members are deduplicated by their resolved source identifier at construction
/// and never change afterwards. Queries visit members in order and concatenate
/// their results; packages published by several members are returned once per
/// member.
///
/// A member that fails a query contributes no results. The failure is logged
/// and never reaches the caller, so one unreachable feed cannot break lookups
/// against the rest.
pub struct AggregateRepository {
    repositories: Vec<RepositoryHandle>,
}

impl AggregateRepository {
    /// Creates an aggregate, keeping the first repository seen for each
    /// resolved source identifier.
    pub fn new<I>(repositories: I) -> Self
    where
        I: IntoIterator<Item = RepositoryHandle>,
    {
        let mut seen = HashSet::new();
        let repositories = repositories
            .into_iter()
            .filter(|repo| {
                let keep = seen.insert(repo.source().to_string());
                if !keep {
                    trace!(source = repo.source(), "dropping duplicate repository");
                }
                keep
            })
            .collect();

        Self {
            repositories,
        }
    }

    pub fn repositories(&self) -> &[RepositoryHandle] {
        &self.repositories
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    fn collect<F>(&self, op: &str, query: F) -> Vec<Package>
    where
        F: Fn(&dyn PackageRepository) -> Result<Vec<Package>>,
    {
        let mut results = Vec::new();
        for repo in &self.repositories {
            match query(repo.as_ref()) {
                Ok(packages) => results.extend(packages),
                Err(err) => {
                    warn!(
                        source = repo.source(),
                        "Skipping repository {} during {}: {}",
                        repo.source(),
                        op,
                        err
                    );
                }
            }
        }
        results
    }
}

impl PackageRepository for AggregateRepository {
    fn source(&self) -> &str {
        AGGREGATE_SOURCE_NAME
    }

    fn packages(&self) -> Result<Vec<Package>> {
        Ok(self.collect("enumeration", |repo| repo.packages()))
    }

    fn find_packages_by_id(&self, id: &str) -> Result<Vec<Package>> {
        Ok(self.collect("lookup", |repo| repo.find_packages_by_id(id)))
    }

    fn as_aggregate(&self) -> Option<&AggregateRepository> {
        Some(self)
    }
}
