use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::{
    error::{CoreError, Result},
    package::Package,
    repository::{MemoryRepository, PackageRepository, RepositoryHandle},
    source::{PackageSource, RepositoryFactory, SourceProvider},
};

pub fn repo_with(source: &str, packages: &[(&str, &str)]) -> RepositoryHandle {
    let packages = packages
        .iter()
        .map(|(id, version)| Package::new(*id, *version))
        .collect();
    Arc::new(MemoryRepository::with_packages(source, packages))
}

/// Repository whose every query fails.
pub struct FailingRepository {
    source: String,
}

impl FailingRepository {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

impl PackageRepository for FailingRepository {
    fn source(&self) -> &str {
        &self.source
    }

    fn packages(&self) -> Result<Vec<Package>> {
        Err(CoreError::repository(&self.source, "connection refused"))
    }
}

pub struct StaticSourceProvider(pub Vec<PackageSource>);

impl StaticSourceProvider {
    pub fn feeds(names: &[&str]) -> Self {
        Self(
            names
                .iter()
                .map(|name| PackageSource::feed(*name, *name))
                .collect(),
        )
    }

    pub fn with_aggregate(mut self) -> Self {
        self.0.push(PackageSource::AggregateOfAll);
        self
    }
}

impl SourceProvider for StaticSourceProvider {
    fn load_package_sources(&self) -> Result<Vec<PackageSource>> {
        Ok(self.0.clone())
    }
}

pub struct BrokenSourceProvider;

impl SourceProvider for BrokenSourceProvider {
    fn load_package_sources(&self) -> Result<Vec<PackageSource>> {
        Err(CoreError::SourceProvider("config unreadable".to_string()))
    }
}

/// Factory resolving source identifiers from a fixed table. Unknown sources
/// fail, as an unreachable feed would.
#[derive(Default)]
pub struct MapRepositoryFactory {
    repositories: HashMap<String, RepositoryHandle>,
}

impl MapRepositoryFactory {
    pub fn with(mut self, source: &str, repo: RepositoryHandle) -> Self {
        self.repositories.insert(source.to_string(), repo);
        self
    }
}

impl RepositoryFactory for MapRepositoryFactory {
    fn create_repository(&self, source: &str) -> Result<RepositoryHandle> {
        self.repositories
            .get(source)
            .cloned()
            .ok_or_else(|| CoreError::source_resolution(source, "invalid operation"))
    }
}

/// Factory that resolves every source to an empty repository and remembers
/// which sources it was asked for.
#[derive(Default)]
pub struct RecordingRepositoryFactory {
    calls: Mutex<Vec<String>>,
}

impl RecordingRepositoryFactory {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl RepositoryFactory for RecordingRepositoryFactory {
    fn create_repository(&self, source: &str) -> Result<RepositoryHandle> {
        self.calls.lock().unwrap().push(source.to_string());
        Ok(MemoryRepository::new(source).into_handle())
    }
}
