//! Repository composition for tributary.
//!
//! A package is browsed from one feed, but its dependencies may live on any
//! configured feed. This crate builds the repository that makes that work:
//!
//! - [`AggregateRepository`] queries an ordered, deduplicated set of
//!   repositories as one, skipping members that fail.
//! - [`FallbackRepository`] enumerates a primary repository while answering
//!   dependency lookups from a separate resolver.
//! - [`RepositoryComposer`] ties both together from the configured sources.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use tributary_core::{
//!     CoreResult, DependencyProvider, MemoryRepository, Package, PackageRepository, PackageSource,
//!     RepositoryComposer, RepositoryFactory, RepositoryHandle, SourceProvider,
//! };
//!
//! struct Sources;
//!
//! impl SourceProvider for Sources {
//!     fn load_package_sources(&self) -> CoreResult<Vec<PackageSource>> {
//!         Ok(vec![PackageSource::feed("extra", "extra")])
//!     }
//! }
//!
//! struct Factory;
//!
//! impl RepositoryFactory for Factory {
//!     fn create_repository(&self, source: &str) -> CoreResult<RepositoryHandle> {
//!         let packages = vec![Package::new("Lib", "2.0")];
//!         Ok(Arc::new(MemoryRepository::with_packages(source, packages)))
//!     }
//! }
//!
//! let composer = RepositoryComposer::new(Arc::new(Sources), Arc::new(Factory));
//! let primary = MemoryRepository::new("main").into_handle();
//! let repo = composer.create_package_manager_repository(primary, true).unwrap();
//!
//! let provider = repo.as_dependency_provider().unwrap();
//! assert_eq!(provider.dependencies("Lib").unwrap().len(), 1);
//! assert!(repo.packages().unwrap().is_empty());
//! ```

pub mod aggregate;
pub mod composer;
pub mod error;
pub mod fallback;
pub mod package;
pub mod repository;
pub mod source;
pub mod walk;

#[cfg(test)]
mod test_utils;

pub use aggregate::AggregateRepository;
pub use composer::RepositoryComposer;
pub use error::CoreError;
pub use fallback::FallbackRepository;
pub use package::{Dependency, Package};
pub use repository::{DependencyProvider, MemoryRepository, PackageRepository, RepositoryHandle};
pub use source::{PackageSource, RepositoryFactory, SourceProvider, AGGREGATE_SOURCE_NAME};
pub use walk::{collect_dependency_candidates, DependencyCandidates, DependencyClosure};

pub type CoreResult<T> = std::result::Result<T, CoreError>;
