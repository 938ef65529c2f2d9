//! Package sources and repositories for tributary.
//!
//! This crate provides the concrete collaborators the composer in
//! `tributary-core` works with:
//!
//! - [`ConfigSourceProvider`] lists the sources configured in `config.toml`.
//! - [`IndexRepositoryFactory`] turns a source location into a repository by
//!   loading its JSON package index, from disk or over HTTP.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tributary_config::config::get_config;
//! use tributary_core::{RepositoryComposer, RepositoryFactory};
//! use tributary_registry::{ConfigSourceProvider, IndexRepositoryFactory};
//!
//! let config = get_config();
//! let factory = IndexRepositoryFactory::new();
//! let primary = factory
//!     .create_repository("https://feed.example/index.json")
//!     .unwrap();
//!
//! let composer = RepositoryComposer::new(
//!     Arc::new(ConfigSourceProvider::new(config)),
//!     Arc::new(factory),
//! );
//! let repo = composer.create_package_manager_repository(primary, true).unwrap();
//! ```

pub mod error;
pub mod factory;
pub mod http_client;
pub mod index;
pub mod package;
pub mod provider;

pub use error::{ErrorContext, RegistryError, Result};
pub use factory::IndexRepositoryFactory;
pub use index::PackageIndex;
pub use package::{IndexDependency, IndexPackage};
pub use provider::ConfigSourceProvider;
