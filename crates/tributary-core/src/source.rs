//! Package sources and the collaborators that turn them into repositories.

use std::fmt;

use crate::{error::Result, repository::RepositoryHandle};

/// Display name of the aggregate pseudo-source.
pub const AGGREGATE_SOURCE_NAME: &str = "All";

/// A configured package source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// A real feed, identified by a URL or path.
    Feed { name: String, source: String },
    /// Stands for "every configured source at once". Never resolved into a
    /// repository of its own.
    AggregateOfAll,
}

impl PackageSource {
    pub fn feed(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self::Feed {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Feed { name, .. } => name,
            Self::AggregateOfAll => AGGREGATE_SOURCE_NAME,
        }
    }

    /// Identifier handed to the [`RepositoryFactory`], `None` for the aggregate.
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Feed { source, .. } => Some(source),
            Self::AggregateOfAll => None,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::AggregateOfAll)
    }
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feed { name, source } => write!(f, "{name} ({source})"),
            Self::AggregateOfAll => write!(f, "{AGGREGATE_SOURCE_NAME}"),
        }
    }
}

/// Supplies the ordered list of configured sources.
pub trait SourceProvider: Send + Sync {
    fn load_package_sources(&self) -> Result<Vec<PackageSource>>;
}

/// Turns a source identifier into a queryable repository.
pub trait RepositoryFactory: Send + Sync {
    fn create_repository(&self, source: &str) -> Result<RepositoryHandle>;
}
