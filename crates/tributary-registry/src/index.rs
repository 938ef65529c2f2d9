//! Loading package indexes from local files and remote URLs.
//!
//! An index is a JSON document in one of two shapes:
//!
//! ```json
//! [ { "id": "A", "version": "1.0" } ]
//! ```
//!
//! or, when the feed wants to advertise its canonical location:
//!
//! ```json
//! { "source": "https://feed.example/v1", "packages": [ ... ] }
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::{debug, trace};
use tributary_config::utils::resolve_path;
use ureq::ResponseExt;
use url::Url;

use crate::{
    error::{ErrorContext, RegistryError, Result},
    http_client,
    package::IndexPackage,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum IndexDocument {
    Packages(Vec<IndexPackage>),
    Index {
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        packages: Vec<IndexPackage>,
    },
}

/// A loaded index and the identifier it resolved to.
#[derive(Debug, Clone)]
pub struct PackageIndex {
    /// Canonical identifier of the source the index was loaded from.
    pub source: String,
    pub packages: Vec<IndexPackage>,
}

impl PackageIndex {
    /// Parses index content. `fallback_source` is used unless the document
    /// advertises its own non-empty `source`.
    pub fn parse(content: &[u8], fallback_source: &str) -> Result<Self> {
        let document: IndexDocument = serde_json::from_slice(content)?;
        let (advertised, packages) = match document {
            IndexDocument::Packages(packages) => (None, packages),
            IndexDocument::Index {
                source,
                packages,
            } => (source, packages),
        };

        let source = advertised
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback_source.to_string());

        Ok(Self {
            source,
            packages,
        })
    }

    pub fn is_remote(location: &str) -> bool {
        location.starts_with("http://") || location.starts_with("https://")
    }

    /// Loads the index at `location`, an http(s) URL or a file path.
    pub fn load(location: &str) -> Result<Self> {
        let location = location.trim();
        if Self::is_remote(location) {
            Self::fetch(location)
        } else {
            let path = resolve_path(location)?;
            if !path.is_file() {
                return Err(RegistryError::InvalidSource(location.to_string()));
            }
            Self::read(&path)
        }
    }

    /// Reads an index file. The canonical path is used as its identifier.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let canonical = fs::canonicalize(path)
            .with_context(|| format!("resolving index path {}", path.display()))?;
        trace!("reading index {}", canonical.display());

        let content =
            fs::read(&canonical).with_context(|| format!("reading index {}", canonical.display()))?;

        Self::parse(&content, &canonical.to_string_lossy())
    }

    /// Fetches an index over HTTP. Redirects are followed and the final URI
    /// becomes the identifier.
    pub fn fetch(url: &str) -> Result<Self> {
        Url::parse(url).map_err(|err| RegistryError::InvalidUrl(err.to_string()))?;

        debug!("Fetching package index from {}", url);

        let resp = http_client::agent()
            .get(url)
            .call()
            .map_err(|err| RegistryError::FailedToFetchRemote(format!("{url}: {err}")))?;

        if !resp.status().is_success() {
            return Err(RegistryError::FailedToFetchRemote(format!(
                "{} [{}]",
                url,
                resp.status()
            )));
        }

        let final_uri = resp.get_uri().to_string();
        if final_uri != url {
            debug!("{} redirected to {}", url, final_uri);
        }

        let content = resp.into_body().read_to_vec()?;
        Self::parse(&content, &final_uri)
    }
}
