use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};

/// Name reserved for the "all sources" entry.
pub const RESERVED_SOURCE_NAME: &str = "All";

/// Defines a package feed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Source {
    /// Unique name of the source.
    pub name: String,

    /// Location of the source's package index: an http(s) URL or a local path.
    pub url: String,

    /// Whether the source is enabled.
    /// Default: true
    pub enabled: Option<bool>,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            enabled: Some(true),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

#[derive(Default)]
pub struct DefaultSourceInfo {
    pub name: &'static str,
    pub url: &'static str,
    pub enabled: Option<bool>,
}

pub fn get_default_sources() -> Vec<DefaultSourceInfo> {
    vec![DefaultSourceInfo {
        name: "local",
        url: "~/.local/share/tributary/index.json",
        enabled: Some(true),
    }]
}
