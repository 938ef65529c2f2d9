//! Package model shared by every repository.

use std::fmt;

/// A declared dependency of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub id: String,
    /// Raw version requirement as published by the feed. Never evaluated here.
    pub version_req: Option<String>,
}

impl Dependency {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version_req: None,
        }
    }

    pub fn with_version_req(mut self, req: impl Into<String>) -> Self {
        self.version_req = Some(req.into());
        self
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version_req {
            Some(req) => write!(f, "{}@{}", self.id, req),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A package as seen through a repository.
///
/// Two packages are equal when their id and version match, regardless of
/// which repository produced them.
#[derive(Debug, Clone)]
pub struct Package {
    pub id: String,
    pub version: String,
    pub description: Option<String>,
    pub dependencies: Vec<Dependency>,
}

impl Package {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            description: None,
            dependencies: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Package ids are matched case-insensitively.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.version == other.version
    }
}

impl Eq for Package {}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_equality_ignores_metadata() {
        let a = Package::new("A", "1.0").with_description("first");
        let b = Package::new("A", "1.0").with_dependency(Dependency::new("B"));
        assert_eq!(a, b);
        assert_ne!(a, Package::new("A", "1.2"));
    }

    #[test]
    fn test_matches_id_case_insensitive() {
        let pkg = Package::new("Newtonsoft.Json", "13.0.1");
        assert!(pkg.matches_id("newtonsoft.json"));
        assert!(!pkg.matches_id("newtonsoft"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Package::new("A", "1.0").to_string(), "A@1.0");
        assert_eq!(Dependency::new("B").to_string(), "B");
        assert_eq!(
            Dependency::new("B").with_version_req("[1.0,2.0)").to_string(),
            "B@[1.0,2.0)"
        );
    }
}
