//! Package entries as published in a package index.
//!
//! Index files are written by many tools, so parsing is lenient: versions may
//! be numbers, booleans may be strings, empty strings mean "absent" and
//! dependencies may be given as `"id@req"` strings or as tables.

use std::fmt;

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize,
};
use tributary_core::{Dependency, Package};

#[derive(Deserialize)]
#[serde(untagged)]
enum FlexiBool {
    Bool(bool),
    String(String),
}

fn empty_is_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<FlexiBool>::deserialize(deserializer)? {
        Some(FlexiBool::Bool(b)) => Ok(Some(b)),
        Some(FlexiBool::String(s)) => {
            match s.to_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Some(true)),
                "false" | "no" | "0" => Ok(Some(false)),
                "" => Ok(None),
                _ => {
                    Err(de::Error::invalid_value(
                        de::Unexpected::Str(&s),
                        &"a valid boolean (true/false, yes/no, 1/0)",
                    ))
                }
            }
        }
        None => Ok(None),
    }
}

/// Accepts version strings as well as bare numbers such as `1` or `1.5`.
fn version_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct VersionVisitor;

    impl<'de> Visitor<'de> for VersionVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a version string or number")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let v = v.trim();
            if v.is_empty() {
                return Err(E::custom("version is empty"));
            }
            Ok(v.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(VersionVisitor)
}

/// A dependency as written in an index.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum IndexDependency {
    /// `"id"` or `"id@requirement"`.
    Spec(String),
    Table {
        #[serde(alias = "pkg_id")]
        id: String,
        #[serde(default, alias = "version_req", deserialize_with = "empty_is_none")]
        version: Option<String>,
    },
}

impl From<&IndexDependency> for Dependency {
    fn from(value: &IndexDependency) -> Self {
        match value {
            IndexDependency::Spec(spec) => {
                match spec.split_once('@') {
                    Some((id, req)) if !req.trim().is_empty() => {
                        Dependency::new(id.trim()).with_version_req(req.trim())
                    }
                    Some((id, _)) => Dependency::new(id.trim()),
                    None => Dependency::new(spec.trim()),
                }
            }
            IndexDependency::Table { id, version } => {
                Dependency {
                    id: id.trim().to_string(),
                    version_req: version.clone(),
                }
            }
        }
    }
}

/// Package metadata as published in an index.
///
/// # Required Fields
///
/// - `id` (alias `pkg_id`)
/// - `version`, string or number
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexPackage {
    #[serde(alias = "pkg_id")]
    pub id: String,

    #[serde(deserialize_with = "version_string")]
    pub version: String,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub description: Option<String>,

    #[serde(default, alias = "depends")]
    pub dependencies: Vec<IndexDependency>,

    /// Unlisted packages stay in the index but are never served.
    #[serde(default, deserialize_with = "flexible_bool", alias = "unlisted")]
    pub disabled: Option<bool>,
}

impl IndexPackage {
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }
}

impl From<&IndexPackage> for Package {
    fn from(value: &IndexPackage) -> Self {
        Package {
            id: value.id.clone(),
            version: value.version.clone(),
            description: value.description.clone(),
            dependencies: value.dependencies.iter().map(Dependency::from).collect(),
        }
    }
}
