//! Plugin requirement declarations.
//!
//! A requirement is written `name` or `name@version`, where the version is
//! the minimum acceptable release. Running a test against anything older is
//! considered pointless, typically because of a missing feature.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{FixtureError, Result};
use crate::requirements::version::Version;

/// A named plugin a test depends on, with an optional minimum version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Plugin short name (e.g., "git", "matrix-auth")
    pub name: String,
    /// Minimum acceptable version, if any
    pub min_version: Option<Version>,
}

impl Requirement {
    /// Create a requirement without a minimum version.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_version: None,
        }
    }

    /// Create a requirement with a minimum version.
    pub fn at_least(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            min_version: Some(version),
        }
    }

    /// Parse `name` or `name@version`.
    ///
    /// Splits on the first `@`. Surrounding whitespace is stripped from both
    /// halves. The name must be non-empty; a version, when present, must be a
    /// valid [`Version`].
    pub fn parse(spec: &str) -> Result<Self> {
        let (name, version) = match spec.split_once('@') {
            Some((name, version)) => (name.trim(), Some(version)),
            None => (spec.trim(), None),
        };

        if name.is_empty() {
            return Err(FixtureError::malformed(spec, "empty plugin name"));
        }

        let min_version = match version {
            Some(text) => Some(
                Version::parse(text)
                    .map_err(|_| FixtureError::malformed(spec, "invalid version after '@'"))?,
            ),
            None => None,
        };

        Ok(Self {
            name: name.to_string(),
            min_version,
        })
    }

    /// Whether `installed` meets this requirement's minimum.
    pub fn is_satisfied_by(&self, installed: &Version) -> bool {
        match &self.min_version {
            Some(min) => installed >= min,
            None => true,
        }
    }
}

impl FromStr for Requirement {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.min_version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}

impl Serialize for Requirement {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Requirement {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Requirement::parse(&s).map_err(serde::de::Error::custom)
    }
}
