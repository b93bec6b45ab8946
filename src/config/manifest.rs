//! Suite manifests.
//!
//! A manifest declares fixture types (with optional `extends`) and the tests
//! that run in them, each with its plugin requirements.
//!
//! ```yaml
//! fixtures:
//!   AbstractJUnitTest:
//!     plugins: []
//!   ScmTest:
//!     extends: AbstractJUnitTest
//!     plugins: ["git@2.0"]
//! tests:
//!   - class: ScmTest
//!     method: checkout
//!     plugins: ["credentials"]
//! ```
//!
//! Requirement texts are kept verbatim here and parsed during collection.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use crate::config::read_config_file;
use crate::error::{FixtureError, Result};
use crate::requirements::{FixtureType, TestCase, TestIdentity};

/// A fixture type entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureEntry {
    /// Name of the fixture type this one extends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Requirement texts declared on this fixture type.
    #[serde(default)]
    pub plugins: Vec<String>,
}

/// A test entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEntry {
    /// Fixture type the test runs in.
    pub class: String,
    /// Test method name.
    pub method: String,
    /// Requirement texts declared on the test itself.
    #[serde(default)]
    pub plugins: Vec<String>,
}

/// Parsed suite manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteManifest {
    #[serde(default)]
    pub fixtures: BTreeMap<String, FixtureEntry>,
    #[serde(default)]
    pub tests: Vec<TestEntry>,
}

impl SuiteManifest {
    /// Build every test case, wiring each fixture to its parent.
    ///
    /// Fails if a test names an undeclared fixture, a fixture extends an
    /// undeclared fixture, or the `extends` chain loops.
    pub fn test_cases(&self) -> Result<Vec<TestCase>> {
        let mut built = HashMap::new();
        let mut cases = Vec::with_capacity(self.tests.len());

        for test in &self.tests {
            let fixture = self.build_fixture(&test.class, &mut built, &mut Vec::new())?;
            cases.push(TestCase::new(fixture, &test.method).with_plugins(test.plugins.clone()));
        }

        Ok(cases)
    }

    /// Build the test cases whose identity is in `selected`, in manifest order.
    pub fn select(&self, selected: &[TestIdentity]) -> Result<Vec<TestCase>> {
        let cases = self.test_cases()?;
        for id in selected {
            if !cases.iter().any(|c| c.identity() == id) {
                return Err(FixtureError::ManifestInvalid {
                    message: format!("no test named '{}'", id),
                });
            }
        }
        Ok(cases
            .into_iter()
            .filter(|c| selected.contains(c.identity()))
            .collect())
    }

    fn build_fixture(
        &self,
        name: &str,
        built: &mut HashMap<String, Arc<FixtureType>>,
        visiting: &mut Vec<String>,
    ) -> Result<Arc<FixtureType>> {
        if let Some(fixture) = built.get(name) {
            return Ok(Arc::clone(fixture));
        }

        if visiting.iter().any(|v| v == name) {
            visiting.push(name.to_string());
            return Err(FixtureError::ManifestInvalid {
                message: format!("fixture inheritance cycle: {}", visiting.join(" -> ")),
            });
        }

        let entry = self
            .fixtures
            .get(name)
            .ok_or_else(|| FixtureError::ManifestInvalid {
                message: format!("unknown fixture type '{}'", name),
            })?;

        visiting.push(name.to_string());
        let fixture = match &entry.extends {
            Some(parent_name) => {
                let parent = self.build_fixture(parent_name, built, visiting)?;
                FixtureType::extending(name, parent)
            }
            None => FixtureType::root(name),
        }
        .with_plugins(entry.plugins.clone());
        visiting.pop();

        let fixture = Arc::new(fixture);
        built.insert(name.to_string(), Arc::clone(&fixture));
        Ok(fixture)
    }
}

/// Load a suite manifest from a YAML file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist and
/// `ConfigParseError` if it isn't a valid manifest.
pub fn load_manifest(path: &Path) -> Result<SuiteManifest> {
    let content = read_config_file(path)?;
    parse_manifest(&content, path)
}

/// Parse YAML content into a [`SuiteManifest`].
pub fn parse_manifest(content: &str, source_path: &Path) -> Result<SuiteManifest> {
    serde_yaml::from_str(content).map_err(|e| FixtureError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
