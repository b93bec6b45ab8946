//! In-memory environment backed by a plugin catalog.
//!
//! Installing a plugin takes the catalog's version and pulls in any
//! dependency that is missing or too old. Resolution happens before anything
//! is changed, so a failed install leaves the environment untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::read_config_file;
use crate::environment::{InstallError, PluginEnvironment};
use crate::error::{FixtureError, Result};
use crate::requirements::{Requirement, Version};

/// A plugin available for installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Version the catalog offers.
    pub version: Version,
    /// Plugins this one needs, as requirement specs.
    #[serde(default)]
    pub dependencies: Vec<Requirement>,
}

/// Installed plugins plus the catalog new ones come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogEnvironment {
    #[serde(default)]
    installed: BTreeMap<String, Version>,
    #[serde(default)]
    catalog: BTreeMap<String, CatalogEntry>,
    #[serde(skip)]
    install_calls: usize,
}

impl CatalogEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as installed at `version`.
    pub fn with_installed(mut self, name: impl Into<String>, version: Version) -> Self {
        self.installed.insert(name.into(), version);
        self
    }

    /// Offer `name` at `version` in the catalog.
    pub fn with_available(
        mut self,
        name: impl Into<String>,
        version: Version,
        dependencies: Vec<Requirement>,
    ) -> Self {
        self.catalog.insert(
            name.into(),
            CatalogEntry {
                version,
                dependencies,
            },
        );
        self
    }

    /// Installed plugins and their versions.
    pub fn installed(&self) -> &BTreeMap<String, Version> {
        &self.installed
    }

    /// Number of `install` calls made so far, successful or not.
    pub fn install_calls(&self) -> usize {
        self.install_calls
    }

    /// Load an environment snapshot from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_config_file(path)?;
        serde_yaml::from_str(&content).map_err(|e| FixtureError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write the current state back as a YAML snapshot.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).map_err(anyhow::Error::from)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve a requested plugin and whatever it transitively needs.
    fn resolve(
        &self,
        requirement: &Requirement,
        plan: &mut BTreeMap<String, Version>,
    ) -> std::result::Result<(), InstallError> {
        let entry = self.catalog.get(&requirement.name).ok_or_else(|| {
            InstallError::DependencyResolution {
                cause: format!(
                    "plugin '{}' is not available in the update center",
                    requirement.name
                ),
            }
        })?;

        if !requirement.is_satisfied_by(&entry.version) {
            return Err(InstallError::DependencyResolution {
                cause: format!(
                    "{} required but the update center only offers {}",
                    requirement, entry.version
                ),
            });
        }

        if plan.contains_key(&requirement.name) {
            return Ok(());
        }
        plan.insert(requirement.name.clone(), entry.version.clone());

        for dep in &entry.dependencies {
            let satisfied = self
                .installed
                .get(&dep.name)
                .is_some_and(|v| dep.is_satisfied_by(v));
            if !satisfied {
                self.resolve(dep, plan)?;
            }
        }

        Ok(())
    }
}

impl PluginEnvironment for CatalogEnvironment {
    fn current_version(&self, name: &str) -> Option<Version> {
        self.installed.get(name).cloned()
    }

    fn install(&mut self, batch: &[Requirement]) -> std::result::Result<(), InstallError> {
        self.install_calls += 1;

        let mut plan = BTreeMap::new();
        for requirement in batch {
            self.resolve(requirement, &mut plan)?;
        }

        for (name, version) in plan {
            tracing::debug!(plugin = %name, version = %version, "Installing plugin");
            self.installed.insert(name, version);
        }
        Ok(())
    }
}
