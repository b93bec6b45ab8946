//! Configuration for the precondition engine.
//!
//! This module handles:
//! - The process-wide replacement policy in [`GateConfig`]
//! - Suite manifests declaring fixture types and tests in [`manifest`]
//!
//! # Example
//!
//! ```
//! use fixturegate::config::{GateConfig, NEVER_REPLACE_ENV_VAR};
//!
//! let config = GateConfig::from_env_with(|key| {
//!     if key == NEVER_REPLACE_ENV_VAR {
//!         Ok("true".to_string())
//!     } else {
//!         Err(std::env::VarError::NotPresent)
//!     }
//! });
//! assert!(config.never_replace_existing);
//! ```

pub mod manifest;

pub use manifest::{load_manifest, parse_manifest, SuiteManifest};

use crate::error::{FixtureError, Result};
use std::fs;
use std::path::Path;

/// Environment variable that forbids replacing already-installed plugins.
///
/// Its presence alone matters; the value is ignored.
pub const NEVER_REPLACE_ENV_VAR: &str = "NEVER_REPLACE_EXISTING_PLUGINS";

/// Process-wide engine configuration.
///
/// Built once at startup and shared by reference with every gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateConfig {
    /// When set, a test whose plugin is installed in too old a version is
    /// skipped instead of having the plugin overwritten.
    pub never_replace_existing: bool,
}

impl GateConfig {
    /// Read the policy from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_with(|key: &str| std::env::var(key))
    }

    /// Read the policy with a custom env var lookup function.
    ///
    /// This allows testing without modifying actual environment variables.
    pub fn from_env_with<F>(env_fn: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let never_replace_existing = match env_fn(NEVER_REPLACE_ENV_VAR) {
            Ok(_) => true,
            Err(std::env::VarError::NotUnicode(_)) => true,
            Err(std::env::VarError::NotPresent) => false,
        };

        tracing::debug!(never_replace_existing, "Loaded gate configuration");
        Self {
            never_replace_existing,
        }
    }
}

/// Read a YAML file, mapping a missing file to `ConfigNotFound`.
pub(crate) fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FixtureError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FixtureError::Io(e)
        }
    })
}
