//! Target environments that plugins are installed into.
//!
//! The engine only talks to an environment through [`PluginEnvironment`]:
//! query the installed version of a plugin, and install a batch of
//! requirements in one call. Dependency resolution is the environment's job.
//!
//! [`CatalogEnvironment`] is an in-memory implementation backed by a catalog
//! of available plugins, loadable from a YAML snapshot.

pub mod catalog;

pub use catalog::{CatalogEntry, CatalogEnvironment};

use thiserror::Error;

use crate::requirements::{classify, InstallationStatus, Requirement, Version};

/// Failure of a batched install call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallError {
    /// The batch, including transitive dependencies, could not be satisfied.
    #[error("Unable to resolve dependencies: {cause}")]
    DependencyResolution { cause: String },
}

/// A live set of installed plugins.
pub trait PluginEnvironment {
    /// Installed version of `name`, or `None` if absent.
    fn current_version(&self, name: &str) -> Option<Version>;

    /// Classify a requirement against what is installed.
    fn status(&self, requirement: &Requirement) -> InstallationStatus {
        classify(
            requirement,
            self.current_version(&requirement.name).as_ref(),
        )
    }

    /// Install every requirement in `batch`, all or nothing.
    ///
    /// May block for as long as the installation takes.
    fn install(&mut self, batch: &[Requirement]) -> Result<(), InstallError>;
}
