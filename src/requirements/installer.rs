//! Batched installation of queued requirements.
//!
//! Everything the policy engine queued goes to the environment in one
//! install call, so the environment can resolve dependencies across the
//! whole batch. A resolution failure is not a test failure: the outcome
//! reports it so the caller can skip the test.

use crate::environment::{InstallError, PluginEnvironment};
use crate::requirements::policy::InstallBatch;

/// Result of installing a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Nothing was needed, or the whole batch installed.
    Installed,
    /// The environment could not resolve the batch.
    Unresolvable { cause: String },
}

/// Install `batch` into `environment` with a single call.
pub fn install_batch(
    environment: &mut dyn PluginEnvironment,
    batch: &InstallBatch,
) -> InstallOutcome {
    if batch.is_empty() {
        tracing::info!("All required plugins already installed.");
        return InstallOutcome::Installed;
    }

    tracing::info!("Installing plugins for test: {}", batch);
    match environment.install(&batch.requirements()) {
        Ok(()) => InstallOutcome::Installed,
        Err(InstallError::DependencyResolution { cause }) => {
            tracing::warn!("Unable to install required plugins: {}", cause);
            InstallOutcome::Unresolvable { cause }
        }
    }
}
