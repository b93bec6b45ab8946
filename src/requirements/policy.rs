//! Replace-or-skip policy for classified requirements.
//!
//! Decides, per requirement, whether it is already met, must be installed,
//! or makes the whole test pointless under the configured policy. Pure: no
//! environment access happens here.

use std::fmt;

use crate::config::GateConfig;
use crate::requirements::spec::Requirement;
use crate::requirements::status::{Classified, InstallationStatus};

/// Why a requirement is in the install batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAction {
    /// Plugin is absent and will be installed.
    FreshInstall,
    /// Installed plugin is too old and will be overwritten.
    Replace,
}

/// A requirement queued for installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedInstall {
    /// The requirement to satisfy
    pub requirement: Requirement,
    /// Whether this installs fresh or overwrites
    pub action: InstallAction,
}

/// Requirements to hand to the environment in a single install call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallBatch {
    entries: Vec<PlannedInstall>,
}

impl InstallBatch {
    /// Queue a requirement.
    pub fn push(&mut self, requirement: Requirement, action: InstallAction) {
        self.entries.push(PlannedInstall {
            requirement,
            action,
        });
    }

    /// Whether nothing needs installing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of queued requirements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Queued entries in collector order.
    pub fn entries(&self) -> &[PlannedInstall] {
        &self.entries
    }

    /// The queued requirements, in order.
    pub fn requirements(&self) -> Vec<Requirement> {
        self.entries.iter().map(|e| e.requirement.clone()).collect()
    }
}

impl fmt::Display for InstallBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let specs: Vec<String> = self
            .entries
            .iter()
            .map(|e| e.requirement.to_string())
            .collect();
        write!(f, "[{}]", specs.join(", "))
    }
}

/// What the policy engine decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Proceed to installation (the batch may be empty).
    Install(InstallBatch),
    /// An installed plugin is too old and must not be replaced.
    Skip(Requirement),
}

/// Apply the replacement policy to classified requirements.
///
/// Stops at the first outdated requirement when the policy forbids
/// replacing existing plugins.
pub fn plan(classified: &[Classified], config: &GateConfig) -> PolicyDecision {
    let mut batch = InstallBatch::default();

    for entry in classified {
        match entry.status {
            InstallationStatus::UpToDate => {}
            InstallationStatus::Outdated => {
                if config.never_replace_existing {
                    return PolicyDecision::Skip(entry.requirement.clone());
                }
                batch.push(entry.requirement.clone(), InstallAction::Replace);
            }
            InstallationStatus::NotInstalled => {
                tracing::info!("{} is not installed", entry.requirement);
                batch.push(entry.requirement.clone(), InstallAction::FreshInstall);
            }
        }
    }

    PolicyDecision::Install(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(spec: &str, status: InstallationStatus) -> Classified {
        Classified {
            requirement: Requirement::parse(spec).unwrap(),
            status,
        }
    }

    fn replace() -> GateConfig {
        GateConfig::default()
    }

    fn never_replace() -> GateConfig {
        GateConfig {
            never_replace_existing: true,
        }
    }

    #[test]
    fn up_to_date_is_dropped() {
        let input = vec![classified("alpha", InstallationStatus::UpToDate)];
        assert_eq!(
            plan(&input, &replace()),
            PolicyDecision::Install(InstallBatch::default())
        );
    }

    #[test]
    fn not_installed_is_fresh_install() {
        let input = vec![classified("beta@2.1.0", InstallationStatus::NotInstalled)];
        let PolicyDecision::Install(batch) = plan(&input, &never_replace()) else {
            panic!("Expected Install");
        };
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.entries()[0].action, InstallAction::FreshInstall);
    }

    #[test]
    fn outdated_is_replaced_when_allowed() {
        let input = vec![classified("git@2.0", InstallationStatus::Outdated)];
        let PolicyDecision::Install(batch) = plan(&input, &replace()) else {
            panic!("Expected Install");
        };
        assert_eq!(batch.entries()[0].action, InstallAction::Replace);
    }

    #[test]
    fn outdated_skips_under_never_replace() {
        let input = vec![
            classified("alpha", InstallationStatus::NotInstalled),
            classified("git@2.0", InstallationStatus::Outdated),
            classified("svn@1.54", InstallationStatus::Outdated),
        ];
        assert_eq!(
            plan(&input, &never_replace()),
            PolicyDecision::Skip(Requirement::parse("git@2.0").unwrap())
        );
    }

    #[test]
    fn batch_preserves_collector_order() {
        let input = vec![
            classified("c", InstallationStatus::NotInstalled),
            classified("a", InstallationStatus::UpToDate),
            classified("b@1.0", InstallationStatus::Outdated),
            classified("c", InstallationStatus::NotInstalled),
        ];
        let PolicyDecision::Install(batch) = plan(&input, &replace()) else {
            panic!("Expected Install");
        };
        assert_eq!(batch.to_string(), "[c, b@1.0, c]");
    }

    #[test]
    fn empty_input_gives_empty_batch() {
        let PolicyDecision::Install(batch) = plan(&[], &never_replace()) else {
            panic!("Expected Install");
        };
        assert!(batch.is_empty());
    }
}
