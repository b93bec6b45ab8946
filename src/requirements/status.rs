//! Installation status of a requirement.
//!
//! Each requirement is classified against the environment's currently
//! installed version into one of three [`InstallationStatus`] values.

use std::fmt;

use crate::requirements::spec::Requirement;
use crate::requirements::version::Version;

/// How a requirement relates to what is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallationStatus {
    /// Plugin is not installed at all.
    NotInstalled,

    /// Plugin is installed and meets the minimum version (or none was given).
    UpToDate,

    /// Plugin is installed, but older than the required minimum.
    Outdated,
}

impl fmt::Display for InstallationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstallationStatus::NotInstalled => "not installed",
            InstallationStatus::UpToDate => "up to date",
            InstallationStatus::Outdated => "outdated",
        };
        f.write_str(label)
    }
}

/// Classify `requirement` given the installed version of its plugin.
pub fn classify(requirement: &Requirement, installed: Option<&Version>) -> InstallationStatus {
    match installed {
        None => InstallationStatus::NotInstalled,
        Some(version) if requirement.is_satisfied_by(version) => InstallationStatus::UpToDate,
        Some(_) => InstallationStatus::Outdated,
    }
}

/// A requirement paired with its classification.
#[derive(Debug, Clone)]
pub struct Classified {
    /// The requirement that was checked
    pub requirement: Requirement,
    /// Its status at the time of the check
    pub status: InstallationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn req(s: &str) -> Requirement {
        Requirement::parse(s).unwrap()
    }

    #[test]
    fn absent_is_not_installed() {
        assert_eq!(classify(&req("git"), None), InstallationStatus::NotInstalled);
        assert_eq!(
            classify(&req("git@2.0"), None),
            InstallationStatus::NotInstalled
        );
    }

    #[test]
    fn present_without_minimum_is_up_to_date() {
        assert_eq!(
            classify(&req("git"), Some(&v("0.1"))),
            InstallationStatus::UpToDate
        );
    }

    #[test]
    fn present_at_or_above_minimum_is_up_to_date() {
        assert_eq!(
            classify(&req("git@2.0"), Some(&v("2.0"))),
            InstallationStatus::UpToDate
        );
        assert_eq!(
            classify(&req("git@2.0"), Some(&v("2.0.0"))),
            InstallationStatus::UpToDate
        );
        assert_eq!(
            classify(&req("git@2.0"), Some(&v("3.1"))),
            InstallationStatus::UpToDate
        );
    }

    #[test]
    fn present_below_minimum_is_outdated() {
        assert_eq!(
            classify(&req("git@2.0"), Some(&v("1.9.9"))),
            InstallationStatus::Outdated
        );
        assert_eq!(
            classify(&req("git@2.0"), Some(&v("2.0-beta-1"))),
            InstallationStatus::Outdated
        );
    }

    #[test]
    fn later_beta_meets_earlier_beta_minimum() {
        assert_eq!(
            classify(&req("git@1.0-beta-9"), Some(&v("1.0-beta-10"))),
            InstallationStatus::UpToDate
        );
    }

    #[test]
    fn status_display() {
        assert_eq!(InstallationStatus::Outdated.to_string(), "outdated");
        assert_eq!(InstallationStatus::NotInstalled.to_string(), "not installed");
    }
}
