//! Recording which plugin versions a test exercised.

use crate::audit::{ExerciseLog, ExerciseRecord};
use crate::environment::PluginEnvironment;
use crate::error::{FixtureError, Result};
use crate::requirements::collector::TestIdentity;
use crate::requirements::spec::Requirement;

/// Append one record per requirement with the version now installed.
///
/// Runs only after every requirement is known to be present, so a missing
/// plugin here is an invariant violation rather than a skip. Every version is
/// looked up before the first append; on error the log is left untouched.
pub fn report(
    environment: &dyn PluginEnvironment,
    log: &dyn ExerciseLog,
    test: &TestIdentity,
    requirements: &[Requirement],
) -> Result<Vec<ExerciseRecord>> {
    let exercised = requirements
        .iter()
        .map(|requirement| {
            environment
                .current_version(&requirement.name)
                .map(|version| ExerciseRecord::new(test, &requirement.name, version))
                .ok_or_else(|| {
                    FixtureError::invariant(format!(
                        "plugin '{}' reported installed but is absent",
                        requirement.name
                    ))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    for record in &exercised {
        log.record(record.clone())?;
    }

    tracing::debug!(test = %test, count = exercised.len(), "Recorded exercised plugins");
    Ok(exercised)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryExerciseLog;
    use crate::environment::CatalogEnvironment;
    use crate::requirements::Version;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn records_current_versions_in_order() {
        let env = CatalogEnvironment::new()
            .with_installed("alpha", v("1.7"))
            .with_installed("beta", v("2.3"));
        let log = MemoryExerciseLog::new();
        let test = TestIdentity::new("Suite", "t");
        let reqs = vec![
            Requirement::parse("beta@2.1.0").unwrap(),
            Requirement::parse("alpha").unwrap(),
        ];

        let exercised = report(&env, &log, &test, &reqs).unwrap();

        assert_eq!(exercised.len(), 2);
        let records = log.records().unwrap();
        assert_eq!(records[0].plugin, "beta");
        assert_eq!(records[0].version, v("2.3"));
        assert_eq!(records[1].plugin, "alpha");
        assert_eq!(records[1].test, "Suite.t");
    }

    #[test]
    fn duplicate_requirements_give_duplicate_records() {
        let env = CatalogEnvironment::new().with_installed("git", v("4.0"));
        let log = MemoryExerciseLog::new();
        let reqs = vec![
            Requirement::parse("git@3.0").unwrap(),
            Requirement::parse("git").unwrap(),
        ];

        report(&env, &log, &TestIdentity::new("S", "t"), &reqs).unwrap();
        assert_eq!(log.records().unwrap().len(), 2);
    }

    #[test]
    fn absent_plugin_is_invariant_violation() {
        let env = CatalogEnvironment::new().with_installed("alpha", v("1.0"));
        let log = MemoryExerciseLog::new();
        let reqs = vec![
            Requirement::parse("alpha").unwrap(),
            Requirement::parse("ghost").unwrap(),
        ];

        let err = report(&env, &log, &TestIdentity::new("S", "t"), &reqs).unwrap_err();
        assert!(matches!(err, FixtureError::InvariantViolation { .. }));
        assert!(log.records().unwrap().is_empty());
    }
}
