//! Exercised-plugin audit log.
//!
//! Every test that passes its plugin preconditions leaves one record per
//! declared requirement, naming the version it actually ran against. The log
//! only grows; reporting happens after the run.

mod record;
mod store;

pub use record::ExerciseRecord;
pub use store::{ExerciseLog, JsonlExerciseLog, MemoryExerciseLog};

use serde::Serialize;
use std::collections::BTreeMap;

/// Plugin versions exercised by one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestSummary {
    /// Test identity as `Class.method`.
    pub test: String,
    /// `(plugin, version)` pairs in record order.
    pub plugins: Vec<(String, String)>,
}

/// Group records by test, tests sorted by name.
pub fn summarize(records: &[ExerciseRecord]) -> Vec<TestSummary> {
    let mut by_test: BTreeMap<&str, Vec<(String, String)>> = BTreeMap::new();
    for record in records {
        by_test
            .entry(record.test.as_str())
            .or_default()
            .push((record.plugin.clone(), record.version.to_string()));
    }

    by_test
        .into_iter()
        .map(|(test, plugins)| TestSummary {
            test: test.to_string(),
            plugins,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{TestIdentity, Version};

    #[test]
    fn summarize_groups_by_test() {
        let a = TestIdentity::new("Suite", "a");
        let b = TestIdentity::new("Suite", "b");
        let records = vec![
            ExerciseRecord::new(&b, "git", Version::parse("4.0").unwrap()),
            ExerciseRecord::new(&a, "svn", Version::parse("2.1").unwrap()),
            ExerciseRecord::new(&b, "credentials", Version::parse("1.0").unwrap()),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].test, "Suite.a");
        assert_eq!(
            summary[1].plugins,
            vec![
                ("git".to_string(), "4.0".to_string()),
                ("credentials".to_string(), "1.0".to_string())
            ]
        );
    }

    #[test]
    fn summarize_empty() {
        assert!(summarize(&[]).is_empty());
    }
}
