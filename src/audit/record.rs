//! Exercise record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::requirements::{TestIdentity, Version};

/// Which plugin version a test actually ran against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Test identity, as `Class.method`.
    pub test: String,
    /// Plugin name.
    pub plugin: String,
    /// Installed version at the time the test started.
    pub version: Version,
    /// When the record was written.
    pub recorded_at: DateTime<Utc>,
}

impl ExerciseRecord {
    /// Create a record stamped with the current time.
    pub fn new(test: &TestIdentity, plugin: impl Into<String>, version: Version) -> Self {
        Self {
            test: test.to_string(),
            plugin: plugin.into(),
            version,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keys_by_test_identity() {
        let id = TestIdentity::new("core.FreestyleJobTest", "disableJob");
        let record = ExerciseRecord::new(&id, "git", Version::parse("4.2").unwrap());
        assert_eq!(record.test, "core.FreestyleJobTest.disableJob");
        assert_eq!(record.plugin, "git");
    }

    #[test]
    fn record_serialization() {
        let id = TestIdentity::new("A", "b");
        let record = ExerciseRecord::new(&id, "git", Version::parse("4.2").unwrap());

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"version\":\"4.2\""));
        let parsed: ExerciseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
