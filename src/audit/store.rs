//! Exercise log storage.
//!
//! Two implementations of [`ExerciseLog`]: an in-memory log for a single
//! process, and a JSONL file log that other tools can read after the run.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;

use super::ExerciseRecord;
use crate::error::{FixtureError, Result};

/// Append-only log of exercised plugin versions.
///
/// Shared by every gate in the process, so appends must be safe from
/// multiple threads.
pub trait ExerciseLog: Send + Sync {
    /// Append a record.
    fn record(&self, record: ExerciseRecord) -> Result<()>;

    /// All records, in append order.
    fn records(&self) -> Result<Vec<ExerciseRecord>>;
}

fn poisoned() -> FixtureError {
    FixtureError::invariant("exercise log lock poisoned")
}

/// Exercise log held in memory.
#[derive(Debug, Default)]
pub struct MemoryExerciseLog {
    records: Mutex<Vec<ExerciseRecord>>,
}

impl MemoryExerciseLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExerciseLog for MemoryExerciseLog {
    fn record(&self, record: ExerciseRecord) -> Result<()> {
        self.records.lock().map_err(|_| poisoned())?.push(record);
        Ok(())
    }

    fn records(&self) -> Result<Vec<ExerciseRecord>> {
        Ok(self.records.lock().map_err(|_| poisoned())?.clone())
    }
}

/// Exercise log stored as one JSON object per line.
#[derive(Debug)]
pub struct JsonlExerciseLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlExerciseLog {
    /// Create a log at `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the log path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }
        Ok(())
    }
}

impl ExerciseLog for JsonlExerciseLog {
    fn record(&self, record: ExerciseRecord) -> Result<()> {
        let line = serde_json::to_string(&record)?;

        let _guard = self.write_lock.lock().map_err(|_| poisoned())?;
        self.ensure_dir()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {:?}", self.path))?;
        writeln!(file, "{}", line)?;

        Ok(())
    }

    fn records(&self) -> Result<Vec<ExerciseRecord>> {
        let _guard = self.write_lock.lock().map_err(|_| poisoned())?;
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{TestIdentity, Version};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn record(method: &str, plugin: &str) -> ExerciseRecord {
        ExerciseRecord::new(
            &TestIdentity::new("Suite", method),
            plugin,
            Version::parse("1.0").unwrap(),
        )
    }

    #[test]
    fn memory_log_keeps_append_order() {
        let log = MemoryExerciseLog::new();
        log.record(record("a", "git")).unwrap();
        log.record(record("b", "svn")).unwrap();

        let records = log.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].plugin, "git");
        assert_eq!(records[1].plugin, "svn");
    }

    #[test]
    fn jsonl_log_save_and_load() {
        let temp = TempDir::new().unwrap();
        let log = JsonlExerciseLog::new(temp.path().join("nested/exercised.jsonl"));

        log.record(record("a", "git")).unwrap();
        log.record(record("a", "credentials")).unwrap();

        let records = log.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].plugin, "credentials");
        assert_eq!(records[0].test, "Suite.a");
    }

    #[test]
    fn jsonl_log_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let log = JsonlExerciseLog::new(temp.path().join("none.jsonl"));
        assert!(log.records().unwrap().is_empty());
    }

    #[test]
    fn jsonl_log_appends_across_instances() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("exercised.jsonl");

        JsonlExerciseLog::new(&path).record(record("a", "git")).unwrap();
        JsonlExerciseLog::new(&path).record(record("b", "git")).unwrap();

        assert_eq!(JsonlExerciseLog::new(&path).records().unwrap().len(), 2);
    }

    #[test]
    fn jsonl_log_rejects_corrupt_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("exercised.jsonl");
        std::fs::write(&path, "{not json}\n").unwrap();
        let err = JsonlExerciseLog::new(&path).records().unwrap_err();
        assert!(matches!(err, FixtureError::Json(_)));
    }

    #[test]
    fn concurrent_appends_are_not_lost() {
        let temp = TempDir::new().unwrap();
        let logs: Vec<Arc<dyn ExerciseLog>> = vec![
            Arc::new(MemoryExerciseLog::new()),
            Arc::new(JsonlExerciseLog::new(temp.path().join("exercised.jsonl"))),
        ];

        for log in logs {
            let handles: Vec<_> = (0..8)
                .map(|t| {
                    let log = Arc::clone(&log);
                    std::thread::spawn(move || {
                        for i in 0..25 {
                            log.record(record(&format!("t{}", t), &format!("p{}", i)))
                                .unwrap();
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
            assert_eq!(log.records().unwrap().len(), 200);
        }
    }

    #[test]
    fn jsonl_reads_during_appends_see_whole_lines() {
        let temp = TempDir::new().unwrap();
        let log = Arc::new(JsonlExerciseLog::new(temp.path().join("exercised.jsonl")));

        let writer = {
            let log = Arc::clone(&log);
            std::thread::spawn(move || {
                for i in 0..200 {
                    log.record(record("writer", &format!("plugin-{}", i))).unwrap();
                }
            })
        };

        let mut last = 0;
        while !writer.is_finished() {
            let seen = log.records().unwrap().len();
            assert!(seen >= last);
            last = seen;
        }
        writer.join().unwrap();
        assert_eq!(log.records().unwrap().len(), 200);
    }
}
