//! Check command implementation.
//!
//! The `fixturegate check` command evaluates the plugin preconditions of
//! tests in a suite manifest against an environment snapshot, one test after
//! another on the same environment.

use std::sync::{Arc, Mutex};

use crate::audit::{ExerciseLog, JsonlExerciseLog, MemoryExerciseLog};
use crate::cli::args::CheckArgs;
use crate::config::{load_manifest, GateConfig};
use crate::environment::CatalogEnvironment;
use crate::error::{FixtureError, Result};
use crate::requirements::{GateOutcome, PreconditionGate, TestIdentity};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand<'c> {
    config: &'c GateConfig,
    args: CheckArgs,
}

impl<'c> CheckCommand<'c> {
    /// Create a new check command.
    pub fn new(config: &'c GateConfig, args: CheckArgs) -> Self {
        Self { config, args }
    }

    fn selected_tests(&self) -> Result<Vec<TestIdentity>> {
        self.args
            .tests
            .iter()
            .map(|t| {
                TestIdentity::parse(t).ok_or_else(|| FixtureError::ManifestInvalid {
                    message: format!("'{}' is not of the form Class.method", t),
                })
            })
            .collect()
    }

    fn open_log(&self) -> Arc<dyn ExerciseLog> {
        match &self.args.audit_log {
            Some(path) => Arc::new(JsonlExerciseLog::new(path)),
            None => Arc::new(MemoryExerciseLog::new()),
        }
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let manifest = load_manifest(&self.args.manifest)?;
        let selected = self.selected_tests()?;
        let cases = if selected.is_empty() {
            manifest.test_cases()?
        } else {
            manifest.select(&selected)?
        };

        let environment = Arc::new(Mutex::new(CatalogEnvironment::load(
            &self.args.environment,
        )?));
        let gate = PreconditionGate::new(self.config, Arc::clone(&environment), self.open_log());

        if self.config.never_replace_existing {
            ui.show_header("Plugin preconditions (never replacing installed plugins)");
        } else {
            ui.show_header("Plugin preconditions");
        }

        let mut ready = 0;
        let mut skipped = 0;
        for case in &cases {
            match gate.evaluate(case)? {
                GateOutcome::Proceed { exercised } => {
                    ready += 1;
                    ui.success(&format!("{}: ready", case.identity()));
                    if ui.output_mode().shows_detail() {
                        for record in &exercised {
                            ui.message(&format!("    {} {}", record.plugin, record.version));
                        }
                    }
                }
                GateOutcome::Skip(reason) => {
                    skipped += 1;
                    ui.skipped(&format!("{}: skipped ({})", case.identity(), reason));
                }
            }
        }

        ui.message(&format!("{} ready, {} skipped", ready, skipped));

        if self.args.save {
            let env = environment
                .lock()
                .map_err(|_| FixtureError::invariant("environment lock poisoned"))?;
            env.save(&self.args.environment)?;
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
fixtures:
  Base:
    plugins: ["alpha"]
tests:
  - class: Base
    method: one
    plugins: ["beta@2.1.0"]
  - class: Base
    method: two
    plugins: ["ghost"]
"#;

    const ENVIRONMENT: &str = r#"
installed:
  alpha: "1.4"
catalog:
  beta:
    version: "2.2"
"#;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("suite.yml");
        let environment = temp.path().join("env.yml");
        fs::write(&manifest, MANIFEST).unwrap();
        fs::write(&environment, ENVIRONMENT).unwrap();
        (temp, manifest, environment)
    }

    fn args(manifest: PathBuf, environment: PathBuf) -> CheckArgs {
        CheckArgs {
            manifest,
            environment,
            tests: vec![],
            audit_log: None,
            never_replace: false,
            save: false,
        }
    }

    #[test]
    fn reports_ready_and_skipped_tests() {
        let (_temp, manifest, environment) = setup();
        let config = GateConfig::default();
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        let result = CheckCommand::new(&config, args(manifest, environment))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("Base.one: ready"));
        assert!(ui.has_message("beta 2.2"));
        assert!(ui.has_skip("Base.two: skipped"));
        assert!(ui.has_message("1 ready, 1 skipped"));
    }

    #[test]
    fn selected_tests_only() {
        let (_temp, manifest, environment) = setup();
        let config = GateConfig::default();
        let mut ui = MockUI::new();
        let mut check_args = args(manifest, environment);
        check_args.tests = vec!["Base.two".to_string()];

        CheckCommand::new(&config, check_args)
            .execute(&mut ui)
            .unwrap();

        assert!(ui.successes().is_empty());
        assert_eq!(ui.skips().len(), 1);
    }

    #[test]
    fn invalid_test_name_is_error() {
        let (_temp, manifest, environment) = setup();
        let config = GateConfig::default();
        let mut check_args = args(manifest, environment);
        check_args.tests = vec!["nodot".to_string()];

        let err = CheckCommand::new(&config, check_args)
            .execute(&mut MockUI::new())
            .unwrap_err();
        assert!(matches!(err, FixtureError::ManifestInvalid { .. }));
    }

    #[test]
    fn save_writes_installed_plugins_back() {
        let (_temp, manifest, environment) = setup();
        let config = GateConfig::default();
        let mut check_args = args(manifest, environment.clone());
        check_args.save = true;

        CheckCommand::new(&config, check_args)
            .execute(&mut MockUI::new())
            .unwrap();

        let reloaded = CatalogEnvironment::load(&environment).unwrap();
        assert!(reloaded.installed().contains_key("beta"));
    }

    #[test]
    fn audit_log_is_written() {
        let (temp, manifest, environment) = setup();
        let config = GateConfig::default();
        let log_path = temp.path().join("exercised.jsonl");
        let mut check_args = args(manifest, environment);
        check_args.audit_log = Some(log_path.clone());

        CheckCommand::new(&config, check_args)
            .execute(&mut MockUI::new())
            .unwrap();

        let records = JsonlExerciseLog::new(log_path).records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].test, "Base.one");
    }
}
