//! Exercised command implementation.
//!
//! The `fixturegate exercised` command shows, per test, which plugin
//! versions it ran against.

use crate::audit::{summarize, ExerciseLog, JsonlExerciseLog};
use crate::cli::args::ExercisedArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The exercised command implementation.
pub struct ExercisedCommand {
    args: ExercisedArgs,
}

impl ExercisedCommand {
    /// Create a new exercised command.
    pub fn new(args: ExercisedArgs) -> Self {
        Self { args }
    }
}

impl Command for ExercisedCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let records = JsonlExerciseLog::new(&self.args.audit_log).records()?;
        let summary = summarize(&records);

        if self.args.json {
            ui.message(&serde_json::to_string_pretty(&summary)?);
            return Ok(CommandResult::success());
        }

        if summary.is_empty() {
            ui.message("No exercised plugins recorded.");
            return Ok(CommandResult::success());
        }

        for test in &summary {
            ui.show_header(&test.test);
            for (plugin, version) in &test.plugins {
                ui.message(&format!("    {} {}", plugin, version));
            }
        }

        Ok(CommandResult::success())
    }
}
