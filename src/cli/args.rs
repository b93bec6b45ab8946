//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// fixturegate - Plugin preconditions for acceptance-test fixtures.
#[derive(Debug, Parser)]
#[command(name = "fixturegate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show the exercised version of every plugin
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate plugin preconditions of tests against an environment
    Check(CheckArgs),

    /// Show plugin versions exercised per test
    Exercised(ExercisedArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Suite manifest declaring fixture types and tests
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Environment snapshot (installed plugins and catalog)
    #[arg(short, long)]
    pub environment: PathBuf,

    /// Only evaluate these tests (`Class.method`); repeatable
    #[arg(short, long = "test")]
    pub tests: Vec<String>,

    /// Append exercised plugin records to this JSONL file
    #[arg(long)]
    pub audit_log: Option<PathBuf>,

    /// Skip tests instead of replacing outdated plugins
    /// (also enabled by NEVER_REPLACE_EXISTING_PLUGINS)
    #[arg(long)]
    pub never_replace: bool,

    /// Write the resulting environment back to the snapshot file
    #[arg(long)]
    pub save: bool,
}

/// Arguments for the `exercised` command.
#[derive(Debug, Clone, Args)]
pub struct ExercisedArgs {
    /// JSONL audit log written by `check`
    #[arg(long)]
    pub audit_log: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_with_repeated_tests() {
        let cli = Cli::parse_from([
            "fixturegate",
            "check",
            "-m",
            "suite.yml",
            "-e",
            "env.yml",
            "--test",
            "A.one",
            "--test",
            "B.two",
            "--never-replace",
        ]);
        let Commands::Check(args) = cli.command else {
            panic!("Expected Check command");
        };
        assert_eq!(args.tests, vec!["A.one", "B.two"]);
        assert!(args.never_replace);
        assert!(!args.save);
    }

    #[test]
    fn parses_exercised_with_global_flags() {
        let cli = Cli::parse_from(["fixturegate", "exercised", "--audit-log", "x.jsonl", "--debug"]);
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::Exercised(ref a) if !a.json));
    }

    #[test]
    fn check_requires_manifest() {
        assert!(Cli::try_parse_from(["fixturegate", "check", "-e", "env.yml"]).is_err());
    }
}
