//! fixturegate CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use fixturegate::cli::{Cli, CommandDispatcher, Commands};
use fixturegate::config::GateConfig;
use fixturegate::ui::{OutputMode, TerminalUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN, so engine chatter stays out of command output
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("fixturegate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fixturegate=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Build the process-wide configuration once.
///
/// `--never-replace` on `check` turns the policy on in addition to the
/// environment variable.
fn gate_config(cli: &Cli) -> GateConfig {
    let mut config = GateConfig::from_env();
    if let Commands::Check(args) = &cli.command {
        config.never_replace_existing |= args.never_replace;
    }
    config
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("fixturegate starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Silent
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = TerminalUI::new(output_mode);
    let config = gate_config(&cli);
    let dispatcher = CommandDispatcher::new(&config);

    match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
