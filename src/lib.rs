//! fixturegate - Plugin preconditions for acceptance-test fixtures.
//!
//! Before a test runs against a shared server, fixturegate makes sure every
//! plugin the test (or any fixture it inherits from) declares is installed
//! in at least the declared version. Outdated plugins are replaced or the
//! test is skipped, depending on a process-wide policy, and the versions
//! each test actually ran against are recorded for later reporting.
//!
//! # Modules
//!
//! - [`audit`] - Append-only log of exercised plugin versions
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Replacement policy and suite manifests
//! - [`environment`] - Plugin environments the engine installs into
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Requirement parsing and the per-test pipeline
//! - [`ui`] - Terminal output

pub mod audit;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod requirements;
pub mod ui;

pub use error::{FixtureError, Result};
