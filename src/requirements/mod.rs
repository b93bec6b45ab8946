//! Plugin requirements and the per-test precondition pipeline.
//!
//! A test declares the plugins it needs, on itself or on any fixture type it
//! inherits from. Before the test runs, the [`PreconditionGate`] makes sure
//! each one is installed in at least the declared version.
//!
//! # Modules
//!
//! - [`version`] - Ordered plugin versions
//! - [`spec`] - `name` / `name@version` requirement parsing
//! - [`collector`] - Walking test case and fixture scopes for declarations
//! - [`status`] - Classifying a requirement against what is installed
//! - [`policy`] - Deciding between install, replace, and skip
//! - [`installer`] - Batched installation
//! - [`reporter`] - Recording exercised plugin versions
//! - [`gate`] - The full pipeline for one test
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use fixturegate::audit::MemoryExerciseLog;
//! use fixturegate::config::GateConfig;
//! use fixturegate::environment::CatalogEnvironment;
//! use fixturegate::requirements::{FixtureType, GateOutcome, PreconditionGate, TestCase, Version};
//!
//! let env = CatalogEnvironment::new()
//!     .with_available("git", Version::parse("4.0").unwrap(), vec![]);
//! let config = GateConfig::default();
//! let gate = PreconditionGate::new(
//!     &config,
//!     Arc::new(Mutex::new(env)),
//!     Arc::new(MemoryExerciseLog::new()),
//! );
//!
//! let fixture = Arc::new(FixtureType::root("GitTest").with_plugins(["git@3.0"]));
//! let outcome = gate.evaluate(&TestCase::new(fixture, "clone")).unwrap();
//! assert!(outcome.is_proceed());
//! ```

pub mod collector;
pub mod gate;
pub mod installer;
pub mod policy;
pub mod reporter;
pub mod spec;
pub mod status;
pub mod version;

pub use collector::{collect, DeclarationScope, FixtureType, TestCase, TestIdentity};
pub use gate::{GateOutcome, PreconditionGate, SkipReason, TestRun};
pub use installer::{install_batch, InstallOutcome};
pub use policy::{plan, InstallAction, InstallBatch, PlannedInstall, PolicyDecision};
pub use reporter::report;
pub use spec::Requirement;
pub use status::{classify, Classified, InstallationStatus};
pub use version::Version;
