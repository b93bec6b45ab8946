//! Per-test precondition gate.
//!
//! Runs collect → classify → policy → install → report for one test before
//! its body executes. An unmet precondition is a skip, not an error; only
//! malformed declarations and broken invariants come back as `Err`.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::audit::{ExerciseLog, ExerciseRecord};
use crate::config::GateConfig;
use crate::environment::PluginEnvironment;
use crate::error::{FixtureError, Result};
use crate::requirements::collector::{collect, TestCase};
use crate::requirements::installer::{install_batch, InstallOutcome};
use crate::requirements::policy::{plan, PolicyDecision};
use crate::requirements::reporter::report;
use crate::requirements::spec::Requirement;
use crate::requirements::status::Classified;

/// Why a test's preconditions could not be met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// An installed plugin is too old and the policy forbids replacing it.
    PolicyConflict { requirement: Requirement },
    /// The environment could not resolve the install batch.
    UnresolvableDependencies { cause: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PolicyConflict { requirement } => {
                write!(f, "Test requires {} plugin", requirement)
            }
            SkipReason::UnresolvableDependencies { cause } => {
                write!(f, "Unable to install required plugins: {}", cause)
            }
        }
    }
}

/// Result of evaluating a test's preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Every requirement is met; the test body may run.
    Proceed { exercised: Vec<ExerciseRecord> },
    /// Preconditions were not met; the test should be reported as skipped.
    Skip(SkipReason),
}

impl GateOutcome {
    /// Whether the test body may run.
    pub fn is_proceed(&self) -> bool {
        matches!(self, GateOutcome::Proceed { .. })
    }
}

/// Result of running a test body behind the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestRun<T> {
    /// The body ran and produced `T`.
    Ran(T),
    /// The body did not run.
    Skipped(SkipReason),
}

/// Guarantees declared plugins are present before a test runs.
///
/// Gates built on the same `Arc<Mutex<E>>` serialize against each other for
/// the whole classify-to-report span, so two tests never race to install
/// into one environment.
pub struct PreconditionGate<'c, E> {
    config: &'c GateConfig,
    environment: Arc<Mutex<E>>,
    log: Arc<dyn ExerciseLog>,
}

impl<'c, E: PluginEnvironment> PreconditionGate<'c, E> {
    /// Create a gate.
    pub fn new(config: &'c GateConfig, environment: Arc<Mutex<E>>, log: Arc<dyn ExerciseLog>) -> Self {
        Self {
            config,
            environment,
            log,
        }
    }

    /// The shared environment.
    pub fn environment(&self) -> &Arc<Mutex<E>> {
        &self.environment
    }

    /// Evaluate the preconditions of `test`.
    pub fn evaluate(&self, test: &TestCase) -> Result<GateOutcome> {
        let requirements = collect(test)?;
        tracing::debug!(
            test = %test.identity(),
            count = requirements.len(),
            "Collected plugin requirements"
        );

        let mut environment = self
            .environment
            .lock()
            .map_err(|_| FixtureError::invariant("environment lock poisoned"))?;

        let classified: Vec<Classified> = requirements
            .iter()
            .map(|requirement| Classified {
                requirement: requirement.clone(),
                status: environment.status(requirement),
            })
            .collect();

        let batch = match plan(&classified, self.config) {
            PolicyDecision::Install(batch) => batch,
            PolicyDecision::Skip(requirement) => {
                let reason = SkipReason::PolicyConflict { requirement };
                tracing::info!(test = %test.identity(), "Skipping: {}", reason);
                return Ok(GateOutcome::Skip(reason));
            }
        };

        if let InstallOutcome::Unresolvable { cause } = install_batch(&mut *environment, &batch) {
            let reason = SkipReason::UnresolvableDependencies { cause };
            tracing::info!(test = %test.identity(), "Skipping: {}", reason);
            return Ok(GateOutcome::Skip(reason));
        }

        let exercised = report(&*environment, self.log.as_ref(), test.identity(), &requirements)?;
        Ok(GateOutcome::Proceed { exercised })
    }

    /// Evaluate the preconditions of `test` and run `body` only if they hold.
    pub fn run<T, F>(&self, test: &TestCase, body: F) -> Result<TestRun<T>>
    where
        F: FnOnce() -> T,
    {
        match self.evaluate(test)? {
            GateOutcome::Proceed { .. } => Ok(TestRun::Ran(body())),
            GateOutcome::Skip(reason) => Ok(TestRun::Skipped(reason)),
        }
    }
}
