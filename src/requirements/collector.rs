//! Requirement collection across declaration scopes.
//!
//! Requirements are declared on a test case and on fixture types. A fixture
//! type's declarations are inherited by every fixture that extends it, so the
//! collector walks test case → fixture → each ancestor up to the root.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::requirements::spec::Requirement;

/// Something requirements can be declared on.
pub trait DeclarationScope {
    /// Requirement texts declared directly on this scope.
    fn declarations(&self) -> &[String];

    /// The scope this one inherits from, or `None` at the root.
    fn parent(&self) -> Option<&dyn DeclarationScope>;
}

/// A fixture type (test suite base) with an explicit parent pointer.
#[derive(Debug, Clone)]
pub struct FixtureType {
    name: String,
    declarations: Vec<String>,
    parent: Option<Arc<FixtureType>>,
}

impl FixtureType {
    /// Create a root fixture type.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            parent: None,
        }
    }

    /// Create a fixture type extending `parent`.
    pub fn extending(name: impl Into<String>, parent: Arc<FixtureType>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            parent: Some(parent),
        }
    }

    /// Declare required plugins on this fixture type.
    pub fn with_plugins<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declarations.extend(specs.into_iter().map(Into::into));
        self
    }

    /// Fixture type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent fixture type, if any.
    pub fn parent_type(&self) -> Option<&Arc<FixtureType>> {
        self.parent.as_ref()
    }
}

impl DeclarationScope for FixtureType {
    fn declarations(&self) -> &[String] {
        &self.declarations
    }

    fn parent(&self) -> Option<&dyn DeclarationScope> {
        self.parent
            .as_deref()
            .map(|p| p as &dyn DeclarationScope)
    }
}

/// Identity of a single test, used to key audit records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestIdentity {
    /// Fully qualified fixture class name
    pub class_name: String,
    /// Test method name
    pub method_name: String,
}

impl TestIdentity {
    /// Create a test identity.
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
        }
    }

    /// Parse `Class.method`, splitting on the last `.`.
    pub fn parse(s: &str) -> Option<Self> {
        let (class_name, method_name) = s.rsplit_once('.')?;
        if class_name.is_empty() || method_name.is_empty() {
            return None;
        }
        Some(Self::new(class_name, method_name))
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_name, self.method_name)
    }
}

/// A test case: its own declarations plus the fixture type it runs in.
#[derive(Debug, Clone)]
pub struct TestCase {
    identity: TestIdentity,
    declarations: Vec<String>,
    fixture: Arc<FixtureType>,
}

impl TestCase {
    /// Create a test case in the given fixture. The identity's class name is
    /// the fixture's name.
    pub fn new(fixture: Arc<FixtureType>, method_name: impl Into<String>) -> Self {
        Self {
            identity: TestIdentity::new(fixture.name(), method_name),
            declarations: Vec::new(),
            fixture,
        }
    }

    /// Declare required plugins on this test case.
    pub fn with_plugins<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declarations.extend(specs.into_iter().map(Into::into));
        self
    }

    /// The test's identity.
    pub fn identity(&self) -> &TestIdentity {
        &self.identity
    }

    /// The fixture type this test belongs to.
    pub fn fixture(&self) -> &Arc<FixtureType> {
        &self.fixture
    }
}

impl DeclarationScope for TestCase {
    fn declarations(&self) -> &[String] {
        &self.declarations
    }

    fn parent(&self) -> Option<&dyn DeclarationScope> {
        let fixture: &FixtureType = &self.fixture;
        Some(fixture)
    }
}

/// Collect requirements from `scope` and every scope it inherits from.
///
/// Order is the scope's own declarations first, then each parent in turn.
/// Repeated names are kept as-is; a later declaration never overrides an
/// earlier one.
pub fn collect(scope: &dyn DeclarationScope) -> Result<Vec<Requirement>> {
    let mut requirements = Vec::new();
    let mut current = Some(scope);

    while let Some(s) = current {
        for spec in s.declarations() {
            requirements.push(Requirement::parse(spec)?);
        }
        current = s.parent();
    }

    Ok(requirements)
}
