//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    skips: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MockUI with the given output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Plain messages, in order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Success messages, in order.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Skipped-test messages, in order.
    pub fn skips(&self) -> &[String] {
        &self.skips
    }

    /// Error messages, in order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Headers shown, in order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Whether any message contains `msg`.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Whether any success message contains `msg`.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Whether any skip message contains `msg`.
    pub fn has_skip(&self, msg: &str) -> bool {
        self.skips.iter().any(|m| m.contains(msg))
    }

    /// Whether any error message contains `msg`.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn skipped(&mut self, msg: &str) {
        self.skips.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }
}
