//! Visual theme and styling.

use console::Style;

/// Styles for gate output.
#[derive(Debug, Clone)]
pub struct GateTheme {
    /// Style for tests that may proceed (green).
    pub success: Style,
    /// Style for skipped tests (orange).
    pub skipped: Style,
    /// Style for errors (red bold).
    pub error: Style,
    /// Style for headers (bold).
    pub header: Style,
}

impl Default for GateTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl GateTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            skipped: Style::new().color256(208),
            error: Style::new().red().bold(),
            header: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            skipped: Style::new(),
            error: Style::new(),
            header: Style::new(),
        }
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a skipped message.
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.skipped.apply_to(format!("○ {}", msg)))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header line.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
