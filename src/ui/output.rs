//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show per-plugin detail for every test.
    Verbose,
    /// Show one line per test.
    #[default]
    Normal,
    /// Show nothing except errors.
    Silent,
}

impl OutputMode {
    /// Check if this mode shows per-plugin detail.
    pub fn shows_detail(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
