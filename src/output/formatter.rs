//! Console message formatting with quiet and verbose modes.

use crate::config::Config;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Routine progress information.
    Info,
    /// Successful completion.
    Success,
    /// Something was skipped or degraded.
    Warning,
}

/// Formats user-facing messages according to output preferences.
///
/// Warnings always reach stderr, even in quiet mode. Everything else is
/// suppressed by `--quiet`; details require `--verbose`.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    quiet: bool,
    verbose: bool,
}

impl OutputFormatter {
    /// Create a formatter from output preferences.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }

    /// Create a formatter from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose)
    }

    /// Create a formatter that suppresses all non-warning output.
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Whether quiet mode is active.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Whether verbose mode is active.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Whether a message of the given level would be printed.
    pub fn should_print(&self, level: MessageLevel) -> bool {
        match level {
            MessageLevel::Warning => true,
            MessageLevel::Info | MessageLevel::Success => !self.quiet,
        }
    }

    /// Print a routine status message.
    pub fn info(&self, message: &str) {
        if self.should_print(MessageLevel::Info) {
            println!("{message}");
        }
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        if self.should_print(MessageLevel::Success) {
            println!("✓ {message}");
        }
    }

    /// Print a warning to stderr. Never suppressed.
    pub fn warning(&self, message: &str) {
        eprintln!("Warning: {message}");
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        if self.should_print(MessageLevel::Info) {
            println!("\n{title}");
            println!("{}", "-".repeat(title.len()));
        }
    }

    /// Print an indented detail line. Only in verbose mode.
    pub fn detail(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("  {message}");
        }
    }

    /// Print an empty line.
    pub fn blank_line(&self) {
        if self.should_print(MessageLevel::Info) {
            println!();
        }
    }
}
