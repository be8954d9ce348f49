//! Execution context for block running
//!
//! The context carries the settings every stage of a run needs and owns the
//! diagnostic output helpers.

use colored::Colorize;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

/// Execution context shared by variable resolution and block execution
#[derive(Debug, Clone)]
pub struct Context {
    /// Verbosity level
    pub verbosity: Verbosity,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            verbosity: Verbosity::Normal,
        }
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[INFO]".green(), message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        if self.verbosity >= Verbosity::Quiet {
            eprintln!("{} {}", "[ERROR]".red(), message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{} {}", "[DEBUG]".dimmed(), message);
        }
    }

    /// Print a rendered command line before it runs
    pub fn print_run(&self, line: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{} {}", "[RUN]".cyan(), line);
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
