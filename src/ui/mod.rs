//! Terminal output.
//!
//! A mode-aware writer: status lines go to stdout and respect `--quiet`,
//! warnings and errors always go to stderr with console styling.

use console::style;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show extra detail.
    Verbose,
    /// Show status output.
    #[default]
    Normal,
    /// Show errors only.
    Quiet,
}

/// Output writer that respects the output mode.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    /// Create a new output writer.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Write a status line unless quiet.
    pub fn println(&self, msg: &str) {
        if self.mode != OutputMode::Quiet {
            println!("{msg}");
        }
    }

    /// Write a line only in verbose mode.
    pub fn verbose(&self, msg: &str) {
        if self.mode == OutputMode::Verbose {
            println!("{msg}");
        }
    }

    /// Write a success line unless quiet.
    pub fn success(&self, msg: &str) {
        if self.mode != OutputMode::Quiet {
            println!("{} {msg}", style("✓").green());
        }
    }

    /// Write a warning to stderr.
    pub fn warning(&self, msg: &str) {
        eprintln!("{} {msg}", style("warning:").yellow().bold());
    }

    /// Write an error to stderr.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {msg}", style("error:").red().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_normal() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }

    #[test]
    fn output_reports_its_mode() {
        let out = Output::new(OutputMode::Quiet);
        assert_eq!(out.mode(), OutputMode::Quiet);
    }
}
