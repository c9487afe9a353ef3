//! Terminal output for the tokenc CLI.
//!
//! Status lines are Cargo-style, with a right-aligned coloured verb, and go
//! to stderr. Stdout carries only resolved output (JSON, CSS, lookups).

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width of the verb column.
const VERB_WIDTH: usize = 12;

/// What a status line reports. Each kind has a fixed verb and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Declarations and properties read from disk
    Loading,
    /// Resolution started, with the selected mode
    Resolving,
    /// Output written to stdout
    Resolved,
    /// Output written to a file
    Wrote,
    /// `init` wrote a starter file
    Created,
    /// `init` left an existing file alone
    Keeping,
    /// Lint found nothing
    Checked,
    /// Lint found warnings only
    Warned,
    /// Lint found errors
    Failed,
}

impl Status {
    pub fn verb(self) -> &'static str {
        match self {
            Status::Loading => "Loading",
            Status::Resolving => "Resolving",
            Status::Resolved => "Resolved",
            Status::Wrote => "Wrote",
            Status::Created => "Created",
            Status::Keeping => "Keeping",
            Status::Checked | Status::Warned => "Checked",
            Status::Failed => "Failed",
        }
    }

    fn colour(self) -> &'static str {
        match self {
            Status::Keeping => CYAN,
            Status::Warned => YELLOW,
            Status::Failed => RED,
            _ => GREEN,
        }
    }
}

/// Status printer for stderr. Colour is on when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "   Resolving theme.yaml (mode: dark)"
    pub fn status(&self, status: Status, message: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", self.status_line(status, message));
    }

    fn status_line(&self, status: Status, message: &str) -> String {
        let verb = format!("{:>VERB_WIDTH$}", status.verb());
        if self.color {
            format!("{BOLD}{}{verb}{RESET} {message}", status.colour())
        } else {
            format!("{verb} {message}")
        }
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    /// A diagnostic severity label, red for errors and yellow otherwise.
    pub fn severity(&self, label: &str, is_error: bool) -> String {
        let color = if is_error { RED } else { YELLOW };
        if self.color {
            format!("{BOLD}{color}{label}{RESET}")
        } else {
            label.to_string()
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// `plural(1, "token", "tokens")` gives "1 token".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// A path relative to the working directory when possible.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
