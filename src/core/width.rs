//! Terminal width detection.
//!
//! Geometry is not reliably available through any single channel, so the
//! detector walks an ordered chain of sources and takes the first usable
//! answer:
//!
//! 1. output stream is not a terminal: `0` (unknown, caller substitutes)
//! 2. window-size ioctl on the stream
//! 3. `co#<n>` in the `TERMCAP` capability string
//! 4. `tput cols`, only when stdout is a terminal and `TERM` is known
//! 5. `COLUMNS`
//! 6. [`DEFAULT_COLUMNS`]
//!
//! Nothing is cached: the terminal can be resized between two prompts.

use std::collections::HashMap;

use crate::tty;
use crate::utils::{command, parser};

pub const DEFAULT_COLUMNS: usize = 80;

const CAPABILITY_VAR: &str = "TERMCAP";
const TERM_VAR: &str = "TERM";
const COLUMNS_VAR: &str = "COLUMNS";
const CAPABILITY_COLUMNS_PATTERN: &str = r"(?:^|:)co#(\d+)";

/// Which standard stream prompt and wrapped output go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStream {
    #[default]
    Stdout,
    Stderr,
}

impl OutputStream {
    /// Columns reported by the terminal driver for this stream.
    pub fn columns(&self) -> Option<usize> {
        match self {
            OutputStream::Stdout => tty::stdout_columns(),
            OutputStream::Stderr => tty::stderr_columns(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            OutputStream::Stdout => tty::is_stdout_tty(),
            OutputStream::Stderr => tty::is_stderr_tty(),
        }
    }
}

/// Everything the detector needs to know about its environment.
pub trait TerminalEnv {
    /// Whether the stream being measured is attached to a terminal.
    fn is_terminal(&self) -> bool;

    fn stdout_is_terminal(&self) -> bool;

    /// Columns reported by the terminal driver, if any.
    fn window_columns(&self) -> Option<usize>;

    fn var(&self, name: &str) -> Option<String>;

    /// Raw output of the external column-query helper. `None` when the
    /// helper is missing or exits unsuccessfully.
    fn query_columns(&self) -> Option<String>;
}

/// The real process environment, measured for one output stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTerminal {
    stream: OutputStream,
}

impl SystemTerminal {
    pub fn new(stream: OutputStream) -> Self {
        Self { stream }
    }
}

impl TerminalEnv for SystemTerminal {
    fn is_terminal(&self) -> bool {
        self.stream.is_terminal()
    }

    fn stdout_is_terminal(&self) -> bool {
        tty::is_stdout_tty()
    }

    fn window_columns(&self) -> Option<usize> {
        self.stream.columns()
    }

    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn query_columns(&self) -> Option<String> {
        command::run_optional("tput", &["cols"])
    }
}

/// Fixed answers for every tier. Lets callers (and tests) pin the width
/// without a terminal.
#[derive(Debug, Clone, Default)]
pub struct StaticTerminal {
    pub is_terminal: bool,
    pub stdout_is_terminal: bool,
    pub window_columns: Option<usize>,
    pub vars: HashMap<String, String>,
    pub query_output: Option<String>,
}

impl StaticTerminal {
    /// A terminal whose driver reports `columns`.
    pub fn with_columns(columns: usize) -> Self {
        Self {
            is_terminal: true,
            stdout_is_terminal: true,
            window_columns: Some(columns),
            ..Self::default()
        }
    }

    /// Output redirected to a file or pipe.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl TerminalEnv for StaticTerminal {
    fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }

    fn window_columns(&self) -> Option<usize> {
        self.window_columns
    }

    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn query_columns(&self) -> Option<String> {
        self.query_output.clone()
    }
}

/// Usable output width in columns, or `0` when the stream is not a terminal.
pub fn detect_width(env: &dyn TerminalEnv) -> usize {
    if !env.is_terminal() {
        return 0;
    }

    if let Some(columns) = env.window_columns().filter(|c| *c > 0) {
        return columns;
    }

    if let Some(columns) = env
        .var(CAPABILITY_VAR)
        .and_then(|caps| parser::extract_first(&caps, CAPABILITY_COLUMNS_PATTERN))
        .and_then(|raw| parser::parse_count(&raw))
    {
        return columns;
    }

    if env.stdout_is_terminal() && has_known_term(env) {
        if let Some(columns) = env.query_columns().and_then(|raw| parser::parse_count(&raw)) {
            return columns;
        }
    }

    // A non-numeric COLUMNS falls through to the hard default.
    env.var(COLUMNS_VAR)
        .and_then(|raw| parser::parse_count(&raw))
        .unwrap_or(DEFAULT_COLUMNS)
}

fn has_known_term(env: &dyn TerminalEnv) -> bool {
    env.var(TERM_VAR)
        .map(|term| !term.is_empty() && term != "unknown")
        .unwrap_or(false)
}

/// Width the wrapper may fill. One column is kept free so a full line does
/// not trigger the terminal's own auto-wrap; an unknown width (`0`) uses
/// `fallback` as-is.
pub fn effective_width(detected: usize, fallback: usize) -> usize {
    if detected == 0 {
        fallback.max(1)
    } else {
        detected.saturating_sub(1).max(1)
    }
}
