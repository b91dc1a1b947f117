//! Terminal capability queries.
//!
//! Thin wrappers over `IsTerminal` and `terminal_size`. Everything
//! above this module goes through `width::TerminalEnv` so it can be stubbed.

use std::io::{self, IsTerminal};

use terminal_size::{terminal_size_of, Height, Width};

pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

pub fn is_stdout_tty() -> bool {
    io::stdout().is_terminal()
}

pub fn is_stderr_tty() -> bool {
    io::stderr().is_terminal()
}

/// Columns of the terminal behind stdout, if it is one.
pub fn stdout_columns() -> Option<usize> {
    to_columns(terminal_size_of(io::stdout()))
}

/// Columns of the terminal behind stderr, if it is one.
pub fn stderr_columns() -> Option<usize> {
    to_columns(terminal_size_of(io::stderr()))
}

fn to_columns(size: Option<(Width, Height)>) -> Option<usize> {
    size.map(|(Width(w), _)| w as usize).filter(|w| *w > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_columns_count_as_unknown() {
        assert_eq!(to_columns(Some((Width(0), Height(24)))), None);
        assert_eq!(to_columns(None), None);
        assert_eq!(to_columns(Some((Width(132), Height(43)))), Some(132));
    }
}
