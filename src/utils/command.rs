//! Command execution primitives.

use std::process::{Command, Output, Stdio};

/// Run a command, returning trimmed stdout only if it exits successfully.
///
/// Useful when failure is expected and acceptable (e.g., a capability probe
/// that may not be installed). Stdin and stderr stay attached to the caller's
/// streams: `tput` locates the terminal through them once stdout is captured,
/// and falls back to the static terminfo value when they are detached.
pub fn run_optional(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = stdout_text(&output);
    if stdout.is_empty() {
        None
    } else {
        Some(stdout)
    }
}

/// Trimmed stdout of a finished command.
pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
