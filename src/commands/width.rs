use clap::Args;
use serde::Serialize;

use termprompt::defaults;
use termprompt::width::{self, OutputStream, SystemTerminal};

use super::CmdResult;

#[derive(Args)]
pub struct WidthArgs {
    /// Measure stderr instead of stdout
    #[arg(long)]
    pub stderr: bool,
}

#[derive(Debug, Serialize)]
pub struct WidthOutput {
    command: String,
    stream: String,
    terminal: bool,
    /// Raw detected column count (0 when the stream is not a terminal).
    detected: usize,
    /// Width text is actually wrapped to.
    width: usize,
    line_width: usize,
}

pub fn run(args: WidthArgs) -> CmdResult<WidthOutput> {
    let stream = if args.stderr {
        OutputStream::Stderr
    } else {
        OutputStream::Stdout
    };
    let env = SystemTerminal::new(stream);
    let detected = width::detect_width(&env);
    let line_width = defaults::load_config().line_width;

    Ok((
        WidthOutput {
            command: "width".to_string(),
            stream: match stream {
                OutputStream::Stdout => "stdout".to_string(),
                OutputStream::Stderr => "stderr".to_string(),
            },
            terminal: stream.is_terminal(),
            detected,
            width: width::effective_width(detected, line_width),
            line_width,
        },
        0,
    ))
}
