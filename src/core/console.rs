//! Blocking input reader.
//!
//! A [`Console`] owns one input source, one output sink and the width
//! probe for that sink. `read_line` is the only place in the crate that
//! blocks, and only one read is ever outstanding.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::input::{InputSource, ReadOutcome, StdinSource};
use crate::mode::InteractionMode;
use crate::width::{self, OutputStream, SystemTerminal, TerminalEnv, DEFAULT_COLUMNS};
use crate::wrap::{self, WrapRequest};

pub const ASSUMING_DEFAULT_NOTICE: &str = "assuming default";
pub const TIMEOUT_NOTICE: &str = "TIMEOUT: using default answer";

pub struct Console {
    input: Box<dyn InputSource>,
    output: Box<dyn Write>,
    terminal: Box<dyn TerminalEnv>,
    mode: Box<dyn InteractionMode>,
    line_width: usize,
}

impl Console {
    pub fn new(
        input: impl InputSource + 'static,
        output: impl Write + 'static,
        terminal: impl TerminalEnv + 'static,
        mode: impl InteractionMode + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
            terminal: Box::new(terminal),
            mode: Box::new(mode),
            line_width: DEFAULT_COLUMNS,
        }
    }

    /// Standard input plus the chosen standard output stream.
    pub fn stdio(stream: OutputStream, mode: impl InteractionMode + 'static) -> Result<Self> {
        let input = StdinSource::stdin().map_err(|e| {
            Error::internal_io(e.to_string(), Some("open standard input".to_string()))
        })?;
        let output: Box<dyn Write> = match stream {
            OutputStream::Stdout => Box::new(io::stdout()),
            OutputStream::Stderr => Box::new(io::stderr()),
        };
        Ok(Self {
            input: Box::new(input),
            output,
            terminal: Box::new(SystemTerminal::new(stream)),
            mode: Box::new(mode),
            line_width: DEFAULT_COLUMNS,
        })
    }

    /// Width used when the terminal width cannot be detected.
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width.max(1);
        self
    }

    /// Current wrap width. Re-detected on every call.
    pub fn width(&self) -> usize {
        width::effective_width(width::detect_width(self.terminal.as_ref()), self.line_width)
    }

    pub fn is_non_interactive(&self) -> bool {
        self.mode.is_non_interactive()
    }

    pub fn write_wrapped(&mut self, request: &WrapRequest) -> Result<()> {
        let width = self.width();
        wrap::write_wrapped(self.output.as_mut(), request, width).map_err(write_error)
    }

    /// Wrapped text followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        self.write_wrapped(&WrapRequest::new(text))
    }

    pub fn blank_line(&mut self) -> Result<()> {
        self.write_raw("\n")
    }

    fn write_raw(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
            .map_err(write_error)
    }

    /// Show `prompt` and read one answer with its line ending removed.
    ///
    /// `timeout_secs == 0` waits forever. A timeout, or non-interactive mode,
    /// yields an empty answer after printing a notice so the caller falls
    /// back to its default.
    pub fn read_line(&mut self, prompt: &str, timeout_secs: u64) -> Result<String> {
        self.write_wrapped(&WrapRequest::new(format!("{} ", prompt)).without_newline())?;

        if self.mode.is_non_interactive() {
            self.say(ASSUMING_DEFAULT_NOTICE)?;
            return Ok(String::new());
        }

        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));
        let outcome = self
            .input
            .read_line(timeout)
            .map_err(|e| Error::from_read(e, "read answer"))?;

        match outcome {
            ReadOutcome::Line(line) => Ok(line),
            ReadOutcome::TimedOut => {
                // Move off the prompt line before the notice.
                self.blank_line()?;
                self.say(TIMEOUT_NOTICE)?;
                Ok(String::new())
            }
        }
    }
}

fn write_error(err: io::Error) -> Error {
    Error::internal_io(err.to_string(), Some("write prompt output".to_string()))
}

/// In-memory sink that stays readable after being moved into a [`Console`].
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }
}

impl Write for MemoryOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
