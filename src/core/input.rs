//! Line sources for the blocking reader.
//!
//! [`FdSource`] reads a file descriptor without std's buffering so a bounded
//! read can wait with `poll(2)` and give up cleanly. [`StdinSource`] is that
//! source over a duplicate of standard input; it must not be mixed with
//! `std::io::stdin()` reads in the same process. [`ScriptedInput`] replays
//! canned answers for tests and demos.

use std::cell::Cell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A complete line without its `\n` / `\r\n` terminator.
    Line(String),
    TimedOut,
}

pub trait InputSource {
    /// Read one line. `None` blocks until a line arrives.
    ///
    /// End of input with nothing buffered is `ErrorKind::UnexpectedEof`.
    fn read_line(&mut self, timeout: Option<Duration>) -> io::Result<ReadOutcome>;
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(unix)]
pub use self::fd::{FdSource, StdinSource};

#[cfg(unix)]
mod fd {
    use std::fs::File;
    use std::io::{self, Read};
    use std::os::fd::AsFd;
    use std::time::{Duration, Instant};

    use nix::errno::Errno;
    use nix::poll::{poll, PollFd, PollFlags, PollTimeout};

    use super::{strip_line_ending, InputSource, ReadOutcome};

    /// Standard input through its own descriptor.
    pub type StdinSource = FdSource<File>;

    /// Line reader over any pollable descriptor.
    ///
    /// Bytes read past the end of a line stay in this source for the next
    /// call, and so does a partial line abandoned by a timeout. Each bounded
    /// read computes its own deadline; nothing outlives the call.
    #[derive(Debug)]
    pub struct FdSource<R> {
        reader: R,
        pending: Vec<u8>,
    }

    impl FdSource<File> {
        /// Duplicate standard input so reads bypass the buffer behind
        /// `std::io::stdin()`; `poll` must see every unread byte.
        pub fn stdin() -> io::Result<Self> {
            let fd = io::stdin().as_fd().try_clone_to_owned()?;
            Ok(Self::new(File::from(fd)))
        }
    }

    impl<R: Read + AsFd> FdSource<R> {
        pub fn new(reader: R) -> Self {
            Self {
                reader,
                pending: Vec::new(),
            }
        }

        fn take_line(&mut self) -> Option<String> {
            let end = self.pending.iter().position(|b| *b == b'\n')?;
            let bytes: Vec<u8> = self.pending.drain(..=end).collect();
            Some(strip_line_ending(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        }

        fn take_remainder(&mut self) -> Option<String> {
            if self.pending.is_empty() {
                return None;
            }
            let bytes = std::mem::take(&mut self.pending);
            Some(strip_line_ending(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        }

        /// `false` when the wait ended without data, including a signal.
        fn wait_readable(&self, timeout: Duration) -> io::Result<bool> {
            // Round up so a sub-millisecond remainder does not become a busy
            // poll; longer waits are split and re-checked against the deadline.
            let millis = timeout
                .as_micros()
                .div_ceil(1000)
                .min(u128::from(u16::MAX)) as u16;
            let mut fds = [PollFd::new(self.reader.as_fd(), PollFlags::POLLIN)];

            match poll(&mut fds, PollTimeout::from(millis)) {
                Ok(0) | Err(Errno::EINTR) => Ok(false),
                Ok(_) => Ok(true),
                Err(errno) => Err(io::Error::from(errno)),
            }
        }
    }

    impl<R: Read + AsFd> InputSource for FdSource<R> {
        fn read_line(&mut self, timeout: Option<Duration>) -> io::Result<ReadOutcome> {
            let deadline = timeout.map(|t| Instant::now() + t);
            let mut chunk = [0u8; 1024];

            loop {
                if let Some(line) = self.take_line() {
                    return Ok(ReadOutcome::Line(line));
                }

                if let Some(deadline) = deadline {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return Ok(ReadOutcome::TimedOut);
                    }
                    if !self.wait_readable(remaining)? {
                        continue;
                    }
                }

                let n = match self.reader.read(&mut chunk) {
                    Ok(n) => n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                if n == 0 {
                    // Last line without a terminator still counts as an answer.
                    return match self.take_remainder() {
                        Some(line) => Ok(ReadOutcome::Line(line)),
                        None => Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "input closed",
                        )),
                    };
                }
                self.pending.extend_from_slice(&chunk[..n]);
            }
        }
    }

}

/// Standard input on platforms without a readiness wait for console input.
/// Reads block and the timeout is not enforced.
#[cfg(not(unix))]
#[derive(Debug, Default)]
pub struct StdinSource;

#[cfg(not(unix))]
impl StdinSource {
    pub fn stdin() -> io::Result<Self> {
        Ok(Self)
    }
}

#[cfg(not(unix))]
impl InputSource for StdinSource {
    fn read_line(&mut self, _timeout: Option<Duration>) -> io::Result<ReadOutcome> {
        use std::io::BufRead;

        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(ReadOutcome::Line(strip_line_ending(line)))
    }
}

/// One canned answer for [`ScriptedInput`].
#[derive(Debug, Clone)]
pub enum ScriptedAnswer {
    Line(String),
    /// Arrives after the given delay. A bounded read shorter than the delay
    /// times out and the late line is dropped with the abandoned read.
    Delayed(Duration, String),
    Fail(io::ErrorKind),
}

/// Replays answers in order; running out behaves like a closed stream.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<ScriptedAnswer>,
    reads: Rc<Cell<usize>>,
}

impl ScriptedInput {
    pub fn new(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            reads: Rc::new(Cell::new(0)),
        }
    }

    /// Immediate answers, one per line.
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines.into_iter().map(|l| ScriptedAnswer::Line(l.into())))
    }

    /// Shared counter of read attempts, still readable after the source has
    /// been handed to a console.
    pub fn read_count(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.reads)
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self, timeout: Option<Duration>) -> io::Result<ReadOutcome> {
        self.reads.set(self.reads.get() + 1);

        match self.answers.pop_front() {
            Some(ScriptedAnswer::Line(line)) => Ok(ReadOutcome::Line(strip_line_ending(line))),
            Some(ScriptedAnswer::Delayed(delay, line)) => match timeout {
                Some(limit) if delay > limit => Ok(ReadOutcome::TimedOut),
                _ => Ok(ReadOutcome::Line(strip_line_ending(line))),
            },
            Some(ScriptedAnswer::Fail(kind)) => Err(io::Error::new(kind, "scripted failure")),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no scripted answers left",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_line_ending_variants() {
        assert_eq!(strip_line_ending("abc\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc\r\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc".to_string()), "abc");
        assert_eq!(strip_line_ending("\n".to_string()), "");
    }

    #[test]
    fn scripted_lines_in_order() {
        let mut input = ScriptedInput::lines(["a\n", "b"]);
        assert_eq!(input.read_line(None).unwrap(), ReadOutcome::Line("a".to_string()));
        assert_eq!(input.read_line(None).unwrap(), ReadOutcome::Line("b".to_string()));
        let err = input.read_line(None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(input.read_count().get(), 3);
    }

    #[test]
    fn delayed_answer_times_out_when_bounded() {
        let mut input = ScriptedInput::new([
            ScriptedAnswer::Delayed(Duration::from_secs(10), "late".to_string()),
            ScriptedAnswer::Line("next".to_string()),
        ]);
        assert_eq!(
            input.read_line(Some(Duration::from_secs(5))).unwrap(),
            ReadOutcome::TimedOut
        );
        assert_eq!(
            input.read_line(Some(Duration::from_secs(5))).unwrap(),
            ReadOutcome::Line("next".to_string())
        );
    }

    #[test]
    fn unbounded_read_never_times_out() {
        let mut input = ScriptedInput::new([ScriptedAnswer::Delayed(
            Duration::from_secs(86_400),
            "eventually".to_string(),
        )]);
        assert_eq!(
            input.read_line(None).unwrap(),
            ReadOutcome::Line("eventually".to_string())
        );
    }

    #[test]
    fn scripted_failure_surfaces_kind() {
        let mut input = ScriptedInput::new([ScriptedAnswer::Fail(io::ErrorKind::BrokenPipe)]);
        let err = input.read_line(None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
