//! Width-bounded line wrapping with first-line / continuation prefixes.
//!
//! Every physical input line is wrapped as its own paragraph, so each one
//! gets the first-line prefix on its first emitted line and the continuation
//! prefix on the rest.

use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::width::{self, OutputStream, SystemTerminal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapRequest {
    pub text: String,
    pub append_newline: bool,
    pub first_prefix: String,
    /// Falls back to `first_prefix` when unset.
    pub continuation_prefix: Option<String>,
}

impl WrapRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            append_newline: true,
            first_prefix: String::new(),
            continuation_prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.first_prefix = prefix.into();
        self
    }

    pub fn with_continuation(mut self, prefix: impl Into<String>) -> Self {
        self.continuation_prefix = Some(prefix.into());
        self
    }

    /// Leave the cursor at the end of the last line.
    pub fn without_newline(mut self) -> Self {
        self.append_newline = false;
        self
    }

    pub fn continuation(&self) -> &str {
        self.continuation_prefix
            .as_deref()
            .unwrap_or(&self.first_prefix)
    }
}

/// Wrap `request.text` to `width` columns and return the rendered text.
pub fn wrap(request: &WrapRequest, width: usize) -> String {
    let width = width.max(1);
    let text = request
        .text
        .strip_suffix('\n')
        .unwrap_or(&request.text);

    let mut out = String::with_capacity(text.len() + 16);
    let mut paragraphs = text.split('\n').peekable();
    while let Some(paragraph) = paragraphs.next() {
        // Interior lines always end with a newline; only the last one
        // honours the caller's choice.
        let newline = paragraphs.peek().is_some() || request.append_newline;
        wrap_paragraph(
            &mut out,
            paragraph,
            width,
            &request.first_prefix,
            request.continuation(),
            newline,
        );
    }
    out
}

fn wrap_paragraph(
    out: &mut String,
    text: &str,
    width: usize,
    first_prefix: &str,
    continuation_prefix: &str,
    newline: bool,
) {
    let mut prefix = first_prefix;
    let mut rest = text;

    loop {
        // A prefix as wide as the line still leaves room for one character.
        let room = width.saturating_sub(prefix_columns(prefix)).max(1);
        let Some((boundary, _)) = rest.char_indices().nth(room) else {
            break;
        };

        let (line, next) = match break_at_space(rest, boundary) {
            Some(space) => (&rest[..space], &rest[space + 1..]),
            None => (&rest[..boundary], &rest[boundary..]),
        };

        out.push_str(prefix);
        out.push_str(line);
        out.push('\n');

        rest = next;
        prefix = continuation_prefix;
    }

    out.push_str(prefix);
    out.push_str(rest);
    if newline {
        out.push('\n');
    }
}

/// Byte index of the last space at or before `boundary`. A space at index 0
/// yields an empty line and is consumed like any other break.
fn break_at_space(text: &str, boundary: usize) -> Option<usize> {
    if text[boundary..].starts_with(' ') {
        return Some(boundary);
    }
    text[..boundary].rfind(' ')
}

const TAB_STOP: usize = 8;

/// Columns a prefix occupies on screen; a tab advances to the next stop.
fn prefix_columns(prefix: &str) -> usize {
    prefix.chars().fold(0, |col, c| {
        if c == '\t' {
            (col / TAB_STOP + 1) * TAB_STOP
        } else {
            col + 1
        }
    })
}

/// Wrap and write to `out`, flushing so the text is visible before any
/// subsequent read.
pub fn write_wrapped(out: &mut dyn Write, request: &WrapRequest, width: usize) -> io::Result<()> {
    out.write_all(wrap(request, width).as_bytes())?;
    out.flush()
}

/// Wrap to the current stdout width. `line_width` is used when the width
/// cannot be detected.
pub fn print_wrapped(request: &WrapRequest, line_width: usize) -> Result<()> {
    print_to(OutputStream::Stdout, request, line_width)
}

/// Same as [`print_wrapped`] but on stderr, for prompt and diagnostic text
/// that must stay out of piped stdout.
pub fn eprint_wrapped(request: &WrapRequest, line_width: usize) -> Result<()> {
    print_to(OutputStream::Stderr, request, line_width)
}

fn print_to(stream: OutputStream, request: &WrapRequest, line_width: usize) -> Result<()> {
    let detected = width::detect_width(&SystemTerminal::new(stream));
    let width = width::effective_width(detected, line_width);

    let result = match stream {
        OutputStream::Stdout => write_wrapped(&mut io::stdout().lock(), request, width),
        OutputStream::Stderr => write_wrapped(&mut io::stderr().lock(), request, width),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(Error::internal_io(
            e.to_string(),
            Some("write wrapped output".to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_fits_on_one_line() {
        let out = wrap(&WrapRequest::new("hello world"), 40);
        assert_eq!(out, "hello world\n");
    }

    #[test]
    fn breaks_at_last_space_before_width() {
        let out = wrap(&WrapRequest::new("the quick brown fox jumps"), 10);
        assert_eq!(out, "the quick\nbrown fox\njumps\n");
    }

    #[test]
    fn space_exactly_at_boundary_is_used() {
        let out = wrap(&WrapRequest::new("abcde fghij"), 5);
        assert_eq!(out, "abcde\nfghij\n");
    }

    #[test]
    fn hard_break_without_spaces() {
        let out = wrap(&WrapRequest::new("abcdefghijkl"), 5);
        assert_eq!(out, "abcde\nfghij\nkl\n");
    }

    #[test]
    fn prefixes_apply_to_first_and_continuation_lines() {
        let request = WrapRequest::new("one two three four")
            .with_prefix("* ")
            .with_continuation("  ");
        let out = wrap(&request, 11);
        assert_eq!(out, "* one two\n  three\n  four\n");
    }

    #[test]
    fn continuation_defaults_to_first_prefix() {
        let request = WrapRequest::new("aaa bbb ccc").with_prefix("# ");
        assert_eq!(request.continuation(), "# ");
        assert_eq!(wrap(&request, 7), "# aaa\n# bbb\n# ccc\n");
    }

    #[test]
    fn each_input_line_gets_its_own_prefix_pair() {
        let request = WrapRequest::new("first line here\nsecond")
            .with_prefix("> ")
            .with_continuation(". ");
        let out = wrap(&request, 10);
        assert_eq!(out, "> first\n. line\n. here\n> second\n");
    }

    #[test]
    fn interior_lines_end_with_newline_even_without_trailing_newline() {
        let request = WrapRequest::new("a\nb\nc").without_newline();
        assert_eq!(wrap(&request, 20), "a\nb\nc");
    }

    #[test]
    fn single_trailing_newline_is_stripped() {
        assert_eq!(wrap(&WrapRequest::new("done\n"), 20), "done\n");
        assert_eq!(wrap(&WrapRequest::new("done\n\n"), 20), "done\n\n");
    }

    #[test]
    fn empty_text_emits_one_prefixed_line() {
        let request = WrapRequest::new("").with_prefix("| ");
        assert_eq!(wrap(&request, 20), "| \n");
        assert_eq!(wrap(&WrapRequest::new(""), 20), "\n");
    }

    #[test]
    fn empty_text_without_newline_emits_prefix_only() {
        let request = WrapRequest::new("").with_prefix("? ").without_newline();
        assert_eq!(wrap(&request, 20), "? ");
    }

    #[test]
    fn prefix_wider_than_width_still_progresses() {
        let request = WrapRequest::new("abc").with_prefix("very long prefix ");
        let out = wrap(&request, 4);
        assert_eq!(
            out,
            "very long prefix a\nvery long prefix b\nvery long prefix c\n"
        );
    }

    #[test]
    fn multibyte_text_breaks_on_char_boundaries() {
        let out = wrap(&WrapRequest::new("ééééé ààà"), 4);
        assert_eq!(out, "éééé\né\nààà\n");
    }

    #[test]
    fn wrapping_preserves_word_sequence() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n\
                    Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.\n\
                    Ut enim ad minim veniam";
        let expected: Vec<&str> = text.split_whitespace().collect();

        for width in 16..60 {
            for (first, cont) in [("", ""), ("- ", "  "), (">>> ", "")] {
                let request = WrapRequest::new(text)
                    .with_prefix(first)
                    .with_continuation(cont);
                let out = wrap(&request, width);
                let words: Vec<&str> = out
                    .lines()
                    .map(|line| line.strip_prefix(first).or(line.strip_prefix(cont)).unwrap_or(line))
                    .flat_map(|line| line.split_whitespace())
                    .collect();
                assert_eq!(words, expected, "width {} prefixes {:?}", width, (first, cont));
            }
        }
    }

    #[test]
    fn double_space_does_not_split_the_next_word() {
        assert_eq!(wrap(&WrapRequest::new("abcd  efgh"), 4), "abcd\n\nefgh\n");
    }

    #[test]
    fn leading_space_is_consumed_as_a_break() {
        assert_eq!(wrap(&WrapRequest::new(" abcdef"), 3), "\nabc\ndef\n");
    }

    #[test]
    fn irregular_spacing_preserves_words() {
        let text = " ab  cd efg   h ij  klm ";
        let expected: Vec<&str> = text.split_whitespace().collect();
        for width in 3..16 {
            let out = wrap(&WrapRequest::new(text), width);
            let words: Vec<&str> = out.split_whitespace().collect();
            assert_eq!(words, expected, "width {}", width);
        }
    }

    #[test]
    fn tab_in_prefix_counts_to_next_stop() {
        assert_eq!(prefix_columns("(1)\t"), 8);
        assert_eq!(prefix_columns("\t\t"), 16);
        assert_eq!(prefix_columns("> "), 2);

        let request = WrapRequest::new("alpha beta gamma")
            .with_prefix("(1)\t")
            .with_continuation("\t");
        assert_eq!(wrap(&request, 19), "(1)\talpha beta\n\tgamma\n");
    }

    #[test]
    fn line_count_at_least_embedded_newlines_plus_one() {
        let text = "a\nbb\n\nccc dd\ne";
        for width in 1..8 {
            let out = wrap(&WrapRequest::new(text), width);
            assert!(out.lines().count() >= 5, "width {}", width);
        }
    }

    #[test]
    fn no_line_exceeds_width() {
        let text = "wrap this sentence into many short lines please";
        for width in 5..20 {
            let out = wrap(&WrapRequest::new(text).with_prefix("> "), width);
            for line in out.lines() {
                assert!(line.chars().count() <= width, "{:?} at width {}", line, width);
            }
        }
    }

    #[test]
    fn write_wrapped_writes_rendered_text() {
        let mut buf: Vec<u8> = Vec::new();
        write_wrapped(&mut buf, &WrapRequest::new("x y").without_newline(), 80).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "x y");
    }
}
