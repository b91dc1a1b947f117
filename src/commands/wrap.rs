use clap::Args;

use termprompt::defaults;
use termprompt::wrap::{self, WrapRequest};

#[derive(Args)]
pub struct WrapArgs {
    /// Text to wrap: literal string, @file, or - for stdin (default: stdin)
    pub text: Option<String>,

    /// Prefix for the first line
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Prefix for continuation lines (defaults to --prefix)
    #[arg(long)]
    pub continuation: Option<String>,

    /// Do not end the output with a newline
    #[arg(long)]
    pub no_newline: bool,

    /// Write to stderr and measure its width instead of stdout's
    #[arg(long)]
    pub stderr: bool,
}

pub fn run_raw(args: WrapArgs) -> termprompt::Result<i32> {
    let text = super::read_text_arg(args.text.as_deref().unwrap_or("-"))?;
    let request = build_request(text, &args);
    let line_width = defaults::load_config().line_width;

    if args.stderr {
        wrap::eprint_wrapped(&request, line_width)?;
    } else {
        wrap::print_wrapped(&request, line_width)?;
    }
    Ok(0)
}

fn build_request(text: String, args: &WrapArgs) -> WrapRequest {
    let mut request = WrapRequest::new(text).with_prefix(args.prefix.clone());
    if let Some(continuation) = &args.continuation {
        request = request.with_continuation(continuation.clone());
    }
    if args.no_newline {
        request = request.without_newline();
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(prefix: &str, continuation: Option<&str>, no_newline: bool) -> WrapArgs {
        WrapArgs {
            text: None,
            prefix: prefix.to_string(),
            continuation: continuation.map(str::to_string),
            no_newline,
            stderr: false,
        }
    }

    #[test]
    fn continuation_defaults_to_prefix() {
        let request = build_request("a b".to_string(), &args("> ", None, false));
        assert_eq!(request.continuation(), "> ");
        assert!(request.append_newline);
    }

    #[test]
    fn flags_map_onto_request() {
        let request = build_request("a b".to_string(), &args("* ", Some("  "), true));
        assert_eq!(request.first_prefix, "* ");
        assert_eq!(request.continuation(), "  ");
        assert!(!request.append_newline);
    }
}
