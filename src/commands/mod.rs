use std::io::Read;
use std::path::Path;

use termprompt::defaults;
use termprompt::{ConfiguredMode, FixedMode, PromptEngine};

pub type CmdResult<T> = termprompt::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// `--yes`: answer every prompt with its default.
    pub assume_defaults: bool,
}

/// Prompt engine writing to stderr so JSON on stdout stays parseable.
///
/// Without `--yes` the non-interactive flag is looked up from the
/// environment and config file before every read.
pub(crate) fn prompt_engine(global: &GlobalArgs) -> termprompt::Result<PromptEngine> {
    let line_width = defaults::load_config().line_width;
    if global.assume_defaults {
        PromptEngine::stderr(FixedMode::non_interactive(), line_width)
    } else {
        PromptEngine::stderr(ConfiguredMode, line_width)
    }
}

/// Explicit `--timeout` wins; otherwise the configured default.
pub(crate) fn resolve_timeout(flag: Option<u64>) -> u64 {
    flag.unwrap_or_else(|| defaults::load_config().default_timeout)
}

/// Read text from a literal string, a file (@path), or stdin (-).
fn read_text_arg(spec: &str) -> termprompt::Result<String> {
    if spec.trim() == "-" {
        let mut buf = String::new();
        if termprompt::tty::is_stdin_tty() {
            return Err(termprompt::Error::validation_invalid_argument(
                "text",
                "Cannot read text from stdin when stdin is a TTY",
                None,
            ));
        }
        std::io::stdin().read_to_string(&mut buf).map_err(|e| {
            termprompt::Error::internal_io(e.to_string(), Some("read stdin".to_string()))
        })?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(termprompt::Error::validation_invalid_argument(
                "text",
                "Invalid text spec '@' (missing file path)",
                None,
            ));
        }
        return std::fs::read_to_string(Path::new(path)).map_err(|e| {
            termprompt::Error::internal_io(e.to_string(), Some(format!("read {}", path)))
        });
    }

    Ok(spec.to_string())
}

pub mod ask;
pub mod config;
pub mod confirm;
pub mod select;
pub mod width;
pub mod wrap;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (termprompt::Result<serde_json::Value>, i32) {
    match command {
        // Commands without global context
        crate::Commands::Width(args) => dispatch!(args, width),
        crate::Commands::Config(args) => dispatch!(args, config),

        // Commands that prompt
        crate::Commands::Ask(args) => dispatch!(args, global, ask),
        crate::Commands::Confirm(args) => dispatch!(args, global, confirm),
        crate::Commands::Select(args) => dispatch!(args, global, select),

        // Special case: wrap uses raw output mode
        crate::Commands::Wrap(_) => {
            let err = termprompt::Error::validation_invalid_argument(
                "output_mode",
                "Wrap command uses raw output mode",
                None,
            );
            crate::output::map_cmd_result_to_json::<serde_json::Value>(Err(err))
        }
    }
}

pub(crate) fn run_raw(command: crate::Commands) -> termprompt::Result<i32> {
    match command {
        crate::Commands::Wrap(args) => wrap::run_raw(args),
        _ => Err(termprompt::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support raw output",
            None,
        )),
    }
}
