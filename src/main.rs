use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw,
}

mod commands;
mod output;

use commands::{ask, config, confirm, select, width, wrap};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "termprompt")]
#[command(version = VERSION)]
#[command(about = "Terminal prompts and width-aware text wrapping for scripts")]
struct Cli {
    /// Answer every prompt with its default without reading input
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a free text question
    Ask(ask::AskArgs),
    /// Ask a yes/no question (exit code 1 on "no")
    Confirm(confirm::ConfirmArgs),
    /// Pick one value from a numbered list
    Select(select::SelectArgs),
    /// Wrap text to the terminal width
    Wrap(wrap::WrapArgs),
    /// Show the detected terminal width
    Width(width::WidthArgs),
    /// Inspect termprompt configuration
    Config(config::ConfigArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Wrap(_) => ResponseMode::Raw,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        assume_defaults: cli.yes,
    };
    if global.assume_defaults {
        termprompt::log_status!("prompt", "Answering with defaults (--yes)");
    }

    if let ResponseMode::Raw = response_mode(&cli.command) {
        return match commands::run_raw(cli.command) {
            Ok(exit_code) => std::process::ExitCode::from(exit_code_to_u8(exit_code)),
            Err(err) => {
                let exit_code = output::exit_code_for_error(err.code);
                let _ = output::print_json_result(Err(err), exit_code);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
        };
    }

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let _ = output::print_json_result(json_result, exit_code);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
