use clap::{Args, Subcommand};
use serde::Serialize;

use termprompt::defaults::{self, PromptConfig};

use super::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (file merged over built-in defaults)
    Show {
        /// Show only built-in defaults (ignore termprompt.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Show the path to termprompt.json
    Path,
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<PromptConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assume_defaults_env: Option<bool>,
}

pub fn run(args: ConfigArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin),
        ConfigCommand::Path => path(),
    }
}

fn show(builtin: bool) -> CmdResult<ConfigOutput> {
    if builtin {
        return Ok((
            ConfigOutput {
                command: "config.show".to_string(),
                config: Some(defaults::builtin_defaults()),
                path: None,
                exists: None,
                assume_defaults_env: None,
            },
            0,
        ));
    }

    // Unlike prompting, `show` surfaces a broken file instead of hiding it.
    let config = if defaults::config_exists() {
        let path = defaults::config_path()?;
        defaults::load_config_from(std::path::Path::new(&path))?
    } else {
        defaults::builtin_defaults()
    };

    Ok((
        ConfigOutput {
            command: "config.show".to_string(),
            config: Some(config),
            path: None,
            exists: Some(defaults::config_exists()),
            assume_defaults_env: Some(defaults::assume_defaults_from_env()),
        },
        0,
    ))
}

fn path() -> CmdResult<ConfigOutput> {
    Ok((
        ConfigOutput {
            command: "config.path".to_string(),
            config: None,
            path: Some(defaults::config_path()?),
            exists: Some(defaults::config_exists()),
            assume_defaults_env: None,
        },
        0,
    ))
}
