use clap::Args;
use serde::Serialize;

use termprompt::YesNoPrompt;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct ConfirmArgs {
    /// Question shown to the operator
    pub question: String,

    /// Make "no" the default answer
    #[arg(long)]
    pub default_no: bool,

    /// Seconds to wait before using the default (0 waits forever)
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ConfirmOutput {
    command: String,
    confirmed: bool,
    interactive: bool,
}

/// Exit code is 0 for yes and 1 for no, so shell scripts can branch on it.
pub fn run(args: ConfirmArgs, global: &GlobalArgs) -> CmdResult<ConfirmOutput> {
    let mut engine = super::prompt_engine(global)?;
    let prompt = YesNoPrompt::new(args.question)
        .with_default(!args.default_no)
        .with_timeout(super::resolve_timeout(args.timeout));

    let confirmed = engine.yes_no(&prompt)?;
    let exit_code = if confirmed { 0 } else { 1 };

    Ok((
        ConfirmOutput {
            command: "confirm".to_string(),
            confirmed,
            interactive: engine.is_interactive(),
        },
        exit_code,
    ))
}
