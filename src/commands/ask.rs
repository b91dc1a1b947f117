use clap::Args;
use serde::Serialize;

use termprompt::TextPrompt;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct AskArgs {
    /// Question shown to the operator
    pub question: String,

    /// Answer used when the reply is empty
    #[arg(long, default_value = "")]
    pub default: String,

    /// Seconds to wait before using the default (0 waits forever)
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct AskOutput {
    command: String,
    answer: String,
    interactive: bool,
}

pub fn run(args: AskArgs, global: &GlobalArgs) -> CmdResult<AskOutput> {
    let mut engine = super::prompt_engine(global)?;
    let prompt = TextPrompt::new(args.question)
        .with_default(args.default)
        .with_timeout(super::resolve_timeout(args.timeout));

    let answer = engine.text(&prompt)?;

    Ok((
        AskOutput {
            command: "ask".to_string(),
            answer,
            interactive: engine.is_interactive(),
        },
        0,
    ))
}
