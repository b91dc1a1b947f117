use clap::Args;
use serde::Serialize;

use termprompt::{Choice, DefaultSpec, SelectPrompt};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct SelectArgs {
    /// Question shown below the list
    pub question: String,

    /// Alternating LABEL VALUE pairs
    #[arg(required = true, num_args = 1.., value_name = "LABEL VALUE")]
    pub pairs: Vec<String>,

    /// Default choice: index:<n>, label:<text> or value:<text>
    #[arg(long, value_name = "SPEC")]
    pub default: Option<String>,

    /// Text shown above the list
    #[arg(long)]
    pub intro: Option<String>,

    /// Seconds to wait before using the default (0 waits forever)
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SelectOutput {
    command: String,
    value: String,
    interactive: bool,
}

pub fn run(args: SelectArgs, global: &GlobalArgs) -> CmdResult<SelectOutput> {
    // Misuse is reported before anything is shown.
    let choices = Choice::from_pairs(args.pairs)?;
    let mut prompt = SelectPrompt::new(args.question, choices)
        .with_timeout(super::resolve_timeout(args.timeout));
    if let Some(spec) = args.default.as_deref() {
        prompt = prompt.with_default(DefaultSpec::parse(spec)?);
    }
    if let Some(intro) = args.intro {
        prompt = prompt.with_intro(intro);
    }

    let mut engine = super::prompt_engine(global)?;
    let value = engine.select(&prompt)?;

    Ok((
        SelectOutput {
            command: "select".to_string(),
            value,
            interactive: engine.is_interactive(),
        },
        0,
    ))
}
