mod types;

pub use types::*;

use crate::console::Console;
use crate::error::{Error, Result};
use crate::mode::InteractionMode;
use crate::utils::parser;
use crate::width::OutputStream;
use crate::wrap::WrapRequest;

pub const INVALID_CHOICE_NOTICE: &str = "Invalid choice";

/// Data-driven interactive prompt engine.
/// Every request goes through one [`Console`], so defaults, timeouts and
/// non-interactive mode behave the same for all prompt kinds.
pub struct PromptEngine {
    console: Console,
}

impl PromptEngine {
    pub fn new(console: Console) -> Self {
        Self { console }
    }

    /// Prompts on stderr, answers from stdin.
    pub fn stderr(mode: impl InteractionMode + 'static, line_width: usize) -> Result<Self> {
        let console = Console::stdio(OutputStream::Stderr, mode)?;
        Ok(Self::new(console.with_line_width(line_width)))
    }

    pub fn is_interactive(&self) -> bool {
        !self.console.is_non_interactive()
    }

    /// Display wrapped informational text.
    pub fn message(&mut self, msg: &str) -> Result<()> {
        self.console.say(msg)
    }

    /// Run a free text prompt. Empty answers resolve to the default.
    pub fn text(&mut self, prompt: &TextPrompt) -> Result<String> {
        let display = format!("{} [{}]", prompt.question, prompt.default);

        let answer = self.console.read_line(&display, prompt.timeout)?;
        if answer.is_empty() {
            return Ok(prompt.default.clone());
        }
        Ok(answer)
    }

    /// Run a yes/no prompt, asking again until the answer is recognised.
    pub fn yes_no(&mut self, prompt: &YesNoPrompt) -> Result<bool> {
        let suffix = if prompt.default { "Y/n" } else { "y/N" };
        let display = format!("{} [{}]", prompt.question, suffix);

        loop {
            let answer = self.console.read_line(&display, prompt.timeout)?;
            let answer = answer.trim().to_lowercase();

            match answer.as_str() {
                "" => return Ok(prompt.default),
                "y" | "ye" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.console.say(INVALID_CHOICE_NOTICE)?,
            }
        }
    }

    /// Run a numbered selection prompt and return the chosen value.
    pub fn select<T: Clone + PartialEq>(&mut self, prompt: &SelectPrompt<T>) -> Result<T> {
        let count = prompt.choices.len();
        if count == 0 {
            return Err(Error::prompt_invalid_choices(
                "at least one choice is required",
                0,
                None,
            ));
        }

        let default_index = prompt.default_index();

        self.console.blank_line()?;
        if let Some(intro) = &prompt.intro {
            self.console.say(intro)?;
        }
        self.console.blank_line()?;
        for (i, choice) in prompt.choices.iter().enumerate() {
            let line = WrapRequest::new(choice.label.as_str())
                .with_prefix(format!("({})\t", i + 1))
                .with_continuation("\t");
            self.console.write_wrapped(&line)?;
        }
        self.console.blank_line()?;

        let display = format!("{} [{}]", prompt.question, default_index);

        let index = loop {
            let answer = self.console.read_line(&display, prompt.timeout)?;
            let answer = answer.trim();

            if answer.is_empty() {
                break default_index;
            }
            match parser::parse_count(answer) {
                Some(n) if (1..=count).contains(&n) => break n,
                _ => self.console.say(INVALID_CHOICE_NOTICE)?,
            }
        };

        Ok(prompt.choices[index - 1].value.clone())
    }
}
