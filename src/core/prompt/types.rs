use crate::error::{Error, Result};
use crate::utils::parser;

/// Free text input.
#[derive(Debug, Clone)]
pub struct TextPrompt {
    pub question: String,
    /// Returned when the answer is empty.
    pub default: String,
    /// Seconds; 0 waits forever.
    pub timeout: u64,
}

impl TextPrompt {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            default: String::new(),
            timeout: 0,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

/// A yes/no confirmation prompt.
#[derive(Debug, Clone)]
pub struct YesNoPrompt {
    pub question: String,
    /// true = default yes [Y/n], false = default no [y/N]
    pub default: bool,
    pub timeout: u64,
}

impl YesNoPrompt {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            default: true,
            timeout: 0,
        }
    }

    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl Choice<String> {
    /// Build choices from an alternating `label, value, label, value, ...`
    /// list. A dangling label is a caller bug and is rejected.
    pub fn from_pairs<I, S>(flat: I) -> Result<Vec<Choice<String>>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let flat: Vec<String> = flat.into_iter().map(Into::into).collect();
        if flat.len() % 2 != 0 {
            return Err(Error::prompt_invalid_choices(
                "labels and values must come in pairs",
                flat.len(),
                flat.last().cloned(),
            ));
        }

        Ok(flat
            .chunks(2)
            .map(|pair| Choice::new(pair[0].clone(), pair[1].clone()))
            .collect())
    }
}

/// Which choice a selection prompt picks on an empty answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSpec<T> {
    /// 1-based position; out of range falls back to the first choice.
    Index(usize),
    ByLabel(String),
    ByValue(T),
}

impl DefaultSpec<String> {
    /// Parse `index:<n>`, `label:<text>` or `value:<text>`.
    pub fn parse(spec: &str) -> Result<Self> {
        let Some((tag, rest)) = spec.split_once(':') else {
            return Err(Error::prompt_invalid_default(spec, "missing tag"));
        };

        match tag.trim().to_ascii_lowercase().as_str() {
            "index" => parser::parse_count(rest)
                .map(DefaultSpec::Index)
                .ok_or_else(|| Error::prompt_invalid_default(spec, "index must be a number")),
            "label" => Ok(DefaultSpec::ByLabel(rest.to_string())),
            "value" => Ok(DefaultSpec::ByValue(rest.to_string())),
            other => Err(Error::prompt_invalid_default(
                spec,
                format!("unknown tag '{}'", other),
            )),
        }
    }
}

impl<T: PartialEq> DefaultSpec<T> {
    /// Resolve to a 1-based index into `choices`. Anything that does not
    /// identify a choice falls back to 1.
    pub fn resolve(&self, choices: &[Choice<T>]) -> usize {
        let found = match self {
            DefaultSpec::Index(n) => Some(*n).filter(|n| (1..=choices.len()).contains(n)),
            DefaultSpec::ByLabel(label) => choices
                .iter()
                .position(|c| &c.label == label)
                .map(|i| i + 1),
            DefaultSpec::ByValue(value) => choices
                .iter()
                .position(|c| &c.value == value)
                .map(|i| i + 1),
        };
        found.unwrap_or(1)
    }
}

/// Select one option from a numbered list.
#[derive(Debug, Clone)]
pub struct SelectPrompt<T> {
    pub question: String,
    pub choices: Vec<Choice<T>>,
    /// `None` selects the first choice.
    pub default: Option<DefaultSpec<T>>,
    pub timeout: u64,
    /// Wrapped text shown above the list.
    pub intro: Option<String>,
}

impl<T> SelectPrompt<T> {
    pub fn new(question: impl Into<String>, choices: Vec<Choice<T>>) -> Self {
        Self {
            question: question.into(),
            choices,
            default: None,
            timeout: 0,
            intro: None,
        }
    }

    pub fn with_default(mut self, default: DefaultSpec<T>) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = Some(intro.into());
        self
    }
}

impl<T: PartialEq> SelectPrompt<T> {
    pub fn default_index(&self) -> usize {
        self.default
            .as_ref()
            .map(|spec| spec.resolve(&self.choices))
            .unwrap_or(1)
    }
}
