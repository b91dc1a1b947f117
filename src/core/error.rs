use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    PromptInvalidChoices,
    PromptInvalidDefault,

    InputClosed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::PromptInvalidChoices => "prompt.invalid_choices",
            ErrorCode::PromptInvalidDefault => "prompt.invalid_default",

            ErrorCode::InputClosed => "input.closed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidChoicesDetails {
    pub problem: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offending: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidDefaultDetails {
    pub spec: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    /// Caller handed a choice list that cannot be displayed (empty, or an
    /// alternating label/value list with a dangling entry).
    pub fn prompt_invalid_choices(
        problem: impl Into<String>,
        count: usize,
        offending: Option<String>,
    ) -> Self {
        let problem = problem.into();
        let message = match &offending {
            Some(value) => format!("Invalid choice list: {} ('{}')", problem, value),
            None => format!("Invalid choice list: {}", problem),
        };
        let details = to_details(InvalidChoicesDetails {
            problem,
            count,
            offending,
        });

        Self::new(ErrorCode::PromptInvalidChoices, message, details)
    }

    pub fn prompt_invalid_default(spec: impl Into<String>, problem: impl Into<String>) -> Self {
        let spec = spec.into();
        let problem = problem.into();
        let message = format!("Invalid default specifier '{}': {}", spec, problem);
        let details = to_details(InvalidDefaultDetails { spec, problem });

        Self::new(ErrorCode::PromptInvalidDefault, message, details)
            .with_hint("Use index:<n>, label:<text> or value:<text>")
    }

    /// The input stream reached end-of-file while a prompt was waiting.
    pub fn input_closed(context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InputClosed,
            "Input stream closed while waiting for an answer",
            serde_json::json!({ "context": context }),
        )
        .with_hint("Pass --yes to answer every prompt with its default")
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = to_details(ConfigInvalidJsonDetails {
            path: path.into(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    /// Map a failed read. End-of-file gets its own code since it usually
    /// means stdin was not attached to an operator at all.
    pub fn from_read(err: std::io::Error, context: &str) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::input_closed(Some(context.to_string()))
        } else {
            Self::internal_io(err.to_string(), Some(context.to_string()))
        }
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_choices_names_offending_value() {
        let err = Error::prompt_invalid_choices("dangling label", 3, Some("C".to_string()));
        assert_eq!(err.code.as_str(), "prompt.invalid_choices");
        assert!(err.message.contains("'C'"));
        assert_eq!(err.details["offending"], "C");
        assert_eq!(err.details["count"], 3);
    }

    #[test]
    fn invalid_default_carries_hint() {
        let err = Error::prompt_invalid_default("position:2", "unknown tag 'position'");
        assert_eq!(err.code, ErrorCode::PromptInvalidDefault);
        assert_eq!(err.details["spec"], "position:2");
        assert_eq!(err.hints.len(), 1);
    }

    #[test]
    fn eof_maps_to_input_closed() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err = Error::from_read(io, "read answer");
        assert_eq!(err.code, ErrorCode::InputClosed);
    }

    #[test]
    fn other_read_errors_map_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from_read(io, "read answer");
        assert_eq!(err.code.as_str(), "internal.io_error");
        assert_eq!(err.details["context"], "read answer");
    }
}
