//! CLI response envelope and exit codes.
//!
//! Every JSON-mode command prints one envelope on stdout. Failures carry a
//! [`FailureKind`] so scripts can tell caller misuse from a closed terminal
//! without parsing codes, and every envelope repeats the process exit code
//! (`confirm` answered "no" succeeds with exit code 1).

use serde::Serialize;
use termprompt::error::Hint;
use termprompt::{Error, ErrorCode, Result};

/// Broad failure classes, one exit code each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Bad arguments, choice lists, default specifiers or config.
    Misuse,
    /// Standard input ended before an answer arrived.
    InputClosed,
    Internal,
}

impl FailureKind {
    pub fn of(code: ErrorCode) -> Self {
        match code {
            ErrorCode::ConfigInvalidJson
            | ErrorCode::ConfigInvalidValue
            | ErrorCode::ValidationInvalidArgument
            | ErrorCode::PromptInvalidChoices
            | ErrorCode::PromptInvalidDefault => FailureKind::Misuse,

            ErrorCode::InputClosed => FailureKind::InputClosed,

            ErrorCode::InternalIoError
            | ErrorCode::InternalJsonError
            | ErrorCode::InternalUnexpected => FailureKind::Internal,
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            FailureKind::Internal => 1,
            FailureKind::Misuse => 2,
            FailureKind::InputClosed => 3,
        }
    }
}

#[derive(Debug, Serialize)]
struct Envelope {
    success: bool,
    exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Failure>,
}

#[derive(Debug, Serialize)]
struct Failure {
    kind: FailureKind,
    code: &'static str,
    message: String,
    details: serde_json::Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    hints: Vec<Hint>,
}

impl Envelope {
    fn new(result: Result<serde_json::Value>, exit_code: i32) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                exit_code,
                data: Some(data),
                error: None,
            },
            Err(err) => Self {
                success: false,
                exit_code,
                data: None,
                error: Some(Failure {
                    kind: FailureKind::of(err.code),
                    code: err.code.as_str(),
                    message: err.message,
                    details: err.details,
                    hints: err.hints,
                }),
            },
        }
    }
}

/// Serialize a command's output, keeping its own exit code on success and
/// deriving one from the error otherwise.
pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                FailureKind::Internal.exit_code(),
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    FailureKind::of(code).exit_code()
}

/// Print the envelope for `result` on stdout. A closed pipe is not an error.
pub fn print_json_result(result: Result<serde_json::Value>, exit_code: i32) -> Result<()> {
    use std::io::{self, Write};

    let payload = serde_json::to_string_pretty(&Envelope::new(result, exit_code)).map_err(|e| {
        Error::internal_json(e.to_string(), Some("serialize response".to_string()))
    })?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match writeln!(handle, "{}", payload) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        )),
    }
}
