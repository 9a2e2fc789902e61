//! CLI response formatting and output.
//!
//! Provides the JSON envelope, plain-text printing, and exit code mapping.

use serde::Serialize;
use std::io::{self, Write};

use textkit::error::Hint;
use textkit::{Error, ErrorCode, Result};

use super::TextOutput;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn write_payload(handle: &mut dyn Write, payload: &str, context: &str) -> Result<()> {
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(e.to_string(), Some(context.to_string())));
    }
    Ok(())
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_payload(&mut handle, &payload, "write stdout")
}

/// Error envelope on stderr, for text mode where stdout carries data lines.
fn print_error_to_stderr(err: &Error) -> Result<()> {
    let payload = CliResponse::<()>::from_error(err).to_json()?;
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    write_payload(&mut handle, &payload, "write stderr")
}

pub fn print_success<T: Serialize>(data: T) -> Result<()> {
    print_response(&CliResponse::success(data))
}

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
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

/// Write a command result as plain text lines; errors go to stderr.
pub fn print_text_result<T: TextOutput>(result: Result<(T, i32)>) -> i32 {
    match result {
        Ok((data, exit_code)) => {
            let stdout = io::stdout();
            let mut handle = io::BufWriter::new(stdout.lock());
            let written = data.write_text(&mut handle).and_then(|_| handle.flush());
            match written {
                Ok(()) => exit_code,
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => exit_code,
                Err(e) => {
                    let err = Error::internal_io(e.to_string(), Some("write stdout".to_string()));
                    let _ = print_error_to_stderr(&err);
                    1
                }
            }
        }
        Err(err) => {
            let _ = print_error_to_stderr(&err);
            exit_code_for_error(err.code)
        }
    }
}

fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationInvalidArgument
        | ErrorCode::ValidationInvalidJson
        | ErrorCode::TemplateInvalid
        | ErrorCode::TemplateEmptySlot
        | ErrorCode::TemplateTooLarge => 2,

        ErrorCode::FieldOutOfRange
        | ErrorCode::NumberParseFailed
        | ErrorCode::TransliterationUnmapped
        | ErrorCode::CaseRoundTripFailed => 3,

        ErrorCode::InputNotFound => 4,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}

pub fn print_json_result(result: Result<serde_json::Value>) -> Result<()> {
    match result {
        Ok(data) => print_success(data),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}
