use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,
    ValidationInvalidJson,

    TemplateInvalid,
    TemplateEmptySlot,
    TemplateTooLarge,

    InputNotFound,

    FieldOutOfRange,
    NumberParseFailed,
    TransliterationUnmapped,
    CaseRoundTripFailed,

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
            ErrorCode::ValidationInvalidJson => "validation.invalid_json",

            ErrorCode::TemplateInvalid => "template.invalid",
            ErrorCode::TemplateEmptySlot => "template.empty_slot",
            ErrorCode::TemplateTooLarge => "template.too_large",

            ErrorCode::InputNotFound => "input.not_found",

            ErrorCode::FieldOutOfRange => "data.field_out_of_range",
            ErrorCode::NumberParseFailed => "data.number_parse_failed",
            ErrorCode::TransliterationUnmapped => "data.transliteration_unmapped",
            ErrorCode::CaseRoundTripFailed => "data.case_round_trip_failed",

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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEmptySlotDetails {
    pub slot: usize,
    pub slot_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateTooLargeDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combinations: Option<usize>,
    pub limit: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputNotFoundDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOutOfRangeDetails {
    pub line: usize,
    pub field: usize,
    pub available: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberParseFailedDetails {
    pub line: usize,
    pub value: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransliterationUnmappedDetails {
    pub input: String,
    pub character: String,
    pub position: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRoundTripFailedDetails {
    pub input: String,
    pub output: String,
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
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn validation_invalid_json(err: serde_json::Error, context: Option<String>) -> Self {
        let details = serde_json::json!({
            "error": err.to_string(),
            "context": context,
        });

        Self::new(ErrorCode::ValidationInvalidJson, "Invalid JSON", details)
    }

    pub fn template_invalid(problem: impl Into<String>) -> Self {
        let problem = problem.into();
        Self::new(
            ErrorCode::TemplateInvalid,
            format!("Invalid template: {}", problem),
            serde_json::json!({ "problem": problem }),
        )
        .with_hint("A template needs at least one slot, one line per slot")
    }

    pub fn template_empty_slot(slot: usize, slot_count: usize) -> Self {
        Self::new(
            ErrorCode::TemplateEmptySlot,
            format!("Slot {} has no alternatives", slot),
            to_details(TemplateEmptySlotDetails { slot, slot_count }),
        )
        .with_hint("Use an empty alternative (e.g. 'word|') to make a slot optional")
    }

    pub fn template_too_large(combinations: Option<usize>, limit: usize) -> Self {
        let message = match combinations {
            Some(n) => format!(
                "Template expands to {} combinations, above the limit of {}",
                n, limit
            ),
            None => format!(
                "Template expands to more combinations than can be counted (limit {})",
                limit
            ),
        };

        Self::new(
            ErrorCode::TemplateTooLarge,
            message,
            to_details(TemplateTooLargeDetails {
                combinations,
                limit,
            }),
        )
        .with_hint("Use --limit to page through the output, or --count to only count it")
        .with_hint("Run 'textkit config set /defaults/generator/max_combinations <n>' to raise the limit")
    }

    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InputNotFound,
            "Input file not found",
            to_details(InputNotFoundDetails { path: path.into() }),
        )
    }

    pub fn field_out_of_range(line: usize, field: usize, available: usize) -> Self {
        Self::new(
            ErrorCode::FieldOutOfRange,
            format!(
                "Line {} has {} fields, field {} requested",
                line, available, field
            ),
            to_details(FieldOutOfRangeDetails {
                line,
                field,
                available,
            }),
        )
    }

    pub fn number_parse_failed(
        line: usize,
        value: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let value = value.into();
        Self::new(
            ErrorCode::NumberParseFailed,
            format!("Couldn't parse number from '{}' on line {}", value, line),
            to_details(NumberParseFailedDetails {
                line,
                value,
                error: error.into(),
            }),
        )
    }

    pub fn transliteration_unmapped(
        input: impl Into<String>,
        character: char,
        position: usize,
    ) -> Self {
        Self::new(
            ErrorCode::TransliterationUnmapped,
            format!("Couldn't transliterate '{}' at position {}", character, position),
            to_details(TransliterationUnmappedDetails {
                input: input.into(),
                character: character.to_string(),
                position,
            }),
        )
        .with_hint("Use --passthrough to copy unmapped characters unchanged")
    }

    pub fn case_round_trip_failed(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::CaseRoundTripFailed,
            "Case conversion changed more than letter case",
            to_details(CaseRoundTripFailedDetails {
                input: input.into(),
                output: output.into(),
            }),
        )
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            to_details(ConfigInvalidJsonDetails {
                path: path.into(),
                error: err.to_string(),
            }),
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            to_details(ConfigInvalidValueDetails {
                key: key.into(),
                value,
                problem: problem.into(),
            }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO error",
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            to_details(InternalJsonErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::internal_unexpected(message)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
