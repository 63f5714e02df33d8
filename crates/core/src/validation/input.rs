//! Raw field input and the shared presence/type pre-check.

use serde_json::Value;

use super::outcome::{ErrorCode, ValidationOutcome};

/// Raw value handed to a text validator.
///
/// Input arriving as JSON can be absent or of the wrong type; input
/// arriving from an HTML form is always text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput<'a> {
    Missing,
    Text(&'a str),
    NotText,
}

impl<'a> From<&'a str> for FieldInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for FieldInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl<'a> From<Option<&'a str>> for FieldInput<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Self::Missing, Self::Text)
    }
}

impl<'a> From<&'a Value> for FieldInput<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::String(s) => Self::Text(s),
            _ => Self::NotText,
        }
    }
}

impl<'a> From<Option<&'a Value>> for FieldInput<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(Self::Missing, Self::from)
    }
}

/// Which text field is being checked; drives the pre-check codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Email,
    PostalCode,
    City,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Email => "EMAIL",
            Self::PostalCode => "POSTAL_CODE",
            Self::City => "CITY",
        }
    }

    fn missing_code(self) -> ErrorCode {
        match self {
            Self::Name => ErrorCode::MissingName,
            Self::Email => ErrorCode::MissingEmail,
            Self::PostalCode => ErrorCode::MissingPostalCode,
            Self::City => ErrorCode::MissingCity,
        }
    }

    fn empty_code(self) -> ErrorCode {
        match self {
            Self::Name => ErrorCode::EmptyName,
            Self::Email => ErrorCode::EmptyEmail,
            Self::PostalCode => ErrorCode::EmptyPostalCode,
            Self::City => ErrorCode::EmptyCity,
        }
    }
}

/// Strip surrounding whitespace, byte-order marks included.
pub fn trim_input(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Reject missing, non-string and blank input; yield the trimmed text.
pub fn precheck<'a>(
    input: FieldInput<'a>,
    kind: FieldKind,
) -> Result<&'a str, ValidationOutcome> {
    let label = kind.label();
    match input {
        FieldInput::Missing => Err(ValidationOutcome::rejected(
            kind.missing_code(),
            format!("{label} is missing"),
        )),
        FieldInput::NotText => Err(ValidationOutcome::rejected(
            ErrorCode::InvalidType,
            format!("{label} must be a string"),
        )),
        FieldInput::Text(raw) => {
            let trimmed = trim_input(raw);
            if trimmed.is_empty() {
                Err(ValidationOutcome::rejected(
                    kind.empty_code(),
                    format!("{label} cannot be empty"),
                ))
            } else {
                Ok(trimmed)
            }
        }
    }
}
