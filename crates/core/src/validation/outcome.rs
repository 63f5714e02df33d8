//! Validation result types.

use serde::{Deserialize, Serialize};

use crate::types::Age;

/// Machine-readable reason a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingName,
    MissingEmail,
    MissingPostalCode,
    MissingCity,
    EmptyName,
    EmptyEmail,
    EmptyPostalCode,
    EmptyCity,
    InvalidType,
    XssDetected,
    InvalidNameFormat,
    InvalidCityFormat,
    EmailTooLong,
    InvalidEmailFormat,
    InvalidPostalCodeLength,
    InvalidPostalCodeFormat,
    #[serde(rename = "AGE_UNDER_18")]
    AgeUnder18,
    AgeTooOld,
    InvalidParameter,
    BirthDateRequired,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingName => "MISSING_NAME",
            Self::MissingEmail => "MISSING_EMAIL",
            Self::MissingPostalCode => "MISSING_POSTAL_CODE",
            Self::MissingCity => "MISSING_CITY",
            Self::EmptyName => "EMPTY_NAME",
            Self::EmptyEmail => "EMPTY_EMAIL",
            Self::EmptyPostalCode => "EMPTY_POSTAL_CODE",
            Self::EmptyCity => "EMPTY_CITY",
            Self::InvalidType => "INVALID_TYPE",
            Self::XssDetected => "XSS_DETECTED",
            Self::InvalidNameFormat => "INVALID_NAME_FORMAT",
            Self::InvalidCityFormat => "INVALID_CITY_FORMAT",
            Self::EmailTooLong => "EMAIL_TOO_LONG",
            Self::InvalidEmailFormat => "INVALID_EMAIL_FORMAT",
            Self::InvalidPostalCodeLength => "INVALID_POSTAL_CODE_LENGTH",
            Self::InvalidPostalCodeFormat => "INVALID_POSTAL_CODE_FORMAT",
            Self::AgeUnder18 => "AGE_UNDER_18",
            Self::AgeTooOld => "AGE_TOO_OLD",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::BirthDateRequired => "BIRTH_DATE_REQUIRED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected field: code plus user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub code: ErrorCode,
    pub message: String,
}

impl FieldError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Result of running one validator.
///
/// `sanitized` is set on success for text fields, `age` is set by the
/// age validator whenever an age could be computed (even when the band
/// check fails).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Age>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldError>,
}

impl ValidationOutcome {
    /// Accepted text field with its sanitized value.
    pub fn sanitized(value: impl Into<String>) -> Self {
        Self {
            valid: true,
            sanitized: Some(value.into()),
            age: None,
            error: None,
        }
    }

    /// Accepted age.
    pub fn of_age(age: Age) -> Self {
        Self {
            valid: true,
            sanitized: None,
            age: Some(age),
            error: None,
        }
    }

    pub fn rejected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            sanitized: None,
            age: None,
            error: Some(FieldError::new(code, message)),
        }
    }

    pub fn with_age(mut self, age: Age) -> Self {
        self.age = Some(age);
        self
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.error.as_ref().map(|e| e.code)
    }

    pub fn message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}
