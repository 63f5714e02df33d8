//! Per-field validation rules.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::input::{precheck, FieldInput, FieldKind};
use super::outcome::{ErrorCode, ValidationOutcome};
use crate::age::{self, AgeError};
use crate::types::{Age, CalendarDate};

/// Longest accepted email address (RFC 5321 path limit), in UTF-16
/// code units.
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Minimum age to register.
pub const MIN_AGE: Age = 18;

/// Ages above this are treated as a mistyped birth date.
pub const MAX_AGE: Age = 150;

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static JAVASCRIPT_SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("valid regex"));

static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("valid regex"));

/// Letters (Latin-1 accents included), whitespace and hyphens.
static PLACE_OR_PERSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ\s-]+$").expect("valid regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9._+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?)+$",
    )
    .expect("valid regex")
});

static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("valid regex"));

static ALL_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Names and cities
// ---------------------------------------------------------------------------

fn looks_like_xss(text: &str) -> bool {
    HTML_TAG_RE.is_match(text) || JAVASCRIPT_SCHEME_RE.is_match(text)
}

/// Shared rules for person and place names; only codes and wording differ.
fn validate_proper_noun(
    input: FieldInput<'_>,
    kind: FieldKind,
    format_code: ErrorCode,
    subject: &str,
) -> ValidationOutcome {
    let trimmed = match precheck(input, kind) {
        Ok(trimmed) => trimmed,
        Err(rejected) => return rejected,
    };

    if looks_like_xss(trimmed) {
        return ValidationOutcome::rejected(
            ErrorCode::XssDetected,
            "Potential XSS attack detected",
        );
    }

    if DIGIT_RE.is_match(trimmed) {
        return ValidationOutcome::rejected(
            format_code,
            format!("{subject} cannot contain numbers"),
        );
    }

    if !PLACE_OR_PERSON_RE.is_match(trimmed) {
        return ValidationOutcome::rejected(
            format_code,
            format!("{subject} cannot contain special characters"),
        );
    }

    ValidationOutcome::sanitized(trimmed)
}

/// Validate a first or last name.
pub fn validate_name<'a>(input: impl Into<FieldInput<'a>>) -> ValidationOutcome {
    validate_proper_noun(
        input.into(),
        FieldKind::Name,
        ErrorCode::InvalidNameFormat,
        "Name",
    )
}

/// Validate a city name.
pub fn validate_city<'a>(input: impl Into<FieldInput<'a>>) -> ValidationOutcome {
    validate_proper_noun(
        input.into(),
        FieldKind::City,
        ErrorCode::InvalidCityFormat,
        "City name",
    )
}

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

/// Validate an email address.
pub fn validate_email<'a>(input: impl Into<FieldInput<'a>>) -> ValidationOutcome {
    let trimmed = match precheck(input.into(), FieldKind::Email) {
        Ok(trimmed) => trimmed,
        Err(rejected) => return rejected,
    };

    if trimmed.encode_utf16().count() > EMAIL_MAX_LENGTH {
        return ValidationOutcome::rejected(ErrorCode::EmailTooLong, "Email is too long");
    }

    if !EMAIL_RE.is_match(trimmed) {
        return ValidationOutcome::rejected(
            ErrorCode::InvalidEmailFormat,
            "Email format is invalid. Expected format: local@domain.tld",
        );
    }

    if trimmed.contains("..") {
        return ValidationOutcome::rejected(
            ErrorCode::InvalidEmailFormat,
            "Email cannot contain consecutive dots",
        );
    }

    ValidationOutcome::sanitized(trimmed)
}

// ---------------------------------------------------------------------------
// Postal code
// ---------------------------------------------------------------------------

/// Validate a five-digit (French) postal code.
pub fn validate_postal_code<'a>(input: impl Into<FieldInput<'a>>) -> ValidationOutcome {
    let trimmed = match precheck(input.into(), FieldKind::PostalCode) {
        Ok(trimmed) => trimmed,
        Err(rejected) => return rejected,
    };

    if POSTAL_CODE_RE.is_match(trimmed) {
        return ValidationOutcome::sanitized(trimmed);
    }

    if ALL_DIGITS_RE.is_match(trimmed) {
        ValidationOutcome::rejected(
            ErrorCode::InvalidPostalCodeLength,
            "Postal code must be exactly 5 digits",
        )
    } else {
        ValidationOutcome::rejected(
            ErrorCode::InvalidPostalCodeFormat,
            "Postal code must contain digits only",
        )
    }
}

// ---------------------------------------------------------------------------
// Age
// ---------------------------------------------------------------------------

fn classify_age(computed: Result<Age, AgeError>) -> ValidationOutcome {
    let age = match computed {
        Ok(age) => age,
        Err(err) => {
            return ValidationOutcome::rejected(ErrorCode::InvalidParameter, err.to_string())
        }
    };

    if age > MAX_AGE {
        return ValidationOutcome::rejected(ErrorCode::AgeTooOld, "Birth date is not valid")
            .with_age(age);
    }

    if age < MIN_AGE {
        return ValidationOutcome::rejected(
            ErrorCode::AgeUnder18,
            "You must be at least 18 years old",
        )
        .with_age(age);
    }

    ValidationOutcome::of_age(age)
}

/// Validate that a person object is between 18 and 150 years old on `today`.
pub fn validate_age_at(person: Option<&Value>, today: CalendarDate) -> ValidationOutcome {
    classify_age(age::calculate_age_at(person, today))
}

/// Validate that a person object is between 18 and 150 years old.
pub fn validate_age(person: Option<&Value>) -> ValidationOutcome {
    validate_age_at(person, age::today())
}
