//! Field validators for registrant input.
//!
//! Validators never fail: each returns a [`ValidationOutcome`] carrying
//! either the sanitized (trimmed) value or a typed [`ErrorCode`].

pub mod fields;
pub mod input;
pub mod outcome;

pub use fields::{
    validate_age, validate_age_at, validate_city, validate_email, validate_name,
    validate_postal_code, EMAIL_MAX_LENGTH, MAX_AGE, MIN_AGE,
};
pub use input::{FieldInput, FieldKind};
pub use outcome::{ErrorCode, FieldError, ValidationOutcome};
