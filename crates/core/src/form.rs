//! Registration form state.
//!
//! Mirrors what the registration page does with user input: values are
//! stored on every change, a field is validated once it has been touched
//! (blurred), and submission is refused while any field is invalid. The
//! same rules apply to a JSON record posted straight to the REST API via
//! [`registrant_from_json_at`].

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::age::{self, AgeError, BIRTH_DATE_KEY};
use crate::error::CoreError;
use crate::registrant::Registrant;
use crate::types::CalendarDate;
use crate::validation::{
    validate_age_at, validate_city, validate_email, validate_name, validate_postal_code,
    ErrorCode, FieldError, FieldInput, ValidationOutcome,
};

/// Per-field errors, ordered like the form.
pub type FieldErrors = BTreeMap<FormField, FieldError>;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// One input of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    BirthDate,
    PostalCode,
    City,
}

impl FormField {
    /// Every field, in display order.
    pub const ALL: [FormField; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::BirthDate,
        Self::PostalCode,
        Self::City,
    ];

    /// Wire and form-input name.
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::BirthDate => "birthDate",
            Self::PostalCode => "postalCode",
            Self::City => "city",
        }
    }

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "Prénom",
            Self::LastName => "Nom",
            Self::Email => "Email",
            Self::BirthDate => "Date de naissance",
            Self::PostalCode => "Code Postal",
            Self::City => "Ville",
        }
    }

    /// HTML input type.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::BirthDate => "date",
            _ => "text",
        }
    }
}

impl FromStr for FormField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown form field '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Field dispatch
// ---------------------------------------------------------------------------

/// Validate the raw text of a birth date input.
pub fn validate_birth_date_text_at(raw: &str, today: CalendarDate) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::rejected(ErrorCode::BirthDateRequired, "Birth date is required");
    }
    let mut person = Map::new();
    person.insert(BIRTH_DATE_KEY.to_owned(), Value::from(raw));
    validate_age_at(Some(&Value::Object(person)), today)
}

fn validate_input(field: FormField, input: FieldInput<'_>, today: CalendarDate) -> ValidationOutcome {
    match field {
        FormField::FirstName | FormField::LastName => validate_name(input),
        FormField::Email => validate_email(input),
        FormField::PostalCode => validate_postal_code(input),
        FormField::City => validate_city(input),
        FormField::BirthDate => match input {
            FieldInput::Text(raw) => validate_birth_date_text_at(raw, today),
            FieldInput::Missing => validate_birth_date_text_at("", today),
            FieldInput::NotText => ValidationOutcome::rejected(
                ErrorCode::InvalidParameter,
                AgeError::NotADate.to_string(),
            ),
        },
    }
}

/// Validate the raw text of any form input.
pub fn validate_value_at(field: FormField, raw: &str, today: CalendarDate) -> ValidationOutcome {
    validate_input(field, FieldInput::Text(raw), today)
}

/// Validate every field of a JSON record.
///
/// Missing keys and non-string values surface as the pre-check codes;
/// the birth date is checked on the record itself, so a missing
/// `birthDate` reports the age calculator's message.
pub fn validate_json_at(
    record: &Value,
    today: CalendarDate,
) -> BTreeMap<FormField, ValidationOutcome> {
    FormField::ALL
        .into_iter()
        .map(|field| {
            let outcome = match field {
                FormField::BirthDate => validate_age_at(Some(record), today),
                other => validate_input(other, FieldInput::from(record.get(other.name())), today),
            };
            (field, outcome)
        })
        .collect()
}

/// [`validate_json_at`] relative to the current date.
pub fn validate_json(record: &Value) -> BTreeMap<FormField, ValidationOutcome> {
    validate_json_at(record, age::today())
}

/// Build a registrant from a JSON record, or report every invalid field.
pub fn registrant_from_json_at(
    record: &Value,
    today: CalendarDate,
) -> Result<Registrant, FieldErrors> {
    let outcomes = validate_json_at(record, today);
    assemble(outcomes, age::birth_date_of(Some(record)))
}

/// [`registrant_from_json_at`] relative to the current date.
pub fn registrant_from_json(record: &Value) -> Result<Registrant, FieldErrors> {
    registrant_from_json_at(record, age::today())
}

fn assemble(
    mut outcomes: BTreeMap<FormField, ValidationOutcome>,
    birth_date: Result<CalendarDate, AgeError>,
) -> Result<Registrant, FieldErrors> {
    let errors: FieldErrors = outcomes
        .iter()
        .filter_map(|(field, outcome)| outcome.error.clone().map(|err| (*field, err)))
        .collect();
    if !errors.is_empty() {
        return Err(errors);
    }

    let birth_date = birth_date.map_err(|err| {
        FieldErrors::from([(
            FormField::BirthDate,
            FieldError::new(ErrorCode::InvalidParameter, err.to_string()),
        )])
    })?;

    let mut take = |field: FormField| {
        outcomes
            .remove(&field)
            .and_then(|outcome| outcome.sanitized)
            .unwrap_or_default()
    };

    Ok(Registrant {
        first_name: take(FormField::FirstName),
        last_name: take(FormField::LastName),
        email: take(FormField::Email),
        birth_date,
        postal_code: take(FormField::PostalCode),
        city: take(FormField::City),
    })
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// State of one registration form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    values: BTreeMap<FormField, String>,
    touched: BTreeSet<FormField>,
    errors: FieldErrors,
    reference_date: Option<CalendarDate>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin "today" for age checks instead of reading the clock.
    pub fn with_reference_date(mut self, today: CalendarDate) -> Self {
        self.reference_date = Some(today);
        self
    }

    fn today(&self) -> CalendarDate {
        self.reference_date.unwrap_or_else(age::today)
    }

    pub fn value(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    pub fn error(&self, field: FormField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Error for `value` in `field`, if any.
    pub fn validate_field(&self, field: FormField, value: &str) -> Option<FieldError> {
        validate_value_at(field, value, self.today()).error
    }

    fn record_error(&mut self, field: FormField) {
        match self.validate_field(field, self.value(field)) {
            Some(err) => {
                self.errors.insert(field, err);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Store a new value; re-validate only once the field was touched.
    pub fn change(&mut self, field: FormField, value: impl Into<String>) {
        self.values.insert(field, value.into());
        if self.is_touched(field) {
            self.record_error(field);
        }
    }

    /// Mark the field touched and validate its current value.
    pub fn blur(&mut self, field: FormField) {
        self.touched.insert(field);
        self.record_error(field);
    }

    fn outcomes(&self) -> BTreeMap<FormField, ValidationOutcome> {
        let today = self.today();
        FormField::ALL
            .into_iter()
            .map(|field| (field, validate_value_at(field, self.value(field), today)))
            .collect()
    }

    /// Every field filled and passing its validator.
    pub fn is_valid(&self) -> bool {
        FormField::ALL
            .into_iter()
            .all(|field| !self.value(field).is_empty())
            && self.outcomes().values().all(|outcome| outcome.valid)
    }

    /// Hand out the sanitized registrant and reset the form, or record
    /// and return every field error.
    pub fn submit(&mut self) -> Result<Registrant, FieldErrors> {
        let birth_date = age::parse_birth_date(self.value(FormField::BirthDate));
        match assemble(self.outcomes(), birth_date) {
            Ok(registrant) => {
                self.values.clear();
                self.touched.clear();
                self.errors.clear();
                Ok(registrant)
            }
            Err(errors) => {
                self.touched.extend(FormField::ALL);
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}
