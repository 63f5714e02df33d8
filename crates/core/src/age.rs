//! Whole-year age from a date of birth.
//!
//! The calculator accepts a person-like JSON value carrying a `birthDate`
//! so that structurally broken input coming over the wire fails with a
//! descriptive [`AgeError`] instead of a deserialization error. The age
//! validator in [`crate::validation`] rewraps these failures.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde_json::Value;

use crate::types::{Age, CalendarDate};

/// Key holding the date of birth on a person object.
pub const BIRTH_DATE_KEY: &str = "birthDate";

/// Structural or semantic failure of the age calculator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    #[error("missing param p")]
    MissingParam,

    #[error("param p must be an object")]
    NotAnObject,

    #[error("birthDate property is required")]
    MissingBirthDate,

    #[error("birthDate must be a Date object")]
    NotADate,

    #[error("birthDate is not a valid date")]
    InvalidDate,

    #[error("birthDate cannot be in the future")]
    FutureDate,
}

/// Current UTC calendar date.
pub fn today() -> CalendarDate {
    Utc::now().date_naive()
}

/// Parse a birth date from its textual form.
///
/// Accepts `YYYY-MM-DD` (what a date input submits), RFC 3339 timestamps
/// (date taken in UTC) and `MM/DD/YYYY`.
pub fn parse_birth_date(raw: &str) -> Result<CalendarDate, AgeError> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").map_err(|_| AgeError::InvalidDate)
}

/// Extract and parse the `birthDate` of a person object.
pub fn birth_date_of(person: Option<&Value>) -> Result<CalendarDate, AgeError> {
    let person = match person {
        Some(value) if !is_falsy(value) => value,
        _ => return Err(AgeError::MissingParam),
    };

    let map = person.as_object().ok_or(AgeError::NotAnObject)?;

    match map.get(BIRTH_DATE_KEY) {
        None => Err(AgeError::MissingBirthDate),
        Some(Value::String(raw)) => parse_birth_date(raw),
        Some(_) => Err(AgeError::NotADate),
    }
}

/// Whole years elapsed between `birth_date` and `today`.
///
/// The year count drops by one until the anniversary (month, day) has
/// been reached. A 29 February birthday is reached on 1 March in
/// non-leap years.
pub fn age_between(birth_date: CalendarDate, today: CalendarDate) -> Result<Age, AgeError> {
    if birth_date > today {
        return Err(AgeError::FutureDate);
    }

    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }

    Age::try_from(years).map_err(|_| AgeError::FutureDate)
}

/// Age of `person` relative to `today`.
pub fn calculate_age_at(person: Option<&Value>, today: CalendarDate) -> Result<Age, AgeError> {
    let birth_date = birth_date_of(person)?;
    age_between(birth_date, today)
}

/// Age of `person` relative to the current UTC date.
pub fn calculate_age(person: Option<&Value>) -> Result<Age, AgeError> {
    calculate_age_at(person, today())
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn us_formatted_birth_date() {
        let person = json!({ "birthDate": "11/07/1991" });
        assert_eq!(calculate_age_at(Some(&person), date(2026, 10, 17)), Ok(34));
        assert_eq!(calculate_age_at(Some(&person), date(2026, 11, 7)), Ok(35));
    }

    #[test]
    fn iso_and_rfc3339_birth_dates() {
        let iso = json!({ "birthDate": "2000-03-15" });
        let ts = json!({ "birthDate": "2000-03-15T10:30:00Z" });
        assert_eq!(calculate_age_at(Some(&iso), date(2026, 10, 17)), Ok(26));
        assert_eq!(calculate_age_at(Some(&ts), date(2026, 10, 17)), Ok(26));
    }

    #[test]
    fn anniversary_boundary() {
        let today = date(2026, 10, 17);
        assert_eq!(age_between(date(2008, 10, 17), today), Ok(18));
        assert_eq!(age_between(date(2008, 10, 18), today), Ok(17));
        assert_eq!(age_between(today, today), Ok(0));
    }

    #[test]
    fn leap_day_birthday() {
        let born = date(2004, 2, 29);
        assert_eq!(age_between(born, date(2022, 2, 28)), Ok(17));
        assert_eq!(age_between(born, date(2022, 3, 1)), Ok(18));
    }

    #[test]
    fn missing_param() {
        assert_eq!(calculate_age(None), Err(AgeError::MissingParam));
        assert_eq!(calculate_age(Some(&Value::Null)), Err(AgeError::MissingParam));
        assert_eq!(calculate_age(Some(&json!(false))), Err(AgeError::MissingParam));
    }

    #[test]
    fn non_object_params() {
        assert_eq!(calculate_age(Some(&json!("1991-11-07"))), Err(AgeError::NotAnObject));
        assert_eq!(calculate_age(Some(&json!([1, 2]))), Err(AgeError::NotAnObject));
        assert_eq!(calculate_age(Some(&json!(42))), Err(AgeError::NotAnObject));
    }

    #[test]
    fn structural_birth_date_errors() {
        assert_matches!(
            calculate_age(Some(&json!({ "name": "x" }))),
            Err(AgeError::MissingBirthDate)
        );
        assert_matches!(
            calculate_age(Some(&json!({ "birthDate": 19911107 }))),
            Err(AgeError::NotADate)
        );
        assert_matches!(
            calculate_age(Some(&json!({ "birthDate": null }))),
            Err(AgeError::NotADate)
        );
        assert_matches!(
            calculate_age(Some(&json!({ "birthDate": "not a date" }))),
            Err(AgeError::InvalidDate)
        );
        assert_matches!(
            calculate_age(Some(&json!({ "birthDate": "2001-02-30" }))),
            Err(AgeError::InvalidDate)
        );
    }

    #[test]
    fn future_birth_date_rejected() {
        let person = json!({ "birthDate": "2026-10-18" });
        assert_eq!(
            calculate_age_at(Some(&person), date(2026, 10, 17)),
            Err(AgeError::FutureDate)
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(AgeError::MissingParam.to_string(), "missing param p");
        assert_eq!(
            AgeError::FutureDate.to_string(),
            "birthDate cannot be in the future"
        );
    }
}
