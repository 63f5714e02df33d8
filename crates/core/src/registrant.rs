//! The registrant record.

use serde::{Deserialize, Serialize};

use crate::types::CalendarDate;

/// One person who completed the registration form.
///
/// Values are stored sanitized (trimmed). Only [`crate::form`] builds
/// these from user input, after every field validator has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Serialized as `YYYY-MM-DD`.
    pub birth_date: CalendarDate,
    pub postal_code: String,
    pub city: String,
}
