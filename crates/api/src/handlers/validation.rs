//! Dry-run validation of a registrant record.

use std::collections::BTreeMap;

use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use signup_core::form::{validate_json, FormField};
use signup_core::validation::ValidationOutcome;

use crate::error::AppResult;
use crate::response::DataResponse;

/// Per-field outcomes plus the overall verdict.
#[derive(Debug, Serialize)]
pub struct RegistrantValidation {
    pub valid: bool,
    pub fields: BTreeMap<FormField, ValidationOutcome>,
}

/// POST /api/v1/validation/registrant
///
/// Run every field validator on the record without storing anything.
pub async fn validate_registrant(Json(record): Json<Value>) -> AppResult<impl IntoResponse> {
    let fields = validate_json(&record);
    let valid = fields.values().all(|outcome| outcome.valid);

    Ok(Json(DataResponse {
        data: RegistrantValidation { valid, fields },
    }))
}
