//! HTML page handlers.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Form;
use signup_core::form::{FormField, RegistrationForm};

use crate::error::AppResult;
use crate::html;
use crate::state::AppState;

/// GET /
///
/// Registrant count and list.
pub async fn home(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let registrants = state.store.list().await?;

    Ok(Html(html::render_home(&state.config.base_path, &registrants)))
}

/// GET /register
pub async fn registration_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(html::render_registration(
        &state.config.base_path,
        &RegistrationForm::new(),
        false,
    ))
}

/// POST /register
///
/// Every posted field counts as touched. A valid form is stored and the
/// page comes back empty with a success banner; an invalid one comes
/// back with the user's values and the per-field errors (422).
pub async fn submit_registration(
    State(state): State<AppState>,
    Form(input): Form<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let mut form = RegistrationForm::new();
    for field in FormField::ALL {
        let value = input.get(field.name()).cloned().unwrap_or_default();
        form.change(field, value);
        form.blur(field);
    }

    let base_path = &state.config.base_path;

    match form.submit() {
        Ok(registrant) => {
            let stored = state.store.add(registrant).await?;
            tracing::info!(city = %stored.city, "Registration form submitted");
            Ok((
                StatusCode::OK,
                Html(html::render_registration(base_path, &form, true)),
            ))
        }
        Err(errors) => {
            tracing::debug!(invalid_fields = errors.len(), "Registration form rejected");
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(html::render_registration(base_path, &form, false)),
            ))
        }
    }
}
