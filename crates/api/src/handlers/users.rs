//! Handlers for the registrant collection.
//!
//! `/users` is the plain REST resource (`GET`, `POST`, `DELETE`) whose
//! bodies are bare registrant JSON. The count lives under `/api/v1` with
//! the usual `{ "data": ... }` envelope.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use signup_core::error::CoreError;
use signup_core::form::registrant_from_json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload of `GET /api/v1/users/count`.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

/// GET /users
///
/// Every registrant, in registration order.
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let registrants = state.store.list().await?;

    Ok(Json(registrants))
}

/// POST /users
///
/// Validate a registrant record and store its sanitized form. Invalid
/// records are rejected with every field error and nothing is stored.
pub async fn create_user(
    State(state): State<AppState>,
    Json(record): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let registrant = registrant_from_json(&record).map_err(|errors| {
        tracing::debug!(invalid_fields = errors.len(), "Registration rejected");
        CoreError::InvalidRegistration(errors)
    })?;

    let stored = state.store.add(registrant).await?;

    tracing::info!(backend = state.store.backend(), city = %stored.city, "Registrant added");

    Ok((StatusCode::CREATED, Json(stored)))
}

/// DELETE /users
///
/// Remove every registrant.
pub async fn clear_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    state.store.clear().await?;

    tracing::info!(backend = state.store.backend(), "Registrants cleared");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/count
pub async fn count_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let count = state.store.count().await?;

    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}
