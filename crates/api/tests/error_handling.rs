//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use signup_api::error::AppError;
use signup_core::error::CoreError;
use signup_core::form::FormField;
use signup_core::validation::{ErrorCode, FieldError};
use signup_db::StoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Unknown form field 'age'".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Unknown form field 'age'");
    assert!(json.get("fields").is_none());
}

#[tokio::test]
async fn invalid_registration_carries_field_errors() {
    let errors = [(
        FormField::PostalCode,
        FieldError::new(
            ErrorCode::InvalidPostalCodeLength,
            "Postal code must be exactly 5 digits",
        ),
    )]
    .into_iter()
    .collect();
    let err = AppError::Core(CoreError::InvalidRegistration(errors));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["fields"]["postalCode"]["code"],
        "INVALID_POSTAL_CODE_LENGTH"
    );
}

#[tokio::test]
async fn remote_api_error_returns_502() {
    let err = AppError::Store(StoreError::Api {
        status: 503,
        body: "maintenance".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "Remote registrant API returned HTTP 503");
}

#[tokio::test]
async fn io_error_is_sanitized() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/secret/users.json");
    let err = AppError::Store(StoreError::Io(io));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
