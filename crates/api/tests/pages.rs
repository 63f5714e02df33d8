//! Integration tests for the server-rendered pages.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_text, get, post_form, valid_registrant};
use signup_db::{MemoryStore, RegistrantStore};

const VALID_FORM: &[(&str, &str)] = &[
    ("firstName", "Jean"),
    ("lastName", "Dupont"),
    ("email", "jean.dupont%40example.com"),
    ("birthDate", "1990-05-15"),
    ("postalCode", "75001"),
    ("city", "Paris"),
];

#[tokio::test]
async fn home_shows_zero_registrants() {
    let (app, _) = common::build_test_app();
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("0 utilisateur(s) inscrit(s)"));
    assert!(!page.contains("<table>"));
    assert!(page.contains("href=\"/register\""));
}

#[tokio::test]
async fn home_lists_stored_registrants() {
    let (app, store) = common::build_test_app();
    store.add(valid_registrant()).await.unwrap();

    let page = body_text(get(app, "/").await).await;
    assert!(page.contains("1 utilisateur(s) inscrit(s)"));
    assert!(page.contains("<td>Dupont</td>"));
}

#[tokio::test]
async fn registration_page_renders_every_field() {
    let (app, _) = common::build_test_app();
    let response = get(app, "/register").await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    for name in ["firstName", "lastName", "email", "birthDate", "postalCode", "city"] {
        assert!(page.contains(&format!("name=\"{name}\"")), "missing input {name}");
    }
    assert!(page.contains("type=\"date\""));
    assert!(!page.contains("error-message"));
}

#[tokio::test]
async fn valid_submission_is_stored_and_form_reset() {
    let (app, store) = common::build_test_app();

    let response = post_form(app, "/register", VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("data-testid=\"success-toaster\""));
    assert!(!page.contains("value=\"Jean\""));

    let stored = store.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email, "jean.dupont@example.com");
}

#[tokio::test]
async fn invalid_submission_echoes_values_and_errors() {
    let (app, store) = common::build_test_app();

    let fields = [
        ("firstName", "Jean"),
        ("lastName", "Dupont"),
        ("email", "jean.dupont%40example.com"),
        ("birthDate", ""),
        ("postalCode", "750"),
        ("city", "Paris"),
    ];
    let response = post_form(app, "/register", &fields).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let page = body_text(response).await;
    assert!(page.contains("data-testid=\"postalCode-error\""));
    assert!(page.contains("Postal code must be exactly 5 digits"));
    assert!(page.contains("data-testid=\"birthDate-error\""));
    assert!(page.contains("Birth date is required"));
    assert!(page.contains("value=\"750\""));
    assert!(!page.contains("success-toaster"));

    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn script_in_name_is_rejected_and_escaped() {
    let (app, _) = common::build_test_app();

    let fields = [
        ("firstName", "%3Cscript%3Ealert(1)%3C%2Fscript%3E"),
        ("lastName", "Dupont"),
        ("email", "jean.dupont%40example.com"),
        ("birthDate", "1990-05-15"),
        ("postalCode", "75001"),
        ("city", "Paris"),
    ];
    let page = body_text(post_form(app, "/register", &fields).await).await;

    assert!(page.contains("Potential XSS attack detected"));
    assert!(!page.contains("<script>"));
}

#[tokio::test]
async fn pages_mount_under_base_path() {
    let mut config = common::test_config();
    config.base_path = "/inscription".to_string();
    let store = Arc::new(MemoryStore::new());
    let app = common::build_app_with(store.clone(), config);

    let page = body_text(get(app.clone(), "/inscription").await).await;
    assert!(page.contains("href=\"/inscription/register\""));

    let response = post_form(app.clone(), "/inscription/register", VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.count().await.unwrap(), 1);

    // The REST resource stays at the root.
    let response = get(app, "/users").await;
    assert_eq!(response.status(), StatusCode::OK);
}
