pub mod health;
pub mod pages;
pub mod users;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/count                   registrant count (GET)
/// /validation/registrant         dry-run validation of a record (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users/count", get(handlers::users::count_users))
        .route(
            "/validation/registrant",
            post(handlers::validation::validate_registrant),
        )
}
