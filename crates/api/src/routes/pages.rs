use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// HTML pages, mounted under the configured base path.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(pages::home)).route(
        "/register",
        get(pages::registration_page).post(pages::submit_registration),
    )
}
