use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Mount the REST registrant resource at the root.
///
/// ```text
/// GET    /users      list
/// POST   /users      create (201)
/// DELETE /users      clear (204)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/users",
        get(users::list_users)
            .post(users::create_user)
            .delete(users::clear_users),
    )
}
