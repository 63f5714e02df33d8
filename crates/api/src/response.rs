//! Shared response envelope types for API handlers.
//!
//! `/api/v1` responses use a `{ "data": ... }` envelope. The bare `/users`
//! resource does not: it speaks the plain registrant shape so that any
//! REST client (including `signup_db::RemoteStore`) can use it.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
