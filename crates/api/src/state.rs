use std::sync::Arc;

use signup_db::RegistrantStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Where registrants are persisted.
    pub store: Arc<dyn RegistrantStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
