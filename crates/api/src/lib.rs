//! Registration server library.
//!
//! Exposes config, state, error handling, rendering and routes so
//! integration tests and the binary entrypoint share one router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod html;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
