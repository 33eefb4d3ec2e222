//! HTTP adapter - REST API exposure.
//!
//! Thin translation layer: requests become calls on the ports and the
//! generation service, typed errors become status codes, nothing here
//! holds business logic.

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::api_router;
pub use state::AppState;
