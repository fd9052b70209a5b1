//! HTTP layer - axum router, handlers and authentication.

mod auth;
mod handlers;
mod routes;
mod state;

pub use auth::{auth_middleware, Caller};
pub use routes::create_router;
pub use state::AppState;
