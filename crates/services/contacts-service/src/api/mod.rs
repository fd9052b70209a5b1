//! API layer - HTTP handlers and middleware
//!
//! - Request handlers
//! - Middleware (authentication, rate limiting)
//! - Route definitions and OpenAPI docs

pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
