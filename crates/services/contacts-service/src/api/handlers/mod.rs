//! HTTP request handlers.

pub mod auth_handler;
pub mod contact_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use contact_handler::contact_routes;
pub use user_handler::user_routes;
