//! Contacts App - address book API.
//!
//! Users sign up, confirm their email and manage their own contacts, with
//! search, upcoming birthday reminders and per-client rate limits.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: Command-line interface
//! - **config**: Application configuration and constants
//! - **domain**: Contacts, users, birthday rules
//! - **schemas**: Validated request and response bodies
//! - **services**: Application use cases
//! - **infra**: PostgreSQL repositories and Redis counters
//! - **api**: HTTP handlers, middleware, and routes
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -p contacts-service -- serve
//!
//! # Run migrations
//! cargo run -p contacts-service -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod infra;
pub mod schemas;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use common::{AppError, AppResult, OptionExt};
pub use config::Config;
pub use domain::{Contact, User};
