//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits.

mod auth_service;
mod contact_service;
pub mod container;
mod mailer;

pub use auth_service::{AuthService, Authenticator, EmailStatus};
pub use contact_service::{ContactManager, ContactService};
pub use container::Services;
pub use mailer::{LogMailer, Mailer};

#[cfg(test)]
pub use mailer::MockMailer;
