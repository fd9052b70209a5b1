//! Request and response bodies exposed over HTTP.

mod auth;
mod contact;

pub use auth::{LoginRequest, RequestEmail, SignupRequest, TokenResponse, UserDb, UserResponse};
pub use contact::{BirthdayParams, ContactModel, ContactResponse, ContactSearchParams};

/// Validate any request body, reporting every violated field.
pub use common::validate;
