//! Common utilities shared across the services.
//!
//! This crate provides:
//! - Unified error handling with HTTP response conversion
//! - Per-field validation and validating extractors
//! - JWT token keys and claims (feature `jwt`)
//! - Page-based pagination types

#[cfg(feature = "jwt")]
pub mod auth;
pub mod error;
pub mod pagination;
pub mod validation;

pub use error::{AppError, AppResult, OptionExt};
pub use pagination::{PageRequest, Paginated, PaginationMeta};
pub use validation::{
    decode, validate, FieldErrors, FromJsonFields, JsonFields, ValidatedJson, ValidatedQuery,
};
