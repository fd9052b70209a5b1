//! Domain layer - Core business entities and logic
//!
//! Contains the entities and rules that are independent of storage and HTTP.

pub mod birthday;
pub mod contact;
pub mod password;
pub mod user;

pub use contact::{Contact, ContactCriterion, ContactLookup, ContactQuery};
pub use password::Password;
pub use user::User;
