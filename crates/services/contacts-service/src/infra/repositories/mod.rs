//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod contact_repository;
pub(crate) mod entities;
mod user_repository;

pub use contact_repository::{ContactRepository, ContactStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(test)]
pub use contact_repository::MockContactRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
