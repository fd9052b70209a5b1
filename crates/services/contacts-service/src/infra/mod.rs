//! Infrastructure layer - External systems integration
//!
//! - PostgreSQL connection, migrations and repositories
//! - Redis counters for rate limiting

pub mod cache;
pub mod db;
pub mod repositories;

pub use cache::{Cache, RateLimitDecision, RateLimitStore};
pub use db::{Database, Migrator};
pub use repositories::{ContactRepository, ContactStore, UserRepository, UserStore};

#[cfg(test)]
pub use cache::MockRateLimitStore;
#[cfg(test)]
pub use repositories::{MockContactRepository, MockUserRepository};
