//! Repository layer for data access.

pub mod entities;
mod quote_repository;

pub use quote_repository::{QuoteRepository, QuoteStore};

#[cfg(test)]
pub use quote_repository::MockQuoteRepository;
