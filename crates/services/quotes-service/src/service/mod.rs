//! Service layer - business logic.

mod quote_service;

pub use quote_service::{QuoteManager, QuoteService};
