//! Shared handler state.

use std::sync::Arc;

use common::auth::JwtKeys;

use crate::config::QuotesServiceConfig;
use crate::infra::Database;
use crate::repository::QuoteStore;
use crate::service::{QuoteManager, QuoteService};

#[derive(Clone)]
pub struct AppState {
    pub quote_service: Arc<dyn QuoteService>,
    pub jwt_keys: Arc<JwtKeys>,
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the SeaORM-backed service onto an open database.
    pub fn from_config(database: Arc<Database>, config: &QuotesServiceConfig) -> Self {
        let repo = Arc::new(QuoteStore::new(database.get_connection()));
        Self::new(Arc::new(QuoteManager::new(repo)), config.jwt_keys(), database)
    }

    pub fn new(quote_service: Arc<dyn QuoteService>, jwt_keys: JwtKeys, database: Arc<Database>) -> Self {
        Self {
            quote_service,
            jwt_keys: Arc::new(jwt_keys),
            database,
        }
    }
}
