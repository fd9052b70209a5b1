//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, RateLimitStore};
use crate::services::{AuthService, ContactService, Services};

/// Application state shared by every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub contact_service: Arc<dyn ContactService>,
    /// Request counters (Redis in production)
    pub rate_limiter: Arc<dyn RateLimitStore>,
    pub database: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the production services on top of the database connection.
    pub fn from_config(
        database: Arc<Database>,
        rate_limiter: Arc<dyn RateLimitStore>,
        config: Config,
    ) -> Self {
        let services = Services::from_connection(database.get_connection(), config.clone());
        Self::new(services, rate_limiter, database, config)
    }

    /// Create application state with manually injected services.
    pub fn new(
        services: Services,
        rate_limiter: Arc<dyn RateLimitStore>,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            auth_service: services.auth,
            contact_service: services.contacts,
            rate_limiter,
            database,
            config: Arc::new(config),
        }
    }
}
