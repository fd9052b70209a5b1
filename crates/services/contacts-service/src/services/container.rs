//! Service Container - Centralized service access.
//!
//! Handlers depend on service traits, never on implementations.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{AuthService, Authenticator, ContactManager, ContactService, LogMailer};
use crate::config::Config;
use crate::infra::{ContactStore, UserStore};

/// Concrete set of application services
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub contacts: Arc<dyn ContactService>,
}

impl Services {
    pub fn new(auth: Arc<dyn AuthService>, contacts: Arc<dyn ContactService>) -> Self {
        Self { auth, contacts }
    }

    /// Wire the production services on top of a database connection.
    pub fn from_connection(db: DatabaseConnection, config: Config) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let mailer = Arc::new(LogMailer::new(&config));
        let auth = Arc::new(Authenticator::new(users, mailer, config));
        let contacts = Arc::new(ContactManager::new(Arc::new(ContactStore::new(db))));

        Self { auth, contacts }
    }
}
