//! Outgoing email.
//!
//! Messages are written to the log instead of being sent over SMTP.

use async_trait::async_trait;

use crate::config::{Config, API_PREFIX, CONFIRMATION_SUBJECT};
use crate::AppResult;

#[cfg(test)]
use mockall::automock;

/// Delivers account emails.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the link that confirms `email`, carrying an email-scoped token.
    async fn send_confirmation(&self, email: &str, username: &str, token: &str) -> AppResult<()>;
}

/// Mailer that logs each message through `tracing`.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
    public_url: String,
}

impl LogMailer {
    pub fn new(config: &Config) -> Self {
        Self {
            from: config.mail_from.clone(),
            public_url: config.public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute link a user follows to confirm their email.
    pub fn confirmation_link(&self, token: &str) -> String {
        format!("{}{}/auth/confirmed_email/{}", self.public_url, API_PREFIX, token)
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_confirmation(&self, email: &str, username: &str, token: &str) -> AppResult<()> {
        let link = self.confirmation_link(token);

        tracing::info!(
            to = %email,
            from = %self.from,
            subject = CONFIRMATION_SUBJECT,
            "Sending confirmation email"
        );
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\nHi {}, confirm your email by following {}\n\
             ========================",
            self.from,
            email,
            CONFIRMATION_SUBJECT,
            username,
            link
        );

        Ok(())
    }
}
