//! Authentication service - signup, login, token refresh and email confirmation.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use common::auth::{JwtKeys, TokenScope};
use uuid::Uuid;

use super::Mailer;
use crate::config::Config;
use crate::domain::{Password, User};
use crate::infra::UserRepository;
use crate::schemas::{LoginRequest, SignupRequest, TokenResponse};
use crate::{AppError, AppResult};

/// State of a user's email after a confirmation-related request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailStatus {
    Confirmed,
    AlreadyConfirmed,
    ConfirmationSent,
}

impl EmailStatus {
    pub fn message(&self) -> &'static str {
        match self {
            EmailStatus::Confirmed => "Email confirmed",
            EmailStatus::AlreadyConfirmed => "Your email is already confirmed",
            EmailStatus::ConfirmationSent => "Check your email for confirmation.",
        }
    }
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register an unconfirmed user and send the confirmation email.
    async fn signup(&self, request: SignupRequest) -> AppResult<User>;

    /// Exchange credentials for an access/refresh token pair.
    async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse>;

    /// Rotate the token pair using the stored refresh token.
    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenResponse>;

    /// Confirm the email named by an email-scoped token.
    async fn confirm_email(&self, token: &str) -> AppResult<EmailStatus>;

    /// Send a fresh confirmation email if the address is registered and unconfirmed.
    async fn request_confirmation(&self, email: &str) -> AppResult<EmailStatus>;

    /// Resolve the user behind an access token.
    async fn authenticate(&self, access_token: &str) -> AppResult<User>;
}

/// Hash verified when the email is unknown so both paths cost the same.
fn dummy_password() -> Option<&'static Password> {
    static DUMMY: OnceLock<Option<Password>> = OnceLock::new();
    DUMMY
        .get_or_init(|| Password::new("timing-equalizer").ok())
        .as_ref()
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    mailer: Arc<dyn Mailer>,
    keys: JwtKeys,
    config: Config,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, mailer: Arc<dyn Mailer>, config: Config) -> Self {
        let keys = JwtKeys::from_secret(config.jwt_secret_bytes());
        Self {
            users,
            mailer,
            keys,
            config,
        }
    }

    /// Issue a new pair and remember the refresh token.
    async fn issue_pair(&self, user_id: Uuid, email: &str) -> AppResult<TokenResponse> {
        let access = self.keys.issue(
            user_id,
            email,
            TokenScope::AccessToken,
            self.config.access_token_ttl(),
        )?;
        let refresh = self.keys.issue(
            user_id,
            email,
            TokenScope::RefreshToken,
            self.config.refresh_token_ttl(),
        )?;

        self.users
            .update_refresh_token(user_id, Some(refresh.clone()))
            .await?;

        Ok(TokenResponse::bearer(access, refresh))
    }

    async fn send_confirmation(&self, user: &User) {
        let sent = match self.keys.issue(
            user.id,
            &user.email,
            TokenScope::EmailToken,
            self.config.email_token_ttl(),
        ) {
            Ok(token) => {
                self.mailer
                    .send_confirmation(&user.email, &user.username, &token)
                    .await
            }
            Err(e) => Err(e),
        };

        // Delivery problems never fail the request that triggered them
        if let Err(e) = sent {
            tracing::warn!(email = %user.email, error = %e, "Confirmation email not sent");
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn signup(&self, request: SignupRequest) -> AppResult<User> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::conflict("Account"));
        }

        let password_hash = Password::new(&request.password)?.into_string();
        let user = self
            .users
            .create(request.username, request.email, password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        self.send_confirmation(&user).await;

        Ok(user)
    }

    async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse> {
        let found = self.users.find_by_email(&request.email).await?;

        let user = match found {
            Some(user) if Password::from_hash(user.password_hash.clone()).verify(&request.password) => user,
            Some(_) => return Err(AppError::InvalidCredentials),
            None => {
                if let Some(dummy) = dummy_password() {
                    dummy.verify(&request.password);
                }
                return Err(AppError::InvalidCredentials);
            }
        };

        if !user.confirmed {
            return Err(AppError::EmailNotConfirmed);
        }

        self.issue_pair(user.id, &user.email).await
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenResponse> {
        let claims = self.keys.verify(refresh_token, TokenScope::RefreshToken)?;
        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !user.holds_refresh_token(refresh_token) {
            tracing::warn!(user_id = %user.id, "Refresh token mismatch, revoking");
            self.users.update_refresh_token(user.id, None).await?;
            return Err(AppError::Unauthorized);
        }

        self.issue_pair(user.id, &user.email).await
    }

    async fn confirm_email(&self, token: &str) -> AppResult<EmailStatus> {
        let claims = self.keys.verify(token, TokenScope::EmailToken)?;
        let user = self
            .users
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(|| AppError::bad_request("Verification error"))?;

        if user.confirmed {
            return Ok(EmailStatus::AlreadyConfirmed);
        }

        self.users.confirm_email(&user.email).await?;
        tracing::info!(user_id = %user.id, "Email confirmed");
        Ok(EmailStatus::Confirmed)
    }

    async fn request_confirmation(&self, email: &str) -> AppResult<EmailStatus> {
        match self.users.find_by_email(email).await? {
            Some(user) if user.confirmed => Ok(EmailStatus::AlreadyConfirmed),
            Some(user) => {
                self.send_confirmation(&user).await;
                Ok(EmailStatus::ConfirmationSent)
            }
            None => Ok(EmailStatus::ConfirmationSent),
        }
    }

    async fn authenticate(&self, access_token: &str) -> AppResult<User> {
        let claims = self.keys.verify(access_token, TokenScope::AccessToken)?;
        self.users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
