//! Application settings loaded from environment variables.

use std::env;

use chrono::Duration;

use super::constants::{
    DEFAULT_ACCESS_TOKEN_MINUTES, DEFAULT_CORS_ORIGINS, DEFAULT_DATABASE_URL,
    DEFAULT_EMAIL_TOKEN_HOURS, DEFAULT_MAIL_FROM, DEFAULT_PUBLIC_URL, DEFAULT_REDIS_URL,
    DEFAULT_REFRESH_TOKEN_DAYS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};

/// Development-only secret used when `JWT_SECRET` is unset in debug builds
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub email_token_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub public_url: String,
    pub cors_origins: Vec<String>,
    pub mail_from: String,
    /// Key rate limits on `X-Forwarded-For`/`X-Real-IP` instead of the peer
    /// address. Only safe behind a proxy that overwrites those headers.
    pub trust_proxy_headers: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_days", &self.refresh_token_days)
            .field("email_token_hours", &self.email_token_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("public_url", &self.public_url)
            .field("cors_origins", &self.cors_origins)
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            access_token_minutes: DEFAULT_ACCESS_TOKEN_MINUTES,
            refresh_token_days: DEFAULT_REFRESH_TOKEN_DAYS,
            email_token_hours: DEFAULT_EMAIL_TOKEN_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            mail_from: DEFAULT_MAIL_FROM.to_string(),
            trust_proxy_headers: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set (release builds) or is too short.
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            jwt_secret,
            access_token_minutes: parse_var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .unwrap_or(defaults.access_token_minutes),
            refresh_token_days: parse_var("REFRESH_TOKEN_EXPIRE_DAYS")
                .unwrap_or(defaults.refresh_token_days),
            email_token_hours: parse_var("EMAIL_TOKEN_EXPIRE_HOURS")
                .unwrap_or(defaults.email_token_hours),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            public_url: env::var("PUBLIC_URL").unwrap_or(defaults.public_url),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or(defaults.cors_origins),
            mail_from: env::var("MAIL_FROM").unwrap_or(defaults.mail_from),
            trust_proxy_headers: parse_var("TRUST_PROXY_HEADERS")
                .unwrap_or(defaults.trust_proxy_headers),
        }
    }

    /// Replace the signing secret (tests and embedding).
    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_minutes)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_days)
    }

    pub fn email_token_ttl(&self) -> Duration {
        Duration::hours(self.email_token_hours)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
