//! JWT token issuing and verification shared by the services.
//!
//! Tokens are HS256-signed and carry a scope so that a refresh or email
//! confirmation token can never be used as an access token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Purpose a token was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    AccessToken,
    RefreshToken,
    EmailToken,
}

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub scope: TokenScope,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys derived from the shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys").field("secret", &"[REDACTED]").finish()
    }
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Sign a token for `sub` valid for `ttl`.
    pub fn issue(&self, sub: Uuid, email: &str, scope: TokenScope, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub,
            email: email.to_string(),
            scope,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Decode a token and check that it was issued for `scope`.
    pub fn verify(&self, token: &str, scope: TokenScope) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;

        if data.claims.scope != scope {
            tracing::debug!(expected = ?scope, actual = ?data.claims.scope, "Token scope mismatch");
            return Err(AppError::Unauthorized);
        }

        Ok(data.claims)
    }
}

/// Strip the `Bearer ` prefix from an Authorization header value.
pub fn bearer_token(header: Option<&str>) -> AppResult<&str> {
    header
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::from_secret(b"test-secret-key-for-testing-only-32chars")
    }

    #[test]
    fn test_issue_and_verify() {
        let id = Uuid::new_v4();
        let token = keys()
            .issue(id, "ann@example.com", TokenScope::AccessToken, Duration::minutes(15))
            .unwrap();

        let claims = keys().verify(&token, TokenScope::AccessToken).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "ann@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_scope_rejected() {
        let token = keys()
            .issue(Uuid::new_v4(), "ann@example.com", TokenScope::RefreshToken, Duration::days(7))
            .unwrap();

        let result = keys().verify(&token, TokenScope::AccessToken);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = keys()
            .issue(Uuid::new_v4(), "ann@example.com", TokenScope::AccessToken, Duration::minutes(-10))
            .unwrap();

        assert!(matches!(
            keys().verify(&token, TokenScope::AccessToken),
            Err(AppError::Jwt(_))
        ));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = JwtKeys::from_secret(b"another-secret-key-another-secret-key")
            .issue(Uuid::new_v4(), "ann@example.com", TokenScope::AccessToken, Duration::minutes(15))
            .unwrap();

        assert!(keys().verify(&token, TokenScope::AccessToken).is_err());
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert!(bearer_token(Some("Basic abc")).is_err());
        assert!(bearer_token(Some("Bearer ")).is_err());
        assert!(bearer_token(None).is_err());
    }
}
