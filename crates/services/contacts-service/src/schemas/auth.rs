//! Authentication request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use common::{FromJsonFields, JsonFields};
use validator::Validate;

use crate::config::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, TOKEN_TYPE_BEARER};
use crate::domain::User;

/// Registration payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    #[schema(example = "ann")]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        max = MAX_PASSWORD_LENGTH,
        message = "Password must be 6-14 characters"
    ))]
    #[schema(example = "secret1", min_length = 6, max_length = 14)]
    pub password: String,
}

impl FromJsonFields for SignupRequest {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            username: fields.required("username").unwrap_or_default(),
            email: fields.required("email").unwrap_or_default(),
            password: fields.required("password").unwrap_or_default(),
        }
    }
}

/// Login payload. The email doubles as the username.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl FromJsonFields for LoginRequest {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            email: fields.required("email").unwrap_or_default(),
            password: fields.required("password").unwrap_or_default(),
        }
    }
}

/// Request for a new confirmation email.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RequestEmail {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

impl FromJsonFields for RequestEmail {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            email: fields.required("email").unwrap_or_default(),
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDb {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub avatar: Option<String>,
}

impl From<User> for UserDb {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            avatar: user.avatar,
        }
    }
}

/// Signup response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: UserDb,
    #[schema(example = "User successfully created. Check your email for confirmation.")]
    pub detail: String,
}

/// Access and refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::validate;

    fn signup(password: &str) -> SignupRequest {
        SignupRequest {
            username: "ann".into(),
            email: "ann@example.com".into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(validate(signup("12345")).is_err());
        assert!(validate(signup("123456")).is_ok());
        assert!(validate(signup("12345678901234")).is_ok());
        assert!(validate(signup("123456789012345")).is_err());
    }

    #[test]
    fn test_signup_reports_every_field() {
        let bad = SignupRequest {
            username: String::new(),
            email: "nope".into(),
            password: "1".into(),
        };
        let errors = validate(bad).unwrap_err();
        assert_eq!(errors.fields().count(), 3);
    }

    #[test]
    fn test_token_type_is_bearer() {
        let tokens = TokenResponse::bearer("a".into(), "r".into());
        let json = serde_json::to_value(&tokens).unwrap();
        assert_eq!(json["token_type"], "bearer");
    }
}
