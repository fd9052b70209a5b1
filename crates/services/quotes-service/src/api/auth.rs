//! Bearer token authentication for the add-* routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use common::auth::{bearer_token, TokenScope};
use common::AppError;
use uuid::Uuid;

use super::AppState;

/// Identity taken from a verified access token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub email: String,
}

/// Verify the access token and inject [`Caller`].
///
/// Accounts live in contacts-service, so only the signature, expiry and
/// scope are checked here.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let token = bearer_token(header)?;

    let claims = state
        .jwt_keys
        .verify(token, TokenScope::AccessToken)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::Unauthorized
        })?;

    request.extensions_mut().insert(Caller {
        id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
