//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use common::auth::bearer_token;

use crate::api::AppState;
use crate::domain::User;
use crate::AppError;

/// Authenticated caller, resolved from the bearer access token
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// JWT authentication middleware.
///
/// Resolves the bearer access token to a stored user and injects
/// [`CurrentUser`] into the request extensions.
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

    let user = state.auth_service.authenticate(token).await?;
    tracing::debug!(user_id = %user.id, "Request authenticated");

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
