//! Authentication handlers.

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap},
    response::Json,
    routing::{get, post},
    Router,
};
use common::{auth::bearer_token, ValidatedJson};

use crate::api::AppState;
use crate::schemas::{LoginRequest, RequestEmail, SignupRequest, TokenResponse, UserDb, UserResponse};
use crate::types::{Created, MessageResponse};
use crate::AppResult;

const SIGNUP_DETAIL: &str = "User successfully created. Check your email for confirmation.";

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh_token", get(refresh_token))
        .route("/confirmed_email/:token", get(confirmed_email))
        .route("/request_email", post(request_email))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created, confirmation email sent", body = UserResponse),
        (status = 409, description = "Account already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state.auth_service.signup(payload).await?;

    Ok(Created(UserResponse {
        user: UserDb::from(user),
        detail: SIGNUP_DETAIL.to_string(),
    }))
}

/// Login and get a token pair
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials or email not confirmed"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let tokens = state.auth_service.login(payload).await?;
    Ok(Json(tokens))
}

/// Exchange the stored refresh token for a new pair
#[utoipa::path(
    get,
    path = "/api/auth/refresh_token",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tokens rotated", body = TokenResponse),
        (status = 401, description = "Invalid refresh token")
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<TokenResponse>> {
    let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    let token = bearer_token(header)?;

    let tokens = state.auth_service.refresh(token).await?;
    Ok(Json(tokens))
}

/// Confirm an email address from the link sent by mail
#[utoipa::path(
    get,
    path = "/api/auth/confirmed_email/{token}",
    tag = "Authentication",
    params(("token" = String, Path, description = "Email confirmation token")),
    responses(
        (status = 200, description = "Email confirmed", body = MessageResponse),
        (status = 400, description = "Verification error"),
        (status = 401, description = "Invalid token")
    )
)]
pub async fn confirmed_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let status = state.auth_service.confirm_email(&token).await?;
    Ok(Json(MessageResponse::new(status.message())))
}

/// Ask for a new confirmation email
#[utoipa::path(
    post,
    path = "/api/auth/request_email",
    tag = "Authentication",
    request_body = RequestEmail,
    responses(
        (status = 200, description = "Request accepted", body = MessageResponse),
        (status = 422, description = "Validation error")
    )
)]
pub async fn request_email(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RequestEmail>,
) -> AppResult<Json<MessageResponse>> {
    let status = state
        .auth_service
        .request_confirmation(&payload.email)
        .await?;
    Ok(Json(MessageResponse::new(status.message())))
}
