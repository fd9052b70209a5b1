//! Current user handlers.

use axum::{response::Json, routing::get, Extension, Router};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::schemas::UserDb;

/// Create user routes (mounted behind the auth middleware)
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserDb),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserDb> {
    Json(UserDb::from(user))
}
