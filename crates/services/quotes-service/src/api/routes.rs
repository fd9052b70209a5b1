//! Quotes service routes.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::{auth_middleware, AppState};

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/add-author", post(handlers::add_author))
        .route("/add-tag", post(handlers::add_tag))
        .route("/add-quote", post(handlers::add_quote))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/", get(handlers::index))
        .route("/page/:page", get(handlers::page))
        .route("/author/:id", get(handlers::author_about))
        .route("/authors", get(handlers::authors))
        .route("/tags", get(handlers::tags))
        .route("/health", get(health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.database.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({"status": "healthy"}))),
        Err(e) => {
            tracing::error!(error = %e, "Quotes database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"status": "unhealthy"})),
            )
        }
    }
}
