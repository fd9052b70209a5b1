//! Rate limiting middleware backed by Redis counters.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::RETRY_AFTER, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::AppState;
use crate::config::{
    RATE_LIMIT_CREATE_REQUESTS, RATE_LIMIT_CREATE_WINDOW_SECONDS, RATE_LIMIT_READ_REQUESTS,
    RATE_LIMIT_READ_WINDOW_SECONDS,
};
use crate::AppError;

/// A fixed-window limit applied per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub name: &'static str,
    pub max_requests: u64,
    pub window_seconds: u64,
}

impl RateLimitPolicy {
    /// Contact reads: 10 requests per minute
    pub const READS: Self = Self {
        name: "contacts:read",
        max_requests: RATE_LIMIT_READ_REQUESTS,
        window_seconds: RATE_LIMIT_READ_WINDOW_SECONDS,
    };

    /// Contact creation: 3 requests per five minutes
    pub const CREATE: Self = Self {
        name: "contacts:create",
        max_requests: RATE_LIMIT_CREATE_REQUESTS,
        window_seconds: RATE_LIMIT_CREATE_WINDOW_SECONDS,
    };

    fn key(&self, client_id: &str) -> String {
        format!("{}:{}", self.name, client_id)
    }
}

/// Rejection sent once a client is over its limit
#[derive(Debug)]
pub struct RateLimitError {
    pub retry_after: u64,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let mut response = AppError::TooManyRequests.into_response();
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from(self.retry_after));
        response
            .headers_mut()
            .insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
        response
    }
}

/// Client address used as the rate-limit key.
///
/// Forwarding headers are client-controlled, so they are read only when
/// `trust_proxy` is set; otherwise the peer address decides.
fn get_client_identifier(request: &Request, trust_proxy: bool) -> String {
    if trust_proxy {
        // First hop in the chain is the original client
        let forwarded = request
            .headers()
            .get("X-Forwarded-For")
            .and_then(|h| h.to_str().ok())
            .and_then(|chain| chain.split(',').next())
            .or_else(|| {
                request
                    .headers()
                    .get("X-Real-IP")
                    .and_then(|h| h.to_str().ok())
            })
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    match request.extensions().get::<ConnectInfo<SocketAddr>>() {
        Some(ConnectInfo(addr)) => addr.ip().to_string(),
        None => "unknown".to_string(),
    }
}

async fn enforce(
    state: &AppState,
    policy: RateLimitPolicy,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let client_id = get_client_identifier(&request, state.config.trust_proxy_headers);

    let decision = match state
        .rate_limiter
        .hit(&policy.key(&client_id), policy.max_requests, policy.window_seconds)
        .await
    {
        Ok(decision) => decision,
        Err(e) => {
            // Fail closed when the counter store is unavailable
            tracing::error!(error = %e, policy = policy.name, "Rate limit check failed - denying request");
            return Err(RateLimitError {
                retry_after: policy.window_seconds,
            });
        }
    };

    if !decision.allowed {
        tracing::warn!(
            client = %client_id,
            policy = policy.name,
            count = decision.count,
            "Rate limit exceeded"
        );
        return Err(RateLimitError {
            retry_after: decision.retry_after,
        });
    }

    let mut response = next.run(request).await;

    let remaining = policy.max_requests.saturating_sub(decision.count);
    response
        .headers_mut()
        .insert("X-RateLimit-Limit", HeaderValue::from(policy.max_requests));
    response
        .headers_mut()
        .insert("X-RateLimit-Remaining", HeaderValue::from(remaining));

    Ok(response)
}

/// Limit for contact reads.
pub async fn rate_limit_reads(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    enforce(&state, RateLimitPolicy::READS, request, next).await
}

/// Limit for contact creation.
pub async fn rate_limit_create(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    enforce(&state, RateLimitPolicy::CREATE, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};

    #[test]
    fn test_rate_limit_error_response() {
        let response = RateLimitError { retry_after: 42 }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[RETRY_AFTER], "42");
    }

    #[test]
    fn test_policies() {
        assert_eq!(RateLimitPolicy::READS.max_requests, 10);
        assert_eq!(RateLimitPolicy::READS.window_seconds, 60);
        assert_eq!(RateLimitPolicy::CREATE.max_requests, 3);
        assert_eq!(RateLimitPolicy::CREATE.window_seconds, 300);
        assert_ne!(RateLimitPolicy::READS.key("1.2.3.4"), RateLimitPolicy::CREATE.key("1.2.3.4"));
    }

    fn from_peer(peer: [u8; 4]) -> axum::http::request::Builder {
        Request::builder().extension(ConnectInfo(SocketAddr::from((peer, 40000))))
    }

    #[test]
    fn test_forwarding_headers_ignored_by_default() {
        let request = from_peer([192, 168, 1, 7])
            .header("X-Forwarded-For", "10.0.0.1")
            .header("X-Real-IP", "10.0.0.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(get_client_identifier(&request, false), "192.168.1.7");
    }

    #[test]
    fn test_trusted_proxy_uses_first_forwarded_hop() {
        let request = from_peer([192, 168, 1, 7])
            .header("X-Forwarded-For", "10.0.0.1, 172.16.0.1")
            .header("X-Real-IP", "10.0.0.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(get_client_identifier(&request, true), "10.0.0.1");

        let request = from_peer([192, 168, 1, 7])
            .header("X-Real-IP", "10.0.0.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(get_client_identifier(&request, true), "10.0.0.2");
    }

    #[test]
    fn test_trusted_proxy_without_headers_falls_back_to_peer() {
        let request = from_peer([192, 168, 1, 7]).body(Body::empty()).unwrap();
        assert_eq!(get_client_identifier(&request, true), "192.168.1.7");
    }

    #[test]
    fn test_client_identifier_fallback() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(get_client_identifier(&request, false), "unknown");
    }
}
