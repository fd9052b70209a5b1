//! Redis-backed request counters for rate limiting.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, Client, Pipeline, RedisError};

use crate::config::{Config, CACHE_PREFIX_RATE_LIMIT};
use crate::AppResult;

#[cfg(test)]
use mockall::automock;

/// Outcome of counting one request against a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Requests seen in the current window, this one included
    pub count: u64,
    pub allowed: bool,
    /// Seconds until the window resets; zero when allowed
    pub retry_after: u64,
}

impl RateLimitDecision {
    pub fn evaluate(count: u64, max_requests: u64, ttl_seconds: i64) -> Self {
        let allowed = count <= max_requests;
        Self {
            count,
            allowed,
            retry_after: if allowed { 0 } else { ttl_seconds.max(1) as u64 },
        }
    }
}

/// Counter store consulted by the rate-limit middleware.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Count a request for `identifier` and decide whether it may proceed.
    async fn hit(&self, identifier: &str, max_requests: u64, window_seconds: u64) -> AppResult<RateLimitDecision>;

    /// Check connectivity.
    async fn ping(&self) -> AppResult<()>;
}

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis.
    pub async fn connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self { connection })
    }
}

/// INCR plus a TTL that only the window's first request sets, run as one
/// MULTI/EXEC so a counter can never be left without expiry.
fn count_hit(key: &str, window_seconds: u64) -> Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .incr(key, 1u64)
        .cmd("EXPIRE")
        .arg(key)
        .arg(window_seconds)
        .arg("NX")
        .ignore()
        .ttl(key);
    pipe
}

#[async_trait]
impl RateLimitStore for Cache {
    async fn hit(&self, identifier: &str, max_requests: u64, window_seconds: u64) -> AppResult<RateLimitDecision> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let (count, ttl): (u64, i64) = count_hit(&key, window_seconds)
            .query_async(&mut conn)
            .await?;

        Ok(RateLimitDecision::evaluate(count, max_requests, ttl))
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_limit() {
        let decision = RateLimitDecision::evaluate(3, 3, 120);
        assert!(decision.allowed);
        assert_eq!(decision.retry_after, 0);
    }

    #[test]
    fn test_over_limit_reports_retry_after() {
        let decision = RateLimitDecision::evaluate(4, 3, 120);
        assert!(!decision.allowed);
        assert_eq!(decision.retry_after, 120);
    }

    #[test]
    fn test_count_and_expiry_sent_as_one_transaction() {
        let packed = String::from_utf8(count_hit("rate_limit:k", 60).get_packed_pipeline()).unwrap();

        let order: Vec<usize> = ["MULTI", "INCR", "EXPIRE", "NX", "TTL", "EXEC"]
            .iter()
            .map(|word| packed.find(word).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_ttl_still_asks_to_wait() {
        assert_eq!(RateLimitDecision::evaluate(11, 10, -1).retry_after, 1);
    }
}
