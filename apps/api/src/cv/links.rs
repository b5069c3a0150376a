use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

pub const SHORT_CODE_LEN: usize = 7;
const MAX_CODE_ATTEMPTS: usize = 10;

/// Expired links are kept this much longer so they answer 410 instead of 404.
pub const EXPIRED_LINK_GRACE: Duration = Duration::from_secs(300);

/// A short code pointing at a signed download URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortLink {
    pub owner: Uuid,
    pub cv_id: Uuid,
    pub target_url: String,
    pub expires_at: DateTime<Utc>,
}

impl ShortLink {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Stores `link` under `code` for `ttl`. Returns `false` if the code is already taken.
    async fn insert_if_absent(
        &self,
        code: &str,
        link: &ShortLink,
        ttl: Duration,
    ) -> Result<bool, AppError>;

    async fn resolve(&self, code: &str) -> Result<Option<ShortLink>, AppError>;
}

/// Redis-backed links under `dl:<code>`.
#[derive(Clone)]
pub struct RedisLinkStore {
    client: redis::Client,
}

impl RedisLinkStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

fn redis_key(code: &str) -> String {
    format!("dl:{code}")
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn insert_if_absent(
        &self,
        code: &str,
        link: &ShortLink,
        ttl: Duration,
    ) -> Result<bool, AppError> {
        let payload = serde_json::to_string(link).map_err(|e| AppError::Internal(e.into()))?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let stored: Option<String> = redis::cmd("SET")
            .arg(redis_key(code))
            .arg(payload)
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut conn)
            .await?;

        Ok(stored.is_some())
    }

    async fn resolve(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(redis_key(code))
            .query_async(&mut conn)
            .await?;

        match raw {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AppError::Internal(anyhow!("corrupt short link {code}: {e}"))),
            None => Ok(None),
        }
    }
}

/// Random `[A-Za-z0-9]` code of `len` characters.
pub fn generate_short_code(len: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Stores `link` under a fresh short code, retrying on collisions.
pub async fn create_short_link(
    links: &dyn LinkStore,
    link: &ShortLink,
    ttl: Duration,
) -> Result<String, AppError> {
    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let code = generate_short_code(SHORT_CODE_LEN);
        if links.insert_if_absent(&code, link, ttl).await? {
            return Ok(code);
        }
        warn!(attempt, "Short code collision, retrying");
    }
    Err(AppError::Internal(anyhow!(
        "could not allocate a unique short code after {MAX_CODE_ATTEMPTS} attempts"
    )))
}
