//! Rendered view cache
//!
//! Listing and detail payloads are cached as serialized JSON. Mutations do not
//! delete keys: they overwrite them with a short-lived tombstone, and view
//! writes only land on absent keys. A load that started before a mutation can
//! therefore never put its stale result back.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::RwLock;

use crate::{
    constants::{VIEW_INVALIDATION_HOLD_SECS, cache_keys::TOMBSTONE},
    error::AppResult,
};

/// Key/value cache for serialized views
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Live view under `key`; tombstones read as a miss
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` unless the key holds a live view or a tombstone.
    ///
    /// Returns whether the value was written.
    async fn put_if_absent(&self, key: &str, value: &str) -> AppResult<bool>;

    /// Replace `keys` with tombstones
    async fn invalidate(&self, keys: &[String]) -> AppResult<()>;

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}

/// Redis-backed view cache
#[derive(Clone)]
pub struct RedisViewCache {
    conn: ConnectionManager,
    ttl_secs: u64,
    hold_secs: u64,
}

impl RedisViewCache {
    pub fn new(conn: ConnectionManager, ttl_secs: u64) -> Self {
        Self {
            conn,
            ttl_secs,
            hold_secs: VIEW_INVALIDATION_HOLD_SECS,
        }
    }
}

#[async_trait]
impl ViewCache for RedisViewCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value.filter(|v| v != TOMBSTONE))
    }

    async fn put_if_absent(&self, key: &str, value: &str) -> AppResult<bool> {
        if self.ttl_secs == 0 {
            return Ok(false);
        }
        let mut conn = self.conn.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    async fn invalidate(&self, keys: &[String]) -> AppResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        pipe.atomic();
        for key in keys {
            pipe.cmd("SET")
                .arg(key)
                .arg(TOMBSTONE)
                .arg("EX")
                .arg(self.hold_secs)
                .ignore();
        }

        let mut conn = self.conn.clone();
        let _: () = pipe.query_async(&mut conn).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

enum Entry {
    View { value: String, expires_at: Instant },
    Tombstone { expires_at: Instant },
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        match self {
            Entry::View { expires_at, .. } | Entry::Tombstone { expires_at } => *expires_at > now,
        }
    }
}

/// View cache held in process memory
pub struct MemoryViewCache {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
    hold: Duration,
}

impl MemoryViewCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_secs),
            hold: Duration::from_secs(VIEW_INVALIDATION_HOLD_SECS),
        }
    }

    /// Override how long invalidated keys refuse writes
    pub fn with_invalidation_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    /// Whether `key` currently holds a live view
    pub async fn contains(&self, key: &str) -> bool {
        matches!(self.get(key).await, Ok(Some(_)))
    }
}

#[async_trait]
impl ViewCache for MemoryViewCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().await;
        let now = Instant::now();
        Ok(match entries.get(key) {
            Some(Entry::View { value, expires_at }) if *expires_at > now => Some(value.clone()),
            _ => None,
        })
    }

    async fn put_if_absent(&self, key: &str, value: &str) -> AppResult<bool> {
        if self.ttl.is_zero() {
            return Ok(false);
        }
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        if entries.get(key).is_some_and(|entry| entry.is_live(now)) {
            return Ok(false);
        }
        entries.insert(
            key.to_string(),
            Entry::View {
                value: value.to_string(),
                expires_at: now + self.ttl,
            },
        );
        Ok(true)
    }

    async fn invalidate(&self, keys: &[String]) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let expires_at = Instant::now() + self.hold;
        for key in keys {
            entries.insert(key.clone(), Entry::Tombstone { expires_at });
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
