//! Redis-backed remote store.
//!
//! [`RedisTicketStore`] persists identities as JSON values with an
//! absolute TTL. Redis has no native sliding expiration, so
//! [`retrieve`](crate::TicketStore::retrieve) emulates it: after every
//! successful read the TTL is explicitly re-armed to the full configured
//! duration.
//!
//! Calls are blocking I/O over a small [`r2d2`] connection pool; timeout
//! and retry policy belong to the Redis client configuration, not to this
//! store.

use std::time::Duration;

use serde::Deserialize;

use crate::{
    error::{StoreError, StoreResult},
    identity::AuthorizationIdentity,
    store::{DEFAULT_EXPIRE_SECS, TicketStore},
};

/// Default Redis connection URL.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1/";

/// Default connection pool size.
pub const DEFAULT_POOL_SIZE: u32 = 8;

/// Tuning knobs for [`RedisTicketStore`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RedisStoreOptions {
    /// Redis connection URL.
    pub url: String,
    /// Entry lifetime, in seconds. Re-armed to this value on every read.
    pub expire_secs: u64,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
}

impl Default for RedisStoreOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_REDIS_URL.to_owned(),
            expire_secs: DEFAULT_EXPIRE_SECS,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

/// r2d2 connection manager for the synchronous Redis client.
struct RedisConnectionManager {
    client: redis::Client,
}

impl r2d2::ManageConnection for RedisConnectionManager {
    type Connection = redis::Connection;
    type Error = redis::RedisError;

    fn connect(&self) -> Result<Self::Connection, Self::Error> {
        self.client.get_connection()
    }

    fn is_valid(&self, conn: &mut Self::Connection) -> Result<(), Self::Error> {
        let _: String = redis::cmd("PING").query(conn)?;
        Ok(())
    }

    fn has_broken(&self, _conn: &mut Self::Connection) -> bool {
        // r2d2 recycles connections that error during use.
        false
    }
}

/// Remote ticket store backed by Redis.
///
/// Entries are written with `SETEX`, read with `GET` followed by an
/// explicit `EXPIRE` refresh, and removed with `DEL`. Values are the
/// JSON encoding of [`AuthorizationIdentity`].
#[derive(Clone)]
pub struct RedisTicketStore {
    pool: r2d2::Pool<RedisConnectionManager>,
    expire: Duration,
}

impl RedisTicketStore {
    /// Connects a store from the given options.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid or the
    /// pool cannot establish its first connection.
    pub fn new(options: RedisStoreOptions) -> StoreResult<Self> {
        let client = redis::Client::open(options.url.as_str())
            .map_err(|e| StoreError::connection_with_source("invalid Redis URL", e))?;
        let pool = r2d2::Pool::builder()
            .max_size(options.pool_size)
            .build(RedisConnectionManager { client })
            .map_err(|e| StoreError::connection_with_source("Redis pool initialization", e))?;
        Ok(Self { pool, expire: Duration::from_secs(options.expire_secs) })
    }

    fn connection(&self) -> StoreResult<r2d2::PooledConnection<RedisConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| StoreError::connection_with_source("Redis pool exhausted", e))
    }

    /// `SETEX` writing `value` under `key` with the full TTL.
    fn write_command(key: &str, expire: Duration, value: &str) -> redis::Cmd {
        let mut cmd = redis::cmd("SETEX");
        cmd.arg(key).arg(expire.as_secs()).arg(value);
        cmd
    }

    /// `EXPIRE` re-arming `key` to the full TTL.
    fn refresh_command(key: &str, expire: Duration) -> redis::Cmd {
        let mut cmd = redis::cmd("EXPIRE");
        cmd.arg(key).arg(expire.as_secs());
        cmd
    }
}

impl TicketStore for RedisTicketStore {
    fn store(&self, identity: &AuthorizationIdentity) -> StoreResult<()> {
        let value = serde_json::to_string(identity)
            .map_err(|e| StoreError::serialization_with_source("identity encoding", e))?;
        let mut conn = self.connection()?;
        Self::write_command(&identity.identity, self.expire, &value)
            .query::<()>(&mut *conn)
            .map_err(|e| StoreError::connection_with_source("SETEX", e))?;
        Ok(())
    }

    fn retrieve(&self, key: &str) -> StoreResult<Option<AuthorizationIdentity>> {
        let mut conn = self.connection()?;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query(&mut *conn)
            .map_err(|e| StoreError::connection_with_source("GET", e))?;

        let Some(value) = value else {
            return Ok(None);
        };

        // Sliding expiration emulated via an explicit refresh: re-arm the
        // TTL to the full configured duration on every successful read.
        if let Err(e) = Self::refresh_command(key, self.expire).query::<i64>(&mut *conn) {
            tracing::warn!(key, error = %e, "failed to refresh ticket TTL");
        }

        let identity = serde_json::from_str(&value)
            .map_err(|e| StoreError::serialization_with_source("identity decoding", e))?;
        Ok(Some(identity))
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.connection()?;
        redis::cmd("DEL")
            .arg(key)
            .query::<i64>(&mut *conn)
            .map_err(|e| StoreError::connection_with_source("DEL", e))?;
        Ok(())
    }
}
