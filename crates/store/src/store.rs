//! The ticket store abstraction.
//!
//! A [`TicketStore`] maps the caller's identity key to an
//! [`AuthorizationIdentity`] with time-based expiry. Schemes that persist
//! state (custom tokens, claims tokens) write at sign-in, read during
//! authorization, and delete at sign-out; stateless schemes never touch
//! the store.

use crate::{error::StoreResult, identity::AuthorizationIdentity};

/// Default entry lifetime, in seconds (one hour).
pub const DEFAULT_EXPIRE_SECS: u64 = 3_600;

/// Key→identity persistence with time-based expiry.
///
/// Implementations must be thread-safe: `store`, `retrieve`, and `remove`
/// are invoked concurrently by independent request-handling threads.
/// Operations on different keys must not interfere, and for the same key a
/// reader racing a writer must observe either the old or the new entry,
/// never a partial write.
///
/// # Key Operations
///
/// | Method | Description |
/// |--------|-------------|
/// | [`store`](TicketStore::store) | Persist an identity, replacing any existing entry |
/// | [`retrieve`](TicketStore::retrieve) | Look up an identity by key |
/// | [`remove`](TicketStore::remove) | Delete an entry |
///
/// Entries are keyed by the identity string
/// ([`AuthorizationIdentity::identity`]).
pub trait TicketStore: Send + Sync {
    /// Persists an identity under its identity key.
    ///
    /// Any existing entry for the key is replaced outright (never merged)
    /// and its expiry clock restarts.
    #[must_use = "store operations may fail and errors must be handled"]
    fn store(&self, identity: &AuthorizationIdentity) -> StoreResult<()>;

    /// Looks up an identity by key.
    ///
    /// A successful read counts as an access for expiry purposes: backends
    /// with sliding semantics reset the entry's remaining lifetime.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(identity))` if the key exists and has not expired
    /// - `Ok(None)` if the key is absent or expired
    /// - `Err(...)` on backend failures
    #[must_use = "store operations may fail and errors must be handled"]
    fn retrieve(&self, key: &str) -> StoreResult<Option<AuthorizationIdentity>>;

    /// Deletes an entry.
    ///
    /// Removing an absent key is a no-op.
    #[must_use = "store operations may fail and errors must be handled"]
    fn remove(&self, key: &str) -> StoreResult<()>;
}
