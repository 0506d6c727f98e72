//! # Tessera Ticket Store
//!
//! Key→identity persistence for the Tessera authorization core.
//!
//! This crate provides:
//! - **Identity model**: [`AuthorizationIdentity`] and [`IdentityRole`]
//! - **Store abstraction**: the [`TicketStore`] trait
//! - **Backends**: bounded in-process cache ([`MemoryTicketStore`]) and
//!   Redis-backed remote store ([`RedisTicketStore`])
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        Authentication / Authorization        │
//! │         services (tessera-authn)             │
//! ├─────────────────────────────────────────────┤
//! │               TicketStore trait              │
//! │          (store, retrieve, remove)           │
//! ├──────────────────────┬──────────────────────┤
//! │   MemoryTicketStore  │   RedisTicketStore    │
//! │  (sliding in-process │  (TTL re-armed on     │
//! │   cache, bounded)    │   every read)         │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! # Expiry Semantics
//!
//! | Backend | Policy |
//! |---------|--------|
//! | [`MemoryTicketStore`] | sliding expire-after-access (cache-native) |
//! | [`RedisTicketStore`] | absolute TTL, explicitly re-armed on each read |
//!
//! Both default to [`DEFAULT_EXPIRE_SECS`] (one hour).
//!
//! # Example
//!
//! ```
//! use tessera_store::{AuthorizationIdentity, MemoryStoreOptions, MemoryTicketStore, TicketStore};
//!
//! let store = MemoryTicketStore::new(MemoryStoreOptions::default());
//! let identity = AuthorizationIdentity::new("ticket-value", "u1", Vec::new(), None);
//!
//! store.store(&identity).unwrap();
//! assert_eq!(store.retrieve("u1").unwrap().map(|i| i.identity), Some("u1".to_owned()));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Store error types.
pub mod error;
/// Identity and role data model.
pub mod identity;
/// Bounded in-process cache backend.
pub mod memory;
/// Redis-backed remote store.
pub mod redis;
/// The ticket store abstraction.
pub mod store;

pub use error::{BoxError, StoreError, StoreResult};
pub use identity::{AuthorizationIdentity, IdentityRole};
pub use memory::{MemoryStoreOptions, MemoryTicketStore};
pub use redis::{RedisStoreOptions, RedisTicketStore};
pub use store::{DEFAULT_EXPIRE_SECS, TicketStore};
