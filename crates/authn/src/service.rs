//! Authentication and authorization service traits.
//!
//! Each ticket scheme implements both traits: [`AuthenticationService`]
//! mints and retires tickets, [`AuthorizationService`] turns a presented
//! ticket back into the identity it was minted for. The two are split so
//! that issuing and verifying can be deployed independently (a gateway
//! that only verifies never needs signing material beyond what its scheme
//! requires).

use serde_json::Value;
use tessera_store::{AuthorizationIdentity, IdentityRole};

use crate::error::Result;

/// Mints and retires tickets for one scheme.
pub trait AuthenticationService: Send + Sync {
    /// The scheme name this service handles, e.g. `Bearer`.
    fn scheme(&self) -> &str;

    /// Signs a caller in, returning the bare wire ticket.
    ///
    /// Stateful schemes persist the identity in their ticket store before
    /// returning; the returned string carries no scheme prefix.
    ///
    /// # Arguments
    ///
    /// * `identity` - The caller's stable key
    /// * `roles` - Roles granted to the caller
    /// * `payload` - Opaque application data carried with the identity
    fn sign_in(
        &self,
        identity: &str,
        roles: Vec<IdentityRole>,
        payload: Option<Value>,
    ) -> Result<String>;

    /// Signs a caller out, invalidating any stored state for `identity`.
    ///
    /// Stateless schemes treat this as a no-op.
    fn sign_out(&self, identity: &str) -> Result<()>;
}

/// Verifies presented tickets for one scheme.
pub trait AuthorizationService: Send + Sync {
    /// The scheme name this service handles.
    fn scheme(&self) -> &str;

    /// Resolves a presented ticket to the identity it was minted for.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(identity))` for a valid, live ticket
    /// - `Ok(None)` for a ticket that parses but fails its integrity
    ///   checks, or whose backing state is gone
    /// - `Err(...)` for crypto, codec, or store failures
    ///
    /// Callers must treat `Ok(None)` and `Err(_)` identically as
    /// unauthenticated.
    fn authorization_identity(&self, ticket: &str) -> Result<Option<AuthorizationIdentity>>;
}
