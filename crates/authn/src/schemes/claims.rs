//! The claims-token scheme (`Bearer`).
//!
//! Tickets are standard three-segment HS256 claims tokens. The subject
//! claim carries the serialized identity (identity key, roles, payload);
//! `jti` repeats the identity key, and `iss`/`iat`/`exp` are registered
//! claims. Expiry is absolute and checked with zero leeway.
//!
//! Decoding is only a pre-check: the authoritative identity is fetched
//! from the ticket store keyed by the raw ticket string, so a token that
//! validates cryptographically but has no matching store entry yields no
//! identity.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tessera_store::{AuthorizationIdentity, IdentityRole, TicketStore, DEFAULT_EXPIRE_SECS};

use std::sync::Arc;

use crate::{
    crypto,
    error::{AuthError, Result},
    schemes::SCHEME_CLAIMS,
    service::{AuthenticationService, AuthorizationService},
};

/// Default token issuer.
pub const DEFAULT_ISSUER: &str = "tessera";

/// Default HS256 signing secret.
///
/// Deployments are expected to override this; the constant exists so the
/// scheme works out of the box, not because the value is secret.
pub const DEFAULT_CLAIMS_SECRET: &str =
    "b4a752deb4c9d5943188202bb87435831368dfc5c69a80c30f06278c32d6970c";

/// Tuning knobs for [`ClaimsTicketService`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClaimsOptions {
    /// Value of the `iss` registered claim.
    pub issuer: String,
    /// HS256 signing secret.
    pub secret: String,
    /// Token lifetime, in seconds.
    pub expire_secs: u64,
}

impl Default for ClaimsOptions {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_owned(),
            secret: DEFAULT_CLAIMS_SECRET.to_owned(),
            expire_secs: DEFAULT_EXPIRE_SECS,
        }
    }
}

/// Registered and private claims carried by a ticket.
#[derive(Debug, Serialize, Deserialize)]
struct TicketClaims {
    jti: String,
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// The serialized subject claim.
#[derive(Debug, Serialize, Deserialize)]
struct ClaimsSubject {
    identity: String,
    #[serde(default)]
    roles: Vec<IdentityRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

/// Claims-token scheme service, stateful via a [`TicketStore`].
pub struct ClaimsTicketService {
    options: ClaimsOptions,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    store: Arc<dyn TicketStore>,
}

impl ClaimsTicketService {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(options: ClaimsOptions, store: Arc<dyn TicketStore>) -> Self {
        let encoding_key = EncodingKey::from_secret(options.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(options.secret.as_bytes());
        Self { options, encoding_key, decoding_key, store }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Absolute expiry: a ticket one second past `exp` is invalid.
        validation.leeway = 0;
        validation
    }

    /// Validates signature and expiry window.
    ///
    /// # Errors
    ///
    /// - Expired token ⇒ [`AuthError::AuthorizedExpired`]
    /// - Bad signature ⇒ [`AuthError::VerificationFailed`]
    /// - Structurally invalid token ⇒ [`AuthError::AuthorizationFailed`]
    fn decode(&self, ticket: &str) -> Result<TicketClaims> {
        let data =
            jsonwebtoken::decode::<TicketClaims>(ticket, &self.decoding_key, &Self::validation())?;
        Ok(data.claims)
    }
}

impl AuthenticationService for ClaimsTicketService {
    fn scheme(&self) -> &str {
        SCHEME_CLAIMS
    }

    fn sign_in(
        &self,
        identity: &str,
        roles: Vec<IdentityRole>,
        payload: Option<Value>,
    ) -> Result<String> {
        let subject = serde_json::to_string(&ClaimsSubject {
            identity: identity.to_owned(),
            roles: roles.clone(),
            payload: payload.clone(),
        })
        .map_err(|e| AuthError::encryption_with_source("subject claim encoding", e))?;

        let issued_at = crypto::epoch_millis_now() / 1_000;
        let claims = TicketClaims {
            jti: identity.to_owned(),
            sub: subject,
            iss: self.options.issuer.clone(),
            iat: issued_at,
            exp: issued_at + self.options.expire_secs as i64,
        };
        let ticket =
            jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        self.store.store(&AuthorizationIdentity::new(ticket.clone(), identity, roles, payload))?;
        tracing::debug!(scheme = SCHEME_CLAIMS, identity, "signed in");
        Ok(ticket)
    }

    fn sign_out(&self, identity: &str) -> Result<()> {
        self.store.remove(identity)?;
        tracing::debug!(scheme = SCHEME_CLAIMS, identity, "signed out");
        Ok(())
    }
}

impl AuthorizationService for ClaimsTicketService {
    fn scheme(&self) -> &str {
        SCHEME_CLAIMS
    }

    fn authorization_identity(&self, ticket: &str) -> Result<Option<AuthorizationIdentity>> {
        self.decode(ticket)?;
        // Pre-check passed; the store entry keyed by the raw ticket is
        // authoritative.
        Ok(self.store.retrieve(ticket)?)
    }
}
