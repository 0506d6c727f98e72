//! # Tessera Authentication
//!
//! Multi-scheme bearer-ticket authentication and authorization core.
//!
//! This crate provides:
//! - **Ticket schemes**: certificate (stateless RSA envelope), custom
//!   token (AES envelope backed by a ticket store), claims token (HS256)
//! - **Service traits**: [`AuthenticationService`] mints tickets,
//!   [`AuthorizationService`] verifies them
//! - **Scheme registry**: name-to-service resolution with a deterministic
//!   first-registered fallback
//! - **Access-token parsing**: `"<scheme> <credentials>"` header values
//!
//! Persistence lives in [`tessera_store`]; schemes that need state take an
//! `Arc<dyn TicketStore>`.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use tessera_authn::{
//!     AccessToken, AuthenticationService, AuthorizationRegistry, AuthorizationService,
//!     CustomTicketService, SCHEME_CUSTOM,
//! };
//! use tessera_store::MemoryTicketStore;
//!
//! # fn example() -> Result<(), tessera_authn::AuthError> {
//! let store = Arc::new(MemoryTicketStore::default());
//! let service = Arc::new(CustomTicketService::new(store));
//!
//! let registry = AuthorizationRegistry::new("authorization");
//! registry.register(SCHEME_CUSTOM, service.clone());
//!
//! let ticket = service.sign_in("u1", Vec::new(), None)?;
//! let header = format!("{SCHEME_CUSTOM} {ticket}");
//!
//! let token = AccessToken::parse(&header).expect("well-formed header");
//! let identity = registry
//!     .resolve(&token.scheme)?
//!     .authorization_identity(&token.credentials)?
//!     .expect("freshly minted ticket");
//! assert_eq!(identity.identity, "u1");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Access-token header parsing.
pub mod access_token;
/// Cryptographic and codec primitives.
pub mod crypto;
/// Error types.
pub mod error;
/// Scheme-to-service registries.
pub mod registry;
/// The ticket schemes.
pub mod schemes;
/// Service traits.
pub mod service;

// Re-export key types for convenience
pub use access_token::AccessToken;
pub use error::{AuthError, Result};
pub use registry::{AuthenticationRegistry, AuthorizationRegistry, ServiceRegistry};
pub use schemes::{
    certificate::{CertificateOptions, CertificateTicketService},
    claims::{ClaimsOptions, ClaimsTicketService, DEFAULT_CLAIMS_SECRET, DEFAULT_ISSUER},
    custom::CustomTicketService,
    SCHEME_CERTIFICATE, SCHEME_CLAIMS, SCHEME_CUSTOM,
};
pub use service::{AuthenticationService, AuthorizationService};
