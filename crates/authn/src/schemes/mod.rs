//! The three ticket schemes.
//!
//! | Scheme | Wire name | State | Module |
//! |--------|-----------|-------|--------|
//! | Certificate | `certificate` | stateless | [`certificate`] |
//! | Custom token | `maydear` | ticket store | [`custom`] |
//! | Claims token | `Bearer` | ticket store | [`claims`] |
//!
//! Scheme names are wire-visible values carried in the access-token
//! header; they are matched verbatim by the registry.

pub mod certificate;
pub mod claims;
pub mod custom;

/// Wire name of the certificate scheme.
pub const SCHEME_CERTIFICATE: &str = "certificate";

/// Wire name of the custom-token scheme.
pub const SCHEME_CUSTOM: &str = "maydear";

/// Wire name of the claims-token scheme.
pub const SCHEME_CLAIMS: &str = "Bearer";

/// Splits a wire ticket into its non-empty `.`-separated segments.
///
/// Certificate and custom tickets must produce exactly three segments;
/// callers check the count before touching any cryptography.
pub(crate) fn ticket_segments(ticket: &str) -> Vec<&str> {
    ticket.split('.').filter(|s| !s.is_empty()).collect()
}
