//! Authentication and authorization error types.
//!
//! Two classes of outcome leave a scheme's verification path: a ticket
//! that parses but fails its integrity checks yields `Ok(None)` (no
//! identity), while crypto, codec, or backend failures surface as an
//! [`AuthError`]. Callers at the authorization boundary must treat both
//! identically as "not authenticated".

use thiserror::Error;

use tessera_store::{BoxError, StoreError};

/// Authentication and authorization errors.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// A cryptographic or codec operation failed.
    ///
    /// Raised when ciphertext cannot be decrypted, base64 cannot be
    /// decoded, or an identity blob cannot be (de)serialized. Distinct
    /// from a signature mismatch, which is an invalid ticket (`Ok(None)`),
    /// not an error.
    #[error("Encryption error: {message}")]
    Encryption {
        /// What operation failed.
        message: String,
        /// The underlying failure, when one exists.
        #[source]
        source: Option<BoxError>,
    },

    /// The ticket verified but its validity window has passed.
    #[error("Authorization expired")]
    AuthorizedExpired,

    /// The ticket could not be authorized.
    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    /// Signature verification failed.
    #[error("Signature verification failed")]
    VerificationFailed,

    /// No service is registered that can handle the request.
    #[error("No service available: {0}")]
    NotImplemented(String),

    /// The ticket store failed.
    ///
    /// Wraps the original [`StoreError`] to preserve the full error source
    /// chain for debugging and structured logging.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Creates an [`AuthError::Encryption`] without an underlying source.
    pub fn encryption(message: impl Into<String>) -> Self {
        Self::Encryption { message: message.into(), source: None }
    }

    /// Creates an [`AuthError::Encryption`] wrapping an underlying failure.
    pub fn encryption_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Encryption { message: message.into(), source: Some(std::sync::Arc::new(source)) }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::AuthorizedExpired,
            ErrorKind::InvalidSignature => AuthError::VerificationFailed,
            _ => AuthError::AuthorizationFailed(format!("token rejected: {err}")),
        }
    }
}

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;
