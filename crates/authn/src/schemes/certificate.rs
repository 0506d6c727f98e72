//! The certificate scheme (`certificate`).
//!
//! Wire format: `A.C.S` where
//!
//! - `A` is the application name, URL-safe base64,
//! - `C` is the identity blob (JSON of identity, roles, payload and the
//!   issue time) encrypted with chunked RSA PKCS#1 v1.5 under the
//!   application's public key, standard base64,
//! - `S` is HMAC-MD5 over `A.C.issued_millis` keyed by the raw
//!   application name, standard base64.
//!
//! The signature is computed over the transmitted ciphertext, so a
//! verifier never re-encrypts (RSA padding is randomized and would never
//! match). The scheme is stateless: nothing touches the ticket store, and
//! sign-out is a no-op. The HMAC key is the application name that travels
//! base64-encoded in the same ticket, and the verifier keys its check by
//! the name it recovers from that segment rather than the configured one,
//! so the signature binds the segments together rather than proving
//! possession of a secret: any ticket encrypted under the right public
//! key verifies regardless of which application minted it.

use rsa::{
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    RsaPrivateKey, RsaPublicKey,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tessera_store::{AuthorizationIdentity, IdentityRole};

use crate::{
    crypto,
    error::{AuthError, Result},
    schemes::{ticket_segments, SCHEME_CERTIFICATE},
    service::{AuthenticationService, AuthorizationService},
};

/// Configuration for [`CertificateTicketService`], key material as PEM.
#[derive(Clone, Debug, Deserialize)]
pub struct CertificateOptions {
    /// Application name; travels in the ticket and keys the signature.
    pub app_name: String,
    /// SPKI PEM public key, used to encrypt at sign-in.
    pub public_key_pem: String,
    /// PKCS#8 PEM private key, used to decrypt at verification.
    pub private_key_pem: String,
}

/// The encrypted identity blob carried in the ciphertext segment.
#[derive(Debug, Serialize, Deserialize)]
struct CertificateIdentity {
    identity: String,
    #[serde(default)]
    roles: Vec<IdentityRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
    issued_millis: i64,
}

/// Certificate scheme service, stateless.
///
/// Holds both halves of the key pair; a deployment that only verifies can
/// pass a public key derived from the private one.
pub struct CertificateTicketService {
    app_name: String,
    public_key: RsaPublicKey,
    private_key: RsaPrivateKey,
}

impl CertificateTicketService {
    /// Creates a service for `app_name` over the given key pair.
    #[must_use]
    pub fn new(
        app_name: impl Into<String>,
        public_key: RsaPublicKey,
        private_key: RsaPrivateKey,
    ) -> Self {
        Self { app_name: app_name.into(), public_key, private_key }
    }

    /// Creates a service from PEM-encoded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Encryption`] if either PEM document fails to
    /// parse.
    pub fn from_options(options: &CertificateOptions) -> Result<Self> {
        let public_key = RsaPublicKey::from_public_key_pem(&options.public_key_pem)
            .map_err(|e| AuthError::encryption_with_source("public key parsing", e))?;
        let private_key = RsaPrivateKey::from_pkcs8_pem(&options.private_key_pem)
            .map_err(|e| AuthError::encryption_with_source("private key parsing", e))?;
        Ok(Self::new(options.app_name.clone(), public_key, private_key))
    }

    fn signature_input(app_segment: &str, ciphertext: &str, issued_millis: i64) -> String {
        format!("{app_segment}.{ciphertext}.{issued_millis}")
    }
}

impl AuthenticationService for CertificateTicketService {
    fn scheme(&self) -> &str {
        SCHEME_CERTIFICATE
    }

    fn sign_in(
        &self,
        identity: &str,
        roles: Vec<IdentityRole>,
        payload: Option<Value>,
    ) -> Result<String> {
        let issued_millis = crypto::epoch_millis_now();
        let blob = serde_json::to_string(&CertificateIdentity {
            identity: identity.to_owned(),
            roles,
            payload,
            issued_millis,
        })
        .map_err(|e| AuthError::encryption_with_source("identity blob encoding", e))?;

        let app_segment = crypto::base64_url_encode(&self.app_name);
        let ciphertext = crypto::rsa_encrypt_base64(blob.as_bytes(), &self.public_key)?;
        let signature = crypto::hmac_md5_base64(
            &Self::signature_input(&app_segment, &ciphertext, issued_millis),
            &self.app_name,
        )?;

        tracing::debug!(scheme = SCHEME_CERTIFICATE, identity, "signed in");
        Ok(format!("{app_segment}.{ciphertext}.{signature}"))
    }

    // Stateless scheme: nothing to invalidate.
    fn sign_out(&self, _identity: &str) -> Result<()> {
        Ok(())
    }
}

impl AuthorizationService for CertificateTicketService {
    fn scheme(&self) -> &str {
        SCHEME_CERTIFICATE
    }

    fn authorization_identity(&self, ticket: &str) -> Result<Option<AuthorizationIdentity>> {
        let segments = ticket_segments(ticket);
        let [app_segment, ciphertext, signature] = segments.as_slice() else {
            return Ok(None);
        };
        if signature.trim().is_empty() {
            return Ok(None);
        }

        let app_name = crypto::base64_url_decode(app_segment)?;

        let blob = crypto::rsa_decrypt_string(ciphertext, &self.private_key)?;
        let decoded: CertificateIdentity = serde_json::from_str(&blob)
            .map_err(|e| AuthError::encryption_with_source("identity blob decoding", e))?;

        // The HMAC key is the app name recovered from the ticket itself,
        // never the configured one.
        let expected = crypto::hmac_md5_base64(
            &Self::signature_input(app_segment, ciphertext, decoded.issued_millis),
            &app_name,
        )?;
        if !expected.eq_ignore_ascii_case(signature) {
            tracing::debug!(scheme = SCHEME_CERTIFICATE, "ticket signature mismatch");
            return Ok(None);
        }

        Ok(Some(AuthorizationIdentity::new(
            ticket,
            decoded.identity,
            decoded.roles,
            decoded.payload,
        )))
    }
}
