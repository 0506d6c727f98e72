//! Cryptographic and codec primitives shared by the ticket schemes.
//!
//! Everything here is a thin, `Result`-returning wrapper over the
//! RustCrypto stack: HMAC-MD5 signatures, AES-256-ECB with PKCS7 padding,
//! chunked RSA PKCS#1 v1.5, and the two base64 alphabets the wire formats
//! use (standard for ciphertext and signatures, URL-safe for the
//! application-name segment).
//!
//! The primitive choices are dictated by the wire formats, not by current
//! cryptographic guidance; see the scheme modules for the known
//! weaknesses of each format.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE},
    Engine,
};
use hmac::{Hmac, Mac};
use md5::Md5;
use rsa::{traits::PublicKeyParts, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use crate::error::{AuthError, Result};

type HmacMd5 = Hmac<Md5>;

/// PKCS#1 v1.5 padding overhead per RSA block, in bytes.
const RSA_PKCS1_OVERHEAD: usize = 11;

/// Computes an HMAC-MD5 signature over `data`, standard-base64 encoded.
pub fn hmac_md5_base64(data: &str, key: &str) -> Result<String> {
    // Qualified: `KeyInit` (in scope for the ECB constructors) also
    // supplies a `new_from_slice`.
    let mut mac = <HmacMd5 as Mac>::new_from_slice(key.as_bytes())
        .map_err(|e| AuthError::encryption(format!("HMAC key setup: {e}")))?;
    mac.update(data.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Encrypts `plaintext` with AES-256-ECB/PKCS7, standard-base64 encoded.
///
/// # Errors
///
/// Returns [`AuthError::Encryption`] if `key` is not exactly 32 bytes.
pub fn aes_ecb_encrypt_base64(plaintext: &str, key: &str) -> Result<String> {
    let cipher = ecb::Encryptor::<aes::Aes256>::new_from_slice(key.as_bytes())
        .map_err(|e| AuthError::encryption(format!("AES key setup: {e}")))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    Ok(STANDARD.encode(ciphertext))
}

/// Decrypts standard-base64 AES-256-ECB/PKCS7 ciphertext into a UTF-8 string.
///
/// # Errors
///
/// Returns [`AuthError::Encryption`] if the base64 is malformed, the key is
/// not 32 bytes, the ciphertext length or padding is invalid, or the
/// plaintext is not UTF-8. A wrong key almost always surfaces here as a
/// padding failure.
pub fn aes_ecb_decrypt_string(ciphertext_base64: &str, key: &str) -> Result<String> {
    let ciphertext = STANDARD
        .decode(ciphertext_base64)
        .map_err(|e| AuthError::encryption_with_source("ciphertext base64 decoding", e))?;
    let cipher = ecb::Decryptor::<aes::Aes256>::new_from_slice(key.as_bytes())
        .map_err(|e| AuthError::encryption(format!("AES key setup: {e}")))?;
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|e| AuthError::encryption(format!("AES decryption: {e}")))?;
    String::from_utf8(plaintext)
        .map_err(|e| AuthError::encryption_with_source("decrypted plaintext is not UTF-8", e))
}

/// Encrypts `plaintext` with RSA PKCS#1 v1.5, standard-base64 encoded.
///
/// Input longer than one RSA block is split into chunks of
/// `key.size() - 11` bytes and each chunk encrypted independently, so the
/// ciphertext length is always a multiple of the key size.
pub fn rsa_encrypt_base64(plaintext: &[u8], key: &RsaPublicKey) -> Result<String> {
    let mut rng = rand::thread_rng();
    let mut ciphertext = Vec::with_capacity(plaintext.len() + key.size());
    for chunk in plaintext.chunks(key.size() - RSA_PKCS1_OVERHEAD) {
        let block = key
            .encrypt(&mut rng, Pkcs1v15Encrypt, chunk)
            .map_err(|e| AuthError::encryption_with_source("RSA encryption", e))?;
        ciphertext.extend_from_slice(&block);
    }
    Ok(STANDARD.encode(ciphertext))
}

/// Decrypts standard-base64, chunked RSA PKCS#1 v1.5 ciphertext into a
/// UTF-8 string.
///
/// # Errors
///
/// Returns [`AuthError::Encryption`] if the base64 is malformed, the
/// ciphertext length is not a multiple of the key size, any block fails to
/// decrypt, or the plaintext is not UTF-8.
pub fn rsa_decrypt_string(ciphertext_base64: &str, key: &RsaPrivateKey) -> Result<String> {
    let ciphertext = STANDARD
        .decode(ciphertext_base64)
        .map_err(|e| AuthError::encryption_with_source("ciphertext base64 decoding", e))?;
    if ciphertext.is_empty() || ciphertext.len() % key.size() != 0 {
        return Err(AuthError::encryption("RSA ciphertext length is not a multiple of key size"));
    }
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for block in ciphertext.chunks(key.size()) {
        let chunk = key
            .decrypt(Pkcs1v15Encrypt, block)
            .map_err(|e| AuthError::encryption_with_source("RSA decryption", e))?;
        plaintext.extend_from_slice(&chunk);
    }
    String::from_utf8(plaintext)
        .map_err(|e| AuthError::encryption_with_source("decrypted plaintext is not UTF-8", e))
}

/// Encodes `value` with the URL-safe base64 alphabet (padded).
#[must_use]
pub fn base64_url_encode(value: &str) -> String {
    URL_SAFE.encode(value.as_bytes())
}

/// Decodes URL-safe base64 into a UTF-8 string.
pub fn base64_url_decode(value: &str) -> Result<String> {
    let bytes = URL_SAFE
        .decode(value)
        .map_err(|e| AuthError::encryption_with_source("URL-safe base64 decoding", e))?;
    String::from_utf8(bytes)
        .map_err(|e| AuthError::encryption_with_source("decoded value is not UTF-8", e))
}

/// Generates a fresh ticket id: a v4 UUID in simple form.
///
/// Always 32 lowercase hex characters, which doubles as a valid
/// AES-256 key when taken as ASCII bytes.
#[must_use]
pub fn generate_ticket_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Current UTC time as milliseconds since the Unix epoch.
#[must_use]
pub fn epoch_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
