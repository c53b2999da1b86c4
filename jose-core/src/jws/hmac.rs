//! HMAC signatures (`HS256`, `HS384`, `HS512`)

use super::ensure_not_empty;
use crate::crypto::hash;
use crate::error::{Error, Result};
use crate::jwa::HashAlgorithm;
use tracing::warn;

/// Computes `HMAC(key, message)`
///
/// Fails with [`Error::HashUnavailable`] for SHA-1.
pub fn sign(hash: HashAlgorithm, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    hash::hmac(hash, key, &[message])
}

/// Recomputes the MAC and compares it in constant time
pub fn verify(hash: HashAlgorithm, key: &[u8], message: &[u8], signature: &[u8]) -> Result<()> {
    ensure_not_empty(signature)?;
    let matches = hash::verify_hmac(hash, key, &[message], signature)?;
    if !matches || signature.len() != hash.output_size() {
        warn!(hash = %hash, "HMAC signature mismatch");
        return Err(Error::InvalidSignature);
    }
    Ok(())
}
