//! Digest and HMAC dispatch over [`HashAlgorithm`]

use crate::error::{Error, Result};
use crate::jwa::HashAlgorithm;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

/// Hashes `data` with `hash`
pub fn digest(hash: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    match hash {
        HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// Computes `HMAC(key, parts[0] ‖ parts[1] ‖ …)`
///
/// SHA-1 is not offered for MACs and fails with [`Error::HashUnavailable`].
pub fn hmac(hash: HashAlgorithm, key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>> {
    match hash {
        HashAlgorithm::Sha256 => compute_mac::<Hmac<Sha256>>(key, parts),
        HashAlgorithm::Sha384 => compute_mac::<Hmac<Sha384>>(key, parts),
        HashAlgorithm::Sha512 => compute_mac::<Hmac<Sha512>>(key, parts),
        HashAlgorithm::Sha1 => Err(Error::HashUnavailable(hash.to_string())),
    }
}

/// Recomputes the MAC and compares the leading `expected.len()` bytes in
/// constant time.
///
/// An empty `expected` never matches.
pub fn verify_hmac(
    hash: HashAlgorithm,
    key: &[u8],
    parts: &[&[u8]],
    expected: &[u8],
) -> Result<bool> {
    let computed = hmac(hash, key, parts)?;
    if expected.is_empty() || expected.len() > computed.len() {
        return Ok(false);
    }
    Ok(computed[..expected.len()].ct_eq(expected).into())
}

fn compute_mac<M: Mac + KeyInit>(key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| Error::Cipher(format!("Failed to create HMAC: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().to_vec())
}
