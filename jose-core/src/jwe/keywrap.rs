//! AES key wrapping of a CEK
//!
//! `A128KW`/`A192KW`/`A256KW` use the RFC 3394 construction from
//! [`crate::crypto::key_wrap`] with the AES variant picked from the size of
//! the key-wrapping key. `A128GCMKW`/`A192GCMKW`/`A256GCMKW` encrypt the CEK
//! with AES-GCM and carry the IV and tag alongside the wrapped key.

use crate::crypto::key_wrap;
use crate::error::{Error, Result};
use crate::jwe::enc::aes_gcm;
use crate::keys::{AeadOutput, SecretBytes, SymmetricKeySet};
use aes::cipher::KeyInit;
use aes::{Aes128, Aes192, Aes256};
use tracing::debug;
use zeroize::Zeroizing;

/// Wrap `cek` with AES-KW
///
/// # Arguments
/// * `kwk` - 16, 24 or 32 byte key-wrapping key
/// * `cek` - The key to wrap, a multiple of 8 bytes
///
/// # Returns
/// The wrapped key, 8 bytes longer than `cek`
pub fn wrap_aes(kwk: &[u8], cek: &[u8]) -> Result<Vec<u8>> {
    debug!(kwk_len = kwk.len(), cek_len = cek.len(), "Wrapping CEK with AES-KW");
    match kwk.len() {
        16 => key_wrap::wrap(&new_aes::<Aes128>(kwk)?, cek),
        24 => key_wrap::wrap(&new_aes::<Aes192>(kwk)?, cek),
        32 => key_wrap::wrap(&new_aes::<Aes256>(kwk)?, cek),
        other => Err(Error::UnsupportedKeySize(other)),
    }
}

/// Unwrap a CEK wrapped with AES-KW
///
/// Fails with [`Error::IntegrityCheckFailed`] for a wrong key or tampered input.
pub fn unwrap_aes(kwk: &[u8], wrapped: &[u8]) -> Result<SecretBytes> {
    debug!(kwk_len = kwk.len(), wrapped_len = wrapped.len(), "Unwrapping CEK with AES-KW");
    match kwk.len() {
        16 => key_wrap::unwrap(&new_aes::<Aes128>(kwk)?, wrapped),
        24 => key_wrap::unwrap(&new_aes::<Aes192>(kwk)?, wrapped),
        32 => key_wrap::unwrap(&new_aes::<Aes256>(kwk)?, wrapped),
        other => Err(Error::UnsupportedKeySize(other)),
    }
}

/// Encrypt `cek` with AES-GCM under `kwk` (no AAD)
///
/// # Arguments
/// * `kwk` - 16, 24 or 32 byte key-wrapping key
/// * `iv` - 12 byte IV, sent in the `iv` header
/// * `cek` - The key to encrypt
///
/// # Returns
/// The encrypted key and the 16 byte tag for the `tag` header
pub fn wrap_aes_gcm(kwk: &[u8], iv: &[u8], cek: &[u8]) -> Result<AeadOutput> {
    let keys = SymmetricKeySet::new(kwk, iv);
    aes_gcm::encrypt(&keys, cek, &[])
}

/// Decrypt a CEK encrypted with [`wrap_aes_gcm`]
pub fn unwrap_aes_gcm(
    kwk: &[u8],
    iv: &[u8],
    encrypted_key: &[u8],
    tag: &[u8],
) -> Result<SecretBytes> {
    let keys = SymmetricKeySet::new(kwk, iv);
    aes_gcm::decrypt(&keys, encrypted_key, tag, &[]).map(Zeroizing::new)
}

fn new_aes<C: KeyInit>(kwk: &[u8]) -> Result<C> {
    C::new_from_slice(kwk)
        .map_err(|e| Error::Cipher(format!("Failed to create AES cipher: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kwk_size() {
        let cek = [0x33u8; 32];
        for size in [16, 24, 32] {
            let kwk = vec![0x42u8; size];
            let wrapped = wrap_aes(&kwk, &cek).unwrap();
            assert_eq!(wrapped.len(), 40);
            assert_eq!(&unwrap_aes(&kwk, &wrapped).unwrap()[..], &cek);
        }
    }

    #[test]
    fn test_unsupported_kwk_size() {
        assert!(matches!(
            wrap_aes(&[0u8; 20], &[0u8; 16]),
            Err(Error::UnsupportedKeySize(20))
        ));
        assert!(matches!(
            unwrap_aes(&[0u8; 64], &[0u8; 24]),
            Err(Error::UnsupportedKeySize(64))
        ));
    }

    #[test]
    fn test_gcm_key_wrap() {
        let kwk = [0x24u8; 24];
        let iv = [0x01u8; 12];
        let cek = [0x77u8; 32];

        let out = wrap_aes_gcm(&kwk, &iv, &cek).unwrap();
        assert_eq!(out.ciphertext.len(), 32);
        assert_eq!(out.tag.len(), 16);
        assert_eq!(
            &unwrap_aes_gcm(&kwk, &iv, &out.ciphertext, &out.tag).unwrap()[..],
            &cek
        );

        let mut tag = out.tag.clone();
        tag[0] ^= 1;
        assert!(matches!(
            unwrap_aes_gcm(&kwk, &iv, &out.ciphertext, &tag),
            Err(Error::DecryptionFailed)
        ));
    }
}
