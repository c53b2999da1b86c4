//! AES-GCM content encryption (RFC 7518 Section 5.3)

use crate::error::{Error, Result};
use crate::jwa::ContentEncryption;
use crate::keys::{AeadOutput, SymmetricKeySet};
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::generic_array::typenum::Unsigned;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadCore, AeadInPlace, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use tracing::{debug, warn};

/// AES-192 in GCM mode with a 96-bit nonce
pub type Aes192Gcm = AesGcm<aes::Aes192, U12>;

/// Tag length for every GCM variant
pub const TAG_SIZE: usize = 16;

/// Encrypt and authenticate `plaintext`
///
/// # Arguments
/// * `keys` - 16, 24 or 32 byte CEK and a 12 byte IV
/// * `plaintext` - Payload to encrypt
/// * `aad` - Additional authenticated data
///
/// # Returns
/// The ciphertext (same length as the plaintext) and a 16 byte tag
pub fn encrypt(keys: &SymmetricKeySet, plaintext: &[u8], aad: &[u8]) -> Result<AeadOutput> {
    let enc = ContentEncryption::from_gcm_key_size(keys.cek.len())?;
    debug!(enc = %enc, plaintext_len = plaintext.len(), "Encrypting content");

    match enc {
        ContentEncryption::A128Gcm => seal::<Aes128Gcm>(keys, plaintext, aad),
        ContentEncryption::A192Gcm => seal::<Aes192Gcm>(keys, plaintext, aad),
        _ => seal::<Aes256Gcm>(keys, plaintext, aad),
    }
}

/// Authenticate and decrypt `ciphertext`
///
/// # Security
/// Any authentication failure, including a tag that is not 16 bytes, is
/// reported as [`Error::DecryptionFailed`] and no plaintext is returned.
pub fn decrypt(
    keys: &SymmetricKeySet,
    ciphertext: &[u8],
    tag: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let enc = ContentEncryption::from_gcm_key_size(keys.cek.len())?;
    debug!(enc = %enc, ciphertext_len = ciphertext.len(), "Decrypting content");

    if tag.len() != TAG_SIZE {
        warn!(enc = %enc, tag_len = tag.len(), "Rejecting tag of wrong length");
        return Err(Error::DecryptionFailed);
    }

    match enc {
        ContentEncryption::A128Gcm => open::<Aes128Gcm>(keys, ciphertext, tag, aad),
        ContentEncryption::A192Gcm => open::<Aes192Gcm>(keys, ciphertext, tag, aad),
        _ => open::<Aes256Gcm>(keys, ciphertext, tag, aad),
    }
}

fn new_cipher<A: AeadInPlace + KeyInit>(keys: &SymmetricKeySet) -> Result<A> {
    let nonce_size = <<A as AeadCore>::NonceSize as Unsigned>::USIZE;
    if keys.iv.len() != nonce_size {
        return Err(Error::InvalidIvLength {
            expected: nonce_size,
            actual: keys.iv.len(),
        });
    }
    A::new_from_slice(&keys.cek)
        .map_err(|e| Error::Cipher(format!("Failed to create AES-GCM cipher: {}", e)))
}

fn seal<A: AeadInPlace + KeyInit>(
    keys: &SymmetricKeySet,
    plaintext: &[u8],
    aad: &[u8],
) -> Result<AeadOutput> {
    let cipher = new_cipher::<A>(keys)?;
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&keys.iv), aad, &mut buffer)
        .map_err(|e| Error::Cipher(format!("AES-GCM encryption failed: {}", e)))?;

    Ok(AeadOutput {
        ciphertext: buffer,
        tag: tag.to_vec(),
    })
}

fn open<A: AeadInPlace + KeyInit>(
    keys: &SymmetricKeySet,
    ciphertext: &[u8],
    tag: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let cipher = new_cipher::<A>(keys)?;
    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(&keys.iv),
            aad,
            &mut buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| {
            warn!("AES-GCM authentication failed");
            Error::DecryptionFailed
        })?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAINTEXT: &[u8] = b"Live long and prosper.";
    const AAD: &[u8] = b"header";

    fn keys(size: usize) -> SymmetricKeySet {
        SymmetricKeySet::new((0..size as u8).collect::<Vec<u8>>(), (0..12u8).collect::<Vec<u8>>())
    }

    #[test]
    fn test_known_answers() {
        let cases = [
            (
                16,
                "df05d1ab4677983a2cf200e45283007adc556a8321c3",
                "3e7f4f34d0427ec68d3ea87b84861d53",
            ),
            (
                24,
                "aa9054feb9d5a660b713bdec9b89ac0261ec436e4a8f",
                "02408d21fbcbacb4866beae130dc007d",
            ),
            (
                32,
                "0b6ba07ee589ad75ea61f6e5d5c9081feca5f7518255",
                "9dcc1ef37c3e16f73ccd9a5b4ee74812",
            ),
        ];

        for (size, ciphertext, tag) in cases {
            let keys = keys(size);
            let out = encrypt(&keys, PLAINTEXT, AAD).unwrap();
            assert_eq!(hex::encode(&out.ciphertext), ciphertext);
            assert_eq!(hex::encode(&out.tag), tag);
            assert_eq!(decrypt(&keys, &out.ciphertext, &out.tag, AAD).unwrap(), PLAINTEXT);
        }
    }

    #[test]
    fn test_unsupported_key_size() {
        let keys = SymmetricKeySet::new(vec![0u8; 20], vec![0u8; 12]);
        assert!(matches!(
            encrypt(&keys, PLAINTEXT, AAD),
            Err(Error::UnsupportedKeySize(20))
        ));
    }

    #[test]
    fn test_nonce_must_be_96_bits() {
        let keys = SymmetricKeySet::new(vec![0u8; 16], vec![0u8; 16]);
        assert!(matches!(
            encrypt(&keys, PLAINTEXT, AAD),
            Err(Error::InvalidIvLength {
                expected: 12,
                actual: 16
            })
        ));
    }

    #[test]
    fn test_short_tag_rejected() {
        let keys = keys(32);
        let out = encrypt(&keys, PLAINTEXT, AAD).unwrap();
        assert!(matches!(
            decrypt(&keys, &out.ciphertext, &out.tag[..12], AAD),
            Err(Error::DecryptionFailed)
        ));
    }

    #[test]
    fn test_wrong_aad_fails() {
        let keys = keys(24);
        let out = encrypt(&keys, PLAINTEXT, AAD).unwrap();
        assert!(matches!(
            decrypt(&keys, &out.ciphertext, &out.tag, b"other"),
            Err(Error::DecryptionFailed)
        ));
    }
}
