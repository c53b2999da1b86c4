//! RSA key encryption (RFC 7518 Sections 4.2 and 4.3)
//!
//! RSAES-OAEP is parameterised by the hash used for both the label digest and
//! MGF1. RSAES-PKCS1-v1_5 is only kept for interoperability with legacy
//! producers.

use crate::error::{Error, Result};
use crate::jwa::{HashAlgorithm, KeyManagementAlgorithm};
use crate::keys::SecretBytes;
use rand::rngs::OsRng;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use tracing::{debug, warn};
use zeroize::Zeroizing;

fn oaep(hash: HashAlgorithm) -> Oaep {
    match hash {
        HashAlgorithm::Sha1 => Oaep::new::<Sha1>(),
        HashAlgorithm::Sha256 => Oaep::new::<Sha256>(),
        HashAlgorithm::Sha384 => Oaep::new::<Sha384>(),
        HashAlgorithm::Sha512 => Oaep::new::<Sha512>(),
    }
}

/// Encrypt a CEK with RSAES-OAEP
///
/// # Arguments
/// * `public` - Recipient's RSA public key
/// * `hash` - OAEP hash (SHA-1 for `RSA-OAEP`, SHA-256 for `RSA-OAEP-256`)
/// * `cek` - The content encryption key
pub fn encrypt_oaep(public: &RsaPublicKey, hash: HashAlgorithm, cek: &[u8]) -> Result<Vec<u8>> {
    debug!(hash = %hash, "Encrypting CEK with RSA-OAEP");
    public
        .encrypt(&mut OsRng, oaep(hash), cek)
        .map_err(|e| Error::KeyEncryptionFailed(e.to_string()))
}

/// Decrypt a CEK encrypted with RSAES-OAEP
pub fn decrypt_oaep(
    private: &RsaPrivateKey,
    hash: HashAlgorithm,
    encrypted_key: &[u8],
) -> Result<SecretBytes> {
    debug!(hash = %hash, "Decrypting CEK with RSA-OAEP");
    private
        .decrypt(oaep(hash), encrypted_key)
        .map(Zeroizing::new)
        .map_err(|e| {
            warn!("RSA-OAEP key decryption failed");
            Error::KeyDecryptionFailed(e.to_string())
        })
}

/// Encrypt a CEK with RSAES-PKCS1-v1_5
pub fn encrypt_pkcs1v15(public: &RsaPublicKey, cek: &[u8]) -> Result<Vec<u8>> {
    debug!("Encrypting CEK with RSA1_5");
    public
        .encrypt(&mut OsRng, Pkcs1v15Encrypt, cek)
        .map_err(|e| Error::KeyEncryptionFailed(e.to_string()))
}

/// Decrypt a CEK encrypted with RSAES-PKCS1-v1_5
pub fn decrypt_pkcs1v15(private: &RsaPrivateKey, encrypted_key: &[u8]) -> Result<SecretBytes> {
    debug!("Decrypting CEK with RSA1_5");
    private
        .decrypt(Pkcs1v15Encrypt, encrypted_key)
        .map(Zeroizing::new)
        .map_err(|e| {
            warn!("RSA1_5 key decryption failed");
            Error::KeyDecryptionFailed(e.to_string())
        })
}

/// Encrypt a CEK for one of `RSA1_5`, `RSA-OAEP` or `RSA-OAEP-256`
pub fn encrypt_key(
    alg: KeyManagementAlgorithm,
    public: &RsaPublicKey,
    cek: &[u8],
) -> Result<Vec<u8>> {
    match alg {
        KeyManagementAlgorithm::Rsa1_5 => encrypt_pkcs1v15(public, cek),
        KeyManagementAlgorithm::RsaOaep => encrypt_oaep(public, HashAlgorithm::Sha1, cek),
        KeyManagementAlgorithm::RsaOaep256 => encrypt_oaep(public, HashAlgorithm::Sha256, cek),
        other => Err(Error::UnsupportedAlgorithm(format!(
            "{} is not an RSA key encryption algorithm",
            other
        ))),
    }
}

/// Decrypt a CEK for one of `RSA1_5`, `RSA-OAEP` or `RSA-OAEP-256`
pub fn decrypt_key(
    alg: KeyManagementAlgorithm,
    private: &RsaPrivateKey,
    encrypted_key: &[u8],
) -> Result<SecretBytes> {
    match alg {
        KeyManagementAlgorithm::Rsa1_5 => decrypt_pkcs1v15(private, encrypted_key),
        KeyManagementAlgorithm::RsaOaep => {
            decrypt_oaep(private, HashAlgorithm::Sha1, encrypted_key)
        }
        KeyManagementAlgorithm::RsaOaep256 => {
            decrypt_oaep(private, HashAlgorithm::Sha256, encrypted_key)
        }
        other => Err(Error::UnsupportedAlgorithm(format!(
            "{} is not an RSA key encryption algorithm",
            other
        ))),
    }
}
