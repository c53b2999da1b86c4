//! PBES2 password-based key wrapping (RFC 7518 Section 4.8)
//!
//! PBKDF2 turns a password into an AES key-wrapping key whose size follows
//! the hash: SHA-256 gives 16 bytes, SHA-384 24 and SHA-512 32. The recommended
//! minimum iteration count and salt length are caller policy, see
//! [`crate::config::JoseConfig::check_pbes2`].

use crate::error::{Error, Result};
use crate::jwa::{HashAlgorithm, KeyManagementAlgorithm};
use crate::jwe::keywrap;
use crate::keys::SecretBytes;
use pbkdf2::pbkdf2_hmac;
use sha2::{Sha256, Sha384, Sha512};
use tracing::debug;
use zeroize::Zeroizing;

/// Derive a key-wrapping key from a password
///
/// # Arguments
/// * `hash` - PBKDF2 PRF hash
/// * `salt` - Full PBKDF2 salt, normally built with [`pbes2_salt`]
/// * `password` - The password
/// * `iterations` - PBKDF2 iteration count, must be positive
///
/// # Returns
/// A 16, 24 or 32 byte key depending on `hash`
pub fn derive(
    hash: HashAlgorithm,
    salt: &[u8],
    password: &[u8],
    iterations: u32,
) -> Result<SecretBytes> {
    let len = match hash {
        HashAlgorithm::Sha256 => 16,
        HashAlgorithm::Sha384 => 24,
        HashAlgorithm::Sha512 => 32,
        HashAlgorithm::Sha1 => return Err(Error::UnsupportedHash(hash.to_string())),
    };
    if iterations == 0 {
        return Err(Error::Config(
            "PBES2 iteration count must be positive".to_string(),
        ));
    }
    debug!(hash = %hash, iterations, "Deriving PBES2 key-wrapping key");

    let mut key = Zeroizing::new(vec![0u8; len]);
    match hash {
        HashAlgorithm::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key),
        HashAlgorithm::Sha384 => pbkdf2_hmac::<Sha384>(password, salt, iterations, &mut key),
        _ => pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut key),
    }
    Ok(key)
}

/// Builds the PBKDF2 salt `UTF8(alg) ‖ 0x00 ‖ salt_input`
pub fn pbes2_salt(alg: KeyManagementAlgorithm, salt_input: &[u8]) -> Result<Vec<u8>> {
    if alg.pbes2_hash().is_none() {
        return Err(Error::UnsupportedAlgorithm(format!(
            "{} is not a PBES2 algorithm",
            alg
        )));
    }
    let id = alg.as_str().as_bytes();
    let mut salt = Vec::with_capacity(id.len() + 1 + salt_input.len());
    salt.extend_from_slice(id);
    salt.push(0);
    salt.extend_from_slice(salt_input);
    Ok(salt)
}

/// Wraps `cek` with a key derived from `password` for a PBES2 `alg`
pub fn wrap_key(
    alg: KeyManagementAlgorithm,
    password: &[u8],
    salt_input: &[u8],
    iterations: u32,
    cek: &[u8],
) -> Result<Vec<u8>> {
    let kwk = derive_for(alg, password, salt_input, iterations)?;
    keywrap::wrap_aes(&kwk, cek)
}

/// Unwraps a CEK wrapped by [`wrap_key`]
pub fn unwrap_key(
    alg: KeyManagementAlgorithm,
    password: &[u8],
    salt_input: &[u8],
    iterations: u32,
    wrapped: &[u8],
) -> Result<SecretBytes> {
    let kwk = derive_for(alg, password, salt_input, iterations)?;
    keywrap::unwrap_aes(&kwk, wrapped)
}

fn derive_for(
    alg: KeyManagementAlgorithm,
    password: &[u8],
    salt_input: &[u8],
    iterations: u32,
) -> Result<SecretBytes> {
    let salt = pbes2_salt(alg, salt_input)?;
    let hash = alg
        .pbes2_hash()
        .ok_or_else(|| Error::UnsupportedAlgorithm(alg.to_string()))?;
    derive(hash, &salt, password, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_sizes_follow_hash() {
        assert_eq!(derive(HashAlgorithm::Sha256, b"salt", b"pw", 10).unwrap().len(), 16);
        assert_eq!(derive(HashAlgorithm::Sha384, b"salt", b"pw", 10).unwrap().len(), 24);
        assert_eq!(derive(HashAlgorithm::Sha512, b"salt", b"pw", 10).unwrap().len(), 32);
    }

    #[test]
    fn test_sha1_unsupported() {
        assert!(matches!(
            derive(HashAlgorithm::Sha1, b"salt", b"pw", 10),
            Err(Error::UnsupportedHash(_))
        ));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(matches!(
            derive(HashAlgorithm::Sha256, b"salt", b"pw", 0),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_salt_construction() {
        let salt = pbes2_salt(KeyManagementAlgorithm::Pbes2Hs256A128Kw, &[1, 2, 3]).unwrap();
        assert_eq!(&salt[..18], b"PBES2-HS256+A128KW");
        assert_eq!(&salt[18..], &[0, 1, 2, 3]);

        assert!(matches!(
            pbes2_salt(KeyManagementAlgorithm::A128Kw, &[1, 2, 3]),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_wrap_round_trip() {
        let cek = [0x11u8; 32];
        for alg in [
            KeyManagementAlgorithm::Pbes2Hs256A128Kw,
            KeyManagementAlgorithm::Pbes2Hs384A192Kw,
            KeyManagementAlgorithm::Pbes2Hs512A256Kw,
        ] {
            let wrapped = wrap_key(alg, b"secret", b"saltsalt", 1000, &cek).unwrap();
            assert_eq!(wrapped.len(), 40);
            let unwrapped = unwrap_key(alg, b"secret", b"saltsalt", 1000, &wrapped).unwrap();
            assert_eq!(&unwrapped[..], &cek);

            assert!(matches!(
                unwrap_key(alg, b"Secret", b"saltsalt", 1000, &wrapped),
                Err(Error::IntegrityCheckFailed)
            ));
        }
    }
}
