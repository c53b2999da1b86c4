//! JSON Web Signature algorithms
//!
//! Each family lives in its own module with plain `sign`/`verify` functions
//! over bytes. [`sign`] and [`verify`] dispatch on a [`JwsAlgorithm`] and
//! check that the supplied key belongs to the algorithm's family (and, for
//! ECDSA, to its curve).
//!
//! A signature that does not verify is always [`Error::InvalidSignature`].
//! Signatures that cannot be a valid signature at all, such as empty input,
//! are [`Error::MalformedSignature`].

pub mod ecdsa;
pub mod eddsa;
pub mod hmac;
pub mod rsa;

use crate::encoding::{decode_segment, encode_segment};
use crate::error::{Error, Result};
use crate::jwa::JwsAlgorithm;
use crate::keys::{EcPrivateKey, EcPublicKey};
use ::rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;

/// Key used to produce a signature
#[derive(Debug, Clone, Copy)]
pub enum SigningKey<'a> {
    /// Shared HMAC secret
    Hmac(&'a [u8]),
    /// RSA private key for `RS*` and `PS*`
    Rsa(&'a RsaPrivateKey),
    /// NIST curve private key for `ES*`
    Ec(&'a EcPrivateKey),
    /// Ed25519 private key for `EdDSA`
    Ed25519(&'a ed25519_dalek::SigningKey),
}

/// Key used to check a signature
#[derive(Debug, Clone, Copy)]
pub enum VerificationKey<'a> {
    /// Shared HMAC secret
    Hmac(&'a [u8]),
    /// RSA public key for `RS*` and `PS*`
    Rsa(&'a RsaPublicKey),
    /// NIST curve public key for `ES*`
    Ec(&'a EcPublicKey),
    /// Ed25519 public key for `EdDSA`
    Ed25519(&'a ed25519_dalek::VerifyingKey),
}

/// Signs `message` with `alg`
///
/// # Arguments
/// * `alg` - Signature algorithm
/// * `message` - The signing input
/// * `key` - A key of the algorithm's family
///
/// # Returns
/// The raw signature bytes
pub fn sign(alg: JwsAlgorithm, message: &[u8], key: SigningKey<'_>) -> Result<Vec<u8>> {
    debug!(alg = %alg, message_len = message.len(), "Signing");
    match (alg, key) {
        (JwsAlgorithm::HS256 | JwsAlgorithm::HS384 | JwsAlgorithm::HS512, SigningKey::Hmac(k)) => {
            hmac::sign(hash_of(alg)?, k, message)
        }
        (JwsAlgorithm::RS256 | JwsAlgorithm::RS384 | JwsAlgorithm::RS512, SigningKey::Rsa(k)) => {
            rsa::sign_pkcs1v15(hash_of(alg)?, k, message)
        }
        (JwsAlgorithm::PS256 | JwsAlgorithm::PS384 | JwsAlgorithm::PS512, SigningKey::Rsa(k)) => {
            rsa::sign_pss(hash_of(alg)?, k, message)
        }
        (JwsAlgorithm::ES256 | JwsAlgorithm::ES384 | JwsAlgorithm::ES512, SigningKey::Ec(k)) => {
            check_curve(alg, k.curve())?;
            ecdsa::sign(k, message)
        }
        (JwsAlgorithm::EdDSA, SigningKey::Ed25519(k)) => Ok(eddsa::sign(k, message)),
        (alg, key) => Err(Error::InvalidKeyType(format!(
            "{} cannot sign with {}",
            alg,
            signing_key_kind(&key)
        ))),
    }
}

/// Verifies `signature` over `message` with `alg`
pub fn verify(
    alg: JwsAlgorithm,
    message: &[u8],
    signature: &[u8],
    key: VerificationKey<'_>,
) -> Result<()> {
    debug!(alg = %alg, message_len = message.len(), "Verifying signature");
    match (alg, key) {
        (
            JwsAlgorithm::HS256 | JwsAlgorithm::HS384 | JwsAlgorithm::HS512,
            VerificationKey::Hmac(k),
        ) => hmac::verify(hash_of(alg)?, k, message, signature),
        (
            JwsAlgorithm::RS256 | JwsAlgorithm::RS384 | JwsAlgorithm::RS512,
            VerificationKey::Rsa(k),
        ) => rsa::verify_pkcs1v15(hash_of(alg)?, k, message, signature),
        (
            JwsAlgorithm::PS256 | JwsAlgorithm::PS384 | JwsAlgorithm::PS512,
            VerificationKey::Rsa(k),
        ) => rsa::verify_pss(hash_of(alg)?, k, message, signature),
        (
            JwsAlgorithm::ES256 | JwsAlgorithm::ES384 | JwsAlgorithm::ES512,
            VerificationKey::Ec(k),
        ) => {
            check_curve(alg, k.curve())?;
            ecdsa::verify(k, message, signature)
        }
        (JwsAlgorithm::EdDSA, VerificationKey::Ed25519(k)) => eddsa::verify(k, message, signature),
        (alg, key) => Err(Error::InvalidKeyType(format!(
            "{} cannot verify with {}",
            alg,
            verification_key_kind(&key)
        ))),
    }
}

/// [`sign`] returning the unpadded base64url signature
pub fn sign_b64(alg: JwsAlgorithm, message: &[u8], key: SigningKey<'_>) -> Result<String> {
    sign(alg, message, key).map(|sig| encode_segment(&sig))
}

/// [`verify`] taking the unpadded base64url signature
///
/// Undecodable text fails with [`Error::Decode`], never as a verification
/// failure.
pub fn verify_b64(
    alg: JwsAlgorithm,
    message: &[u8],
    signature: &str,
    key: VerificationKey<'_>,
) -> Result<()> {
    let signature = decode_segment(signature)?;
    verify(alg, message, &signature, key)
}

pub(crate) fn ensure_not_empty(signature: &[u8]) -> Result<()> {
    if signature.is_empty() {
        return Err(Error::MalformedSignature("empty signature".to_string()));
    }
    Ok(())
}

fn hash_of(alg: JwsAlgorithm) -> Result<crate::jwa::HashAlgorithm> {
    alg.hash()
        .ok_or_else(|| Error::UnsupportedAlgorithm(alg.to_string()))
}

fn check_curve(alg: JwsAlgorithm, curve: crate::jwa::Curve) -> Result<()> {
    if alg.curve() != Some(curve) {
        return Err(Error::InvalidKeyType(format!(
            "{} requires a {} key, got {}",
            alg,
            alg.curve().map(|c| c.as_str()).unwrap_or("non-EC"),
            curve
        )));
    }
    Ok(())
}

fn signing_key_kind(key: &SigningKey<'_>) -> &'static str {
    match key {
        SigningKey::Hmac(_) => "an HMAC key",
        SigningKey::Rsa(_) => "an RSA key",
        SigningKey::Ec(_) => "an EC key",
        SigningKey::Ed25519(_) => "an Ed25519 key",
    }
}

fn verification_key_kind(key: &VerificationKey<'_>) -> &'static str {
    match key {
        VerificationKey::Hmac(_) => "an HMAC key",
        VerificationKey::Rsa(_) => "an RSA key",
        VerificationKey::Ec(_) => "an EC key",
        VerificationKey::Ed25519(_) => "an Ed25519 key",
    }
}
