//! ECDH-ES key agreement (RFC 7518 Section 4.6, RFC 8037 Section 3.2)
//!
//! The shared secret `Z` comes either from a NIST curve or from X25519.
//! [`derive`] feeds it into the Concat KDF with the target's identifier as
//! AlgorithmID. `Z` and the derived key are held in [`SecretBytes`].

use crate::crypto::kdf::concat_kdf_sha256;
use crate::error::{Error, Result};
use crate::jwa::KeyAgreementTarget;
use crate::keys::{EcPrivateKey, EcPublicKey, SecretBytes};
use tracing::{debug, warn};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroizing;

/// Derive the key for `target` from a shared secret
///
/// # Arguments
/// * `z` - Raw shared secret
/// * `target` - Selects the KDF AlgorithmID and output size
/// * `apu` - Agreement PartyUInfo (may be empty)
/// * `apv` - Agreement PartyVInfo (may be empty)
///
/// # Returns
/// `target.size()` bytes, identical for both parties of the agreement
pub fn derive(
    z: &[u8],
    target: KeyAgreementTarget,
    apu: &[u8],
    apv: &[u8],
) -> Result<SecretBytes> {
    debug!(
        target = target.id(),
        size = target.size(),
        mode = ?target.mode(),
        "Deriving key from shared secret"
    );
    concat_kdf_sha256(z, target.id().as_bytes(), apu, apv, target.size())
}

/// Compute `Z` on a NIST curve
///
/// The x-coordinate is returned at the full coordinate width of the curve,
/// leading zero bytes included.
///
/// # Errors
/// [`Error::KeyMismatch`] when the keys are on different curves. This is
/// checked before any scalar multiplication.
pub fn shared_secret_ec(private: &EcPrivateKey, public: &EcPublicKey) -> Result<SecretBytes> {
    let z = match (private, public) {
        (EcPrivateKey::P256(sk), EcPublicKey::P256(pk)) => {
            p256::ecdh::diffie_hellman(sk.to_nonzero_scalar(), pk.as_affine())
                .raw_secret_bytes()
                .to_vec()
        }
        (EcPrivateKey::P384(sk), EcPublicKey::P384(pk)) => {
            p384::ecdh::diffie_hellman(sk.to_nonzero_scalar(), pk.as_affine())
                .raw_secret_bytes()
                .to_vec()
        }
        (EcPrivateKey::P521(sk), EcPublicKey::P521(pk)) => {
            p521::ecdh::diffie_hellman(sk.to_nonzero_scalar(), pk.as_affine())
                .raw_secret_bytes()
                .to_vec()
        }
        _ => {
            warn!(
                private = %private.curve(),
                public = %public.curve(),
                "Key agreement across different curves"
            );
            return Err(Error::KeyMismatch);
        }
    };
    Ok(Zeroizing::new(z))
}

/// Compute `Z` with X25519
///
/// # Errors
/// [`Error::KeyAgreement`] when the result is all zeros, which happens for
/// low-order peer points.
pub fn shared_secret_x25519(
    private: &StaticSecret,
    public: &X25519PublicKey,
) -> Result<SecretBytes> {
    let shared = private.diffie_hellman(public);
    if !shared.was_contributory() {
        warn!("X25519 produced a non-contributory shared secret");
        return Err(Error::KeyAgreement(
            "X25519 shared secret is all zeros".to_string(),
        ));
    }
    Ok(Zeroizing::new(shared.as_bytes().to_vec()))
}

/// ECDH-ES on a NIST curve followed by [`derive`]
pub fn derive_ec(
    private: &EcPrivateKey,
    public: &EcPublicKey,
    target: KeyAgreementTarget,
    apu: &[u8],
    apv: &[u8],
) -> Result<SecretBytes> {
    let z = shared_secret_ec(private, public)?;
    derive(&z, target, apu, apv)
}

/// ECDH-ES with X25519 followed by [`derive`]
pub fn derive_x25519(
    private: &StaticSecret,
    public: &X25519PublicKey,
    target: KeyAgreementTarget,
    apu: &[u8],
    apv: &[u8],
) -> Result<SecretBytes> {
    let z = shared_secret_x25519(private, public)?;
    derive(&z, target, apu, apv)
}
