//! ECDSA signatures (`ES256`, `ES384`, `ES512`)
//!
//! The hash follows the curve: P-256 uses SHA-256, P-384 SHA-384 and P-521
//! SHA-512. Signatures are the fixed-width `r ‖ s` form from RFC 7518
//! Section 3.4, not ASN.1 DER. Nonces are derived deterministically
//! (RFC 6979).

use super::ensure_not_empty;
use crate::error::{Error, Result};
use crate::keys::{EcPrivateKey, EcPublicKey};
use p256::ecdsa::signature::{Signer, Verifier};
use tracing::{debug, warn};

/// Sign `message` with the curve's hash
///
/// # Returns
/// `r ‖ s`, each zero-padded to the curve's coordinate size
pub fn sign(private: &EcPrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    debug!(curve = %private.curve(), "Signing with ECDSA");
    let signing_error = |e: p256::ecdsa::Error| Error::Signing(e.to_string());

    let signature = match private {
        EcPrivateKey::P256(sk) => {
            let key = p256::ecdsa::SigningKey::from(sk);
            let sig: p256::ecdsa::Signature = key.try_sign(message).map_err(signing_error)?;
            sig.to_bytes().to_vec()
        }
        EcPrivateKey::P384(sk) => {
            let key = p384::ecdsa::SigningKey::from(sk);
            let sig: p384::ecdsa::Signature = key.try_sign(message).map_err(signing_error)?;
            sig.to_bytes().to_vec()
        }
        EcPrivateKey::P521(sk) => {
            let key = p521::ecdsa::SigningKey::from_bytes(&sk.to_bytes()).map_err(signing_error)?;
            let sig: p521::ecdsa::Signature = key.try_sign(message).map_err(signing_error)?;
            sig.to_bytes().to_vec()
        }
    };
    Ok(signature)
}

/// Verify a fixed-width `r ‖ s` signature
///
/// # Errors
/// - [`Error::MalformedSignature`] for an empty signature or one that is not
///   exactly twice the coordinate size
/// - [`Error::InvalidSignature`] when a well-formed signature does not verify
pub fn verify(public: &EcPublicKey, message: &[u8], signature: &[u8]) -> Result<()> {
    ensure_not_empty(signature)?;
    let curve = public.curve();
    let expected = 2 * curve.coordinate_size();
    if signature.len() != expected {
        return Err(Error::MalformedSignature(format!(
            "{} signature must be {} bytes, got {}",
            curve,
            expected,
            signature.len()
        )));
    }

    let valid = match public {
        EcPublicKey::P256(pk) => {
            let key = p256::ecdsa::VerifyingKey::from(pk);
            p256::ecdsa::Signature::from_slice(signature)
                .map(|sig| key.verify(message, &sig).is_ok())
                .unwrap_or(false)
        }
        EcPublicKey::P384(pk) => {
            let key = p384::ecdsa::VerifyingKey::from(pk);
            p384::ecdsa::Signature::from_slice(signature)
                .map(|sig| key.verify(message, &sig).is_ok())
                .unwrap_or(false)
        }
        EcPublicKey::P521(pk) => {
            let key = p521::ecdsa::VerifyingKey::from_affine(*pk.as_affine())
                .map_err(|e| Error::InvalidKey(e.to_string()))?;
            p521::ecdsa::Signature::from_slice(signature)
                .map(|sig| key.verify(message, &sig).is_ok())
                .unwrap_or(false)
        }
    };

    if !valid {
        warn!(curve = %curve, "ECDSA signature mismatch");
        return Err(Error::InvalidSignature);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwa::Curve;

    #[test]
    fn test_sign_verify_every_curve() {
        for curve in [Curve::P256, Curve::P384, Curve::P521] {
            let private = EcPrivateKey::generate(curve);
            let sig = sign(&private, b"message").unwrap();
            assert_eq!(sig.len(), 2 * curve.coordinate_size());
            assert!(verify(&private.public_key(), b"message", &sig).is_ok());
        }
    }

    #[test]
    fn test_signatures_are_deterministic() {
        let private = EcPrivateKey::generate(Curve::P256);
        assert_eq!(
            sign(&private, b"message").unwrap(),
            sign(&private, b"message").unwrap()
        );
    }

    #[test]
    fn test_rfc6979_p256_sha256_sample() {
        // RFC 6979 Appendix A.2.5
        let d = hex::decode("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721")
            .unwrap();
        let private = EcPrivateKey::from_bytes(Curve::P256, &d).unwrap();
        let sig = sign(&private, b"sample").unwrap();
        assert_eq!(
            hex::encode_upper(&sig),
            "EFD48B2AACB6A8FD1140DD9CD45E81D69D2C877B56AAF991C34D0EA84EAF3716\
             F7CB1C942D657C41D436C7A1B6E29F65F3E900DBB9AFF4064DC4AB2F843ACDA8"
        );

        let encoded = private.public_key().to_sec1_bytes();
        let public = EcPublicKey::from_sec1_bytes(Curve::P256, &encoded).unwrap();
        assert!(verify(&public, b"sample", &sig).is_ok());
    }

    #[test]
    fn test_wrong_width_is_malformed() {
        let private = EcPrivateKey::generate(Curve::P384);
        let sig = sign(&private, b"message").unwrap();
        assert!(matches!(
            verify(&private.public_key(), b"message", &sig[..64]),
            Err(Error::MalformedSignature(_))
        ));
        assert!(matches!(
            verify(&private.public_key(), b"message", &[]),
            Err(Error::MalformedSignature(_))
        ));
    }

    #[test]
    fn test_zero_signature_is_invalid() {
        let private = EcPrivateKey::generate(Curve::P256);
        assert!(matches!(
            verify(&private.public_key(), b"message", &[0u8; 64]),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn test_other_key_fails() {
        let a = EcPrivateKey::generate(Curve::P521);
        let b = EcPrivateKey::generate(Curve::P521);
        let sig = sign(&a, b"message").unwrap();
        assert!(matches!(
            verify(&b.public_key(), b"message", &sig),
            Err(Error::InvalidSignature)
        ));
    }
}
