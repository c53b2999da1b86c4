//! Ed25519 signatures (`EdDSA`, RFC 8037)

use super::ensure_not_empty;
use crate::error::{Error, Result};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use tracing::warn;

/// Signs `message` with Ed25519
pub fn sign(private: &SigningKey, message: &[u8]) -> Vec<u8> {
    private.sign(message).to_bytes().to_vec()
}

/// Verifies a 64 byte Ed25519 signature
pub fn verify(public: &VerifyingKey, message: &[u8], signature: &[u8]) -> Result<()> {
    ensure_not_empty(signature)?;
    let signature = Signature::from_slice(signature).map_err(|_| {
        Error::MalformedSignature(format!(
            "Ed25519 signature must be 64 bytes, got {}",
            signature.len()
        ))
    })?;
    public.verify(message, &signature).map_err(|_| {
        warn!("Ed25519 signature mismatch");
        Error::InvalidSignature
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_rfc8032_test_1() {
        let secret: [u8; 32] =
            hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60")
                .unwrap()
                .try_into()
                .unwrap();
        let key = SigningKey::from_bytes(&secret);
        let sig = sign(&key, b"");
        assert_eq!(
            hex::encode(&sig),
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );
        assert!(verify(&key.verifying_key(), b"", &sig).is_ok());
    }

    #[test]
    fn test_wrong_length_is_malformed() {
        let key = SigningKey::generate(&mut OsRng);
        assert!(matches!(
            verify(&key.verifying_key(), b"m", &[1u8; 63]),
            Err(Error::MalformedSignature(_))
        ));
    }

    #[test]
    fn test_tampered_message() {
        let key = SigningKey::generate(&mut OsRng);
        let sig = sign(&key, b"message");
        assert!(matches!(
            verify(&key.verifying_key(), b"messagf", &sig),
            Err(Error::InvalidSignature)
        ));
    }
}
