//! Key material handled by the algorithm suite
//!
//! Keys are owned by the caller. Operations borrow them for the duration of a
//! single call and never retain them. Secret intermediates (CEKs, wrapping
//! keys, shared secrets) are carried as [`SecretBytes`] so they are wiped on
//! every exit path.

use crate::error::{Error, Result};
use crate::jwa::{ContentEncryption, Curve, HashAlgorithm};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::{rngs::OsRng, RngCore};
use std::fmt;
use zeroize::Zeroizing;

/// Byte buffer that is zeroed when dropped
pub type SecretBytes = Zeroizing<Vec<u8>>;

/// Fills a fresh buffer with `len` bytes from the OS random source
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// A content encryption key together with its IV
#[derive(Clone)]
pub struct SymmetricKeySet {
    /// Content encryption key; its length selects the algorithm variant
    pub cek: SecretBytes,
    /// Initialization vector (16 bytes for CBC, 12 bytes for GCM)
    pub iv: Vec<u8>,
}

impl SymmetricKeySet {
    /// Creates a key set from caller-supplied material
    pub fn new(cek: impl Into<Vec<u8>>, iv: impl Into<Vec<u8>>) -> Self {
        Self {
            cek: Zeroizing::new(cek.into()),
            iv: iv.into(),
        }
    }

    /// Generates a random CEK and IV sized for `enc`
    pub fn generate(enc: ContentEncryption) -> Self {
        let cek = Zeroizing::new(random_bytes(enc.key_size()));
        let iv = random_bytes(enc.iv_size());
        Self { cek, iv }
    }
}

impl fmt::Debug for SymmetricKeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKeySet")
            .field("cek", &format_args!("[{} bytes redacted]", self.cek.len()))
            .field("iv", &self.iv)
            .finish()
    }
}

/// Result of content encryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AeadOutput {
    /// Encrypted payload
    pub ciphertext: Vec<u8>,
    /// Authentication tag
    pub tag: Vec<u8>,
}

/// Generates a random HMAC key of the recommended size for `hash`
///
/// 64 bytes for SHA-256, 128 bytes for SHA-384 and SHA-512 (one hash block).
pub fn generate_hmac_key(hash: HashAlgorithm) -> Result<SecretBytes> {
    let len = match hash {
        HashAlgorithm::Sha256 => 64,
        HashAlgorithm::Sha384 | HashAlgorithm::Sha512 => 128,
        HashAlgorithm::Sha1 => return Err(Error::HashUnavailable(hash.to_string())),
    };
    Ok(Zeroizing::new(random_bytes(len)))
}

/// A NIST curve private key, tagged with its curve
#[derive(Clone, Debug)]
pub enum EcPrivateKey {
    /// P-256 secret scalar
    P256(p256::SecretKey),
    /// P-384 secret scalar
    P384(p384::SecretKey),
    /// P-521 secret scalar
    P521(p521::SecretKey),
}

/// A NIST curve public key, tagged with its curve
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EcPublicKey {
    /// P-256 point
    P256(p256::PublicKey),
    /// P-384 point
    P384(p384::PublicKey),
    /// P-521 point
    P521(p521::PublicKey),
}

impl EcPrivateKey {
    /// Generates a random key on `curve`
    pub fn generate(curve: Curve) -> Self {
        match curve {
            Curve::P256 => EcPrivateKey::P256(p256::SecretKey::random(&mut OsRng)),
            Curve::P384 => EcPrivateKey::P384(p384::SecretKey::random(&mut OsRng)),
            Curve::P521 => EcPrivateKey::P521(p521::SecretKey::random(&mut OsRng)),
        }
    }

    /// Parses a big-endian private scalar `d`
    pub fn from_bytes(curve: Curve, d: &[u8]) -> Result<Self> {
        let invalid = |e: p256::elliptic_curve::Error| {
            Error::InvalidKey(format!("Invalid {} private key: {}", curve, e))
        };
        Ok(match curve {
            Curve::P256 => EcPrivateKey::P256(p256::SecretKey::from_slice(d).map_err(invalid)?),
            Curve::P384 => EcPrivateKey::P384(p384::SecretKey::from_slice(d).map_err(invalid)?),
            Curve::P521 => EcPrivateKey::P521(p521::SecretKey::from_slice(d).map_err(invalid)?),
        })
    }

    /// The fixed-width big-endian private scalar
    pub fn to_bytes(&self) -> SecretBytes {
        Zeroizing::new(match self {
            EcPrivateKey::P256(key) => key.to_bytes().to_vec(),
            EcPrivateKey::P384(key) => key.to_bytes().to_vec(),
            EcPrivateKey::P521(key) => key.to_bytes().to_vec(),
        })
    }

    /// Curve the key lives on
    pub fn curve(&self) -> Curve {
        match self {
            EcPrivateKey::P256(_) => Curve::P256,
            EcPrivateKey::P384(_) => Curve::P384,
            EcPrivateKey::P521(_) => Curve::P521,
        }
    }

    /// Derives the matching public key
    pub fn public_key(&self) -> EcPublicKey {
        match self {
            EcPrivateKey::P256(key) => EcPublicKey::P256(key.public_key()),
            EcPrivateKey::P384(key) => EcPublicKey::P384(key.public_key()),
            EcPrivateKey::P521(key) => EcPublicKey::P521(key.public_key()),
        }
    }
}

impl EcPublicKey {
    /// Parses a SEC1 encoded point (compressed or uncompressed)
    pub fn from_sec1_bytes(curve: Curve, bytes: &[u8]) -> Result<Self> {
        let invalid = |e: p256::elliptic_curve::Error| {
            Error::InvalidKey(format!("Invalid {} public key: {}", curve, e))
        };
        Ok(match curve {
            Curve::P256 => {
                EcPublicKey::P256(p256::PublicKey::from_sec1_bytes(bytes).map_err(invalid)?)
            }
            Curve::P384 => {
                EcPublicKey::P384(p384::PublicKey::from_sec1_bytes(bytes).map_err(invalid)?)
            }
            Curve::P521 => {
                EcPublicKey::P521(p521::PublicKey::from_sec1_bytes(bytes).map_err(invalid)?)
            }
        })
    }

    /// Uncompressed SEC1 encoding (`04 ‖ x ‖ y`)
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        match self {
            EcPublicKey::P256(key) => key.to_encoded_point(false).as_bytes().to_vec(),
            EcPublicKey::P384(key) => key.to_encoded_point(false).as_bytes().to_vec(),
            EcPublicKey::P521(key) => key.to_encoded_point(false).as_bytes().to_vec(),
        }
    }

    /// Curve the point lives on
    pub fn curve(&self) -> Curve {
        match self {
            EcPublicKey::P256(_) => Curve::P256,
            EcPublicKey::P384(_) => Curve::P384,
            EcPublicKey::P521(_) => Curve::P521,
        }
    }
}
