//! JSON Web Algorithms (RFC 7518) identifiers
//!
//! Every algorithm family is a closed enum: adding an algorithm means adding a
//! variant, and every `match` over the family has to handle it. The string
//! forms are the registered JOSE header values, so these types can be carried
//! in `alg` / `enc` / `crv` header fields through serde.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hash functions used across the suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-1, only for legacy RSA-OAEP
    #[serde(rename = "SHA-1")]
    Sha1,
    /// SHA-256
    #[serde(rename = "SHA-256")]
    Sha256,
    /// SHA-384
    #[serde(rename = "SHA-384")]
    Sha384,
    /// SHA-512
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl HashAlgorithm {
    /// Returns the algorithm name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Digest output size in bytes
    pub fn output_size(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SHA-1" => Ok(HashAlgorithm::Sha1),
            "SHA-256" => Ok(HashAlgorithm::Sha256),
            "SHA-384" => Ok(HashAlgorithm::Sha384),
            "SHA-512" => Ok(HashAlgorithm::Sha512),
            other => Err(Error::UnsupportedHash(other.to_string())),
        }
    }
}

/// NIST curves supported for ECDSA and ECDH-ES
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    /// NIST P-256
    #[serde(rename = "P-256")]
    P256,
    /// NIST P-384
    #[serde(rename = "P-384")]
    P384,
    /// NIST P-521
    #[serde(rename = "P-521")]
    P521,
}

impl Curve {
    /// Returns the JOSE `crv` value
    pub fn as_str(&self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
        }
    }

    /// Size in bytes of a field element / scalar, i.e. ceil(bits / 8).
    ///
    /// This is the width of the ECDH shared secret and of each half of a
    /// JWS ECDSA signature.
    pub fn coordinate_size(&self) -> usize {
        match self {
            Curve::P256 => 32,
            Curve::P384 => 48,
            // 521 bits
            Curve::P521 => 66,
        }
    }

    /// Hash used by ECDSA on this curve
    pub fn hash(&self) -> HashAlgorithm {
        match self {
            Curve::P256 => HashAlgorithm::Sha256,
            Curve::P384 => HashAlgorithm::Sha384,
            Curve::P521 => HashAlgorithm::Sha512,
        }
    }
}

impl FromStr for Curve {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "P-256" => Ok(Curve::P256),
            "P-384" => Ok(Curve::P384),
            "P-521" => Ok(Curve::P521),
            other => Err(Error::UnsupportedCurve(other.to_string())),
        }
    }
}

/// JWE content encryption algorithms (the `enc` header)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentEncryption {
    /// AES_128_CBC_HMAC_SHA_256
    #[serde(rename = "A128CBC-HS256")]
    A128CbcHs256,
    /// AES_192_CBC_HMAC_SHA_384
    #[serde(rename = "A192CBC-HS384")]
    A192CbcHs384,
    /// AES_256_CBC_HMAC_SHA_512
    #[serde(rename = "A256CBC-HS512")]
    A256CbcHs512,
    /// AES GCM using 128-bit key
    #[serde(rename = "A128GCM")]
    A128Gcm,
    /// AES GCM using 192-bit key
    #[serde(rename = "A192GCM")]
    A192Gcm,
    /// AES GCM using 256-bit key
    #[serde(rename = "A256GCM")]
    A256Gcm,
}

impl ContentEncryption {
    /// All content encryption algorithms
    pub const ALL: [ContentEncryption; 6] = [
        ContentEncryption::A128CbcHs256,
        ContentEncryption::A192CbcHs384,
        ContentEncryption::A256CbcHs512,
        ContentEncryption::A128Gcm,
        ContentEncryption::A192Gcm,
        ContentEncryption::A256Gcm,
    ];

    /// Returns the algorithm identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncryption::A128CbcHs256 => "A128CBC-HS256",
            ContentEncryption::A192CbcHs384 => "A192CBC-HS384",
            ContentEncryption::A256CbcHs512 => "A256CBC-HS512",
            ContentEncryption::A128Gcm => "A128GCM",
            ContentEncryption::A192Gcm => "A192GCM",
            ContentEncryption::A256Gcm => "A256GCM",
        }
    }

    /// CEK size in bytes
    pub fn key_size(&self) -> usize {
        match self {
            ContentEncryption::A128CbcHs256 => 32,
            ContentEncryption::A192CbcHs384 => 48,
            ContentEncryption::A256CbcHs512 => 64,
            ContentEncryption::A128Gcm => 16,
            ContentEncryption::A192Gcm => 24,
            ContentEncryption::A256Gcm => 32,
        }
    }

    /// IV size in bytes
    pub fn iv_size(&self) -> usize {
        if self.is_gcm() {
            12
        } else {
            16
        }
    }

    /// Authentication tag size in bytes
    pub fn tag_size(&self) -> usize {
        match self {
            ContentEncryption::A128CbcHs256 => 16,
            ContentEncryption::A192CbcHs384 => 24,
            ContentEncryption::A256CbcHs512 => 32,
            _ => 16,
        }
    }

    /// Whether this is one of the AES-GCM variants
    pub fn is_gcm(&self) -> bool {
        matches!(
            self,
            ContentEncryption::A128Gcm | ContentEncryption::A192Gcm | ContentEncryption::A256Gcm
        )
    }

    /// Selects the CBC-HMAC variant from a composite key size
    pub fn from_cbc_key_size(size: usize) -> Result<Self> {
        match size {
            32 => Ok(ContentEncryption::A128CbcHs256),
            48 => Ok(ContentEncryption::A192CbcHs384),
            64 => Ok(ContentEncryption::A256CbcHs512),
            other => Err(Error::UnsupportedKeySize(other)),
        }
    }

    /// Selects the GCM variant from a key size
    pub fn from_gcm_key_size(size: usize) -> Result<Self> {
        match size {
            16 => Ok(ContentEncryption::A128Gcm),
            24 => Ok(ContentEncryption::A192Gcm),
            32 => Ok(ContentEncryption::A256Gcm),
            other => Err(Error::UnsupportedKeySize(other)),
        }
    }
}

impl FromStr for ContentEncryption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ContentEncryption::ALL
            .into_iter()
            .find(|enc| enc.as_str() == s)
            .ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
    }
}

/// JWE key management algorithms (the `alg` header)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyManagementAlgorithm {
    /// RSAES-PKCS1-v1_5 (legacy)
    #[serde(rename = "RSA1_5")]
    Rsa1_5,
    /// RSAES OAEP using default parameters (SHA-1)
    #[serde(rename = "RSA-OAEP")]
    RsaOaep,
    /// RSAES OAEP using SHA-256 and MGF1 with SHA-256
    #[serde(rename = "RSA-OAEP-256")]
    RsaOaep256,
    /// AES Key Wrap using 128-bit key
    #[serde(rename = "A128KW")]
    A128Kw,
    /// AES Key Wrap using 192-bit key
    #[serde(rename = "A192KW")]
    A192Kw,
    /// AES Key Wrap using 256-bit key
    #[serde(rename = "A256KW")]
    A256Kw,
    /// Key wrapping with AES GCM using 128-bit key
    #[serde(rename = "A128GCMKW")]
    A128GcmKw,
    /// Key wrapping with AES GCM using 192-bit key
    #[serde(rename = "A192GCMKW")]
    A192GcmKw,
    /// Key wrapping with AES GCM using 256-bit key
    #[serde(rename = "A256GCMKW")]
    A256GcmKw,
    /// Direct use of a shared symmetric key as the CEK
    #[serde(rename = "dir")]
    Dir,
    /// ECDH-ES using Concat KDF, direct key agreement
    #[serde(rename = "ECDH-ES")]
    EcdhEs,
    /// ECDH-ES using Concat KDF and CEK wrapped with A128KW
    #[serde(rename = "ECDH-ES+A128KW")]
    EcdhEsA128Kw,
    /// ECDH-ES using Concat KDF and CEK wrapped with A192KW
    #[serde(rename = "ECDH-ES+A192KW")]
    EcdhEsA192Kw,
    /// ECDH-ES using Concat KDF and CEK wrapped with A256KW
    #[serde(rename = "ECDH-ES+A256KW")]
    EcdhEsA256Kw,
    /// PBES2 with HMAC SHA-256 and A128KW wrapping
    #[serde(rename = "PBES2-HS256+A128KW")]
    Pbes2Hs256A128Kw,
    /// PBES2 with HMAC SHA-384 and A192KW wrapping
    #[serde(rename = "PBES2-HS384+A192KW")]
    Pbes2Hs384A192Kw,
    /// PBES2 with HMAC SHA-512 and A256KW wrapping
    #[serde(rename = "PBES2-HS512+A256KW")]
    Pbes2Hs512A256Kw,
}

impl KeyManagementAlgorithm {
    /// All key management algorithms
    pub const ALL: [KeyManagementAlgorithm; 17] = [
        KeyManagementAlgorithm::Rsa1_5,
        KeyManagementAlgorithm::RsaOaep,
        KeyManagementAlgorithm::RsaOaep256,
        KeyManagementAlgorithm::A128Kw,
        KeyManagementAlgorithm::A192Kw,
        KeyManagementAlgorithm::A256Kw,
        KeyManagementAlgorithm::A128GcmKw,
        KeyManagementAlgorithm::A192GcmKw,
        KeyManagementAlgorithm::A256GcmKw,
        KeyManagementAlgorithm::Dir,
        KeyManagementAlgorithm::EcdhEs,
        KeyManagementAlgorithm::EcdhEsA128Kw,
        KeyManagementAlgorithm::EcdhEsA192Kw,
        KeyManagementAlgorithm::EcdhEsA256Kw,
        KeyManagementAlgorithm::Pbes2Hs256A128Kw,
        KeyManagementAlgorithm::Pbes2Hs384A192Kw,
        KeyManagementAlgorithm::Pbes2Hs512A256Kw,
    ];

    /// Returns the algorithm identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyManagementAlgorithm::Rsa1_5 => "RSA1_5",
            KeyManagementAlgorithm::RsaOaep => "RSA-OAEP",
            KeyManagementAlgorithm::RsaOaep256 => "RSA-OAEP-256",
            KeyManagementAlgorithm::A128Kw => "A128KW",
            KeyManagementAlgorithm::A192Kw => "A192KW",
            KeyManagementAlgorithm::A256Kw => "A256KW",
            KeyManagementAlgorithm::A128GcmKw => "A128GCMKW",
            KeyManagementAlgorithm::A192GcmKw => "A192GCMKW",
            KeyManagementAlgorithm::A256GcmKw => "A256GCMKW",
            KeyManagementAlgorithm::Dir => "dir",
            KeyManagementAlgorithm::EcdhEs => "ECDH-ES",
            KeyManagementAlgorithm::EcdhEsA128Kw => "ECDH-ES+A128KW",
            KeyManagementAlgorithm::EcdhEsA192Kw => "ECDH-ES+A192KW",
            KeyManagementAlgorithm::EcdhEsA256Kw => "ECDH-ES+A256KW",
            KeyManagementAlgorithm::Pbes2Hs256A128Kw => "PBES2-HS256+A128KW",
            KeyManagementAlgorithm::Pbes2Hs384A192Kw => "PBES2-HS384+A192KW",
            KeyManagementAlgorithm::Pbes2Hs512A256Kw => "PBES2-HS512+A256KW",
        }
    }

    /// Hash driving PBKDF2 for the PBES2 algorithms
    pub fn pbes2_hash(&self) -> Option<HashAlgorithm> {
        match self {
            KeyManagementAlgorithm::Pbes2Hs256A128Kw => Some(HashAlgorithm::Sha256),
            KeyManagementAlgorithm::Pbes2Hs384A192Kw => Some(HashAlgorithm::Sha384),
            KeyManagementAlgorithm::Pbes2Hs512A256Kw => Some(HashAlgorithm::Sha512),
            _ => None,
        }
    }

    /// Size of the AES key-wrapping key used by this algorithm, if it wraps
    pub fn key_wrap_size(&self) -> Option<usize> {
        match self {
            KeyManagementAlgorithm::A128GcmKw => Some(16),
            KeyManagementAlgorithm::A192GcmKw => Some(24),
            KeyManagementAlgorithm::A256GcmKw => Some(32),
            KeyManagementAlgorithm::A128Kw
            | KeyManagementAlgorithm::EcdhEsA128Kw
            | KeyManagementAlgorithm::Pbes2Hs256A128Kw => Some(16),
            KeyManagementAlgorithm::A192Kw
            | KeyManagementAlgorithm::EcdhEsA192Kw
            | KeyManagementAlgorithm::Pbes2Hs384A192Kw => Some(24),
            KeyManagementAlgorithm::A256Kw
            | KeyManagementAlgorithm::EcdhEsA256Kw
            | KeyManagementAlgorithm::Pbes2Hs512A256Kw => Some(32),
            _ => None,
        }
    }
}

impl FromStr for KeyManagementAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        KeyManagementAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
    }
}

/// JWS signature algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JwsAlgorithm {
    /// HMAC using SHA-256
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 using SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 using SHA-512
    RS512,
    /// RSASSA-PSS using SHA-256 and MGF1 with SHA-256
    PS256,
    /// RSASSA-PSS using SHA-384 and MGF1 with SHA-384
    PS384,
    /// RSASSA-PSS using SHA-512 and MGF1 with SHA-512
    PS512,
    /// ECDSA using P-256 and SHA-256
    ES256,
    /// ECDSA using P-384 and SHA-384
    ES384,
    /// ECDSA using P-521 and SHA-512
    ES512,
    /// Ed25519 signatures
    EdDSA,
}

impl JwsAlgorithm {
    /// All signature algorithms
    pub const ALL: [JwsAlgorithm; 13] = [
        JwsAlgorithm::HS256,
        JwsAlgorithm::HS384,
        JwsAlgorithm::HS512,
        JwsAlgorithm::RS256,
        JwsAlgorithm::RS384,
        JwsAlgorithm::RS512,
        JwsAlgorithm::PS256,
        JwsAlgorithm::PS384,
        JwsAlgorithm::PS512,
        JwsAlgorithm::ES256,
        JwsAlgorithm::ES384,
        JwsAlgorithm::ES512,
        JwsAlgorithm::EdDSA,
    ];

    /// Returns the algorithm identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            JwsAlgorithm::HS256 => "HS256",
            JwsAlgorithm::HS384 => "HS384",
            JwsAlgorithm::HS512 => "HS512",
            JwsAlgorithm::RS256 => "RS256",
            JwsAlgorithm::RS384 => "RS384",
            JwsAlgorithm::RS512 => "RS512",
            JwsAlgorithm::PS256 => "PS256",
            JwsAlgorithm::PS384 => "PS384",
            JwsAlgorithm::PS512 => "PS512",
            JwsAlgorithm::ES256 => "ES256",
            JwsAlgorithm::ES384 => "ES384",
            JwsAlgorithm::ES512 => "ES512",
            JwsAlgorithm::EdDSA => "EdDSA",
        }
    }

    /// Hash used by the algorithm; `None` for EdDSA, which fixes its own
    pub fn hash(&self) -> Option<HashAlgorithm> {
        match self {
            JwsAlgorithm::HS256 | JwsAlgorithm::RS256 | JwsAlgorithm::PS256 => {
                Some(HashAlgorithm::Sha256)
            }
            JwsAlgorithm::HS384 | JwsAlgorithm::RS384 | JwsAlgorithm::PS384 => {
                Some(HashAlgorithm::Sha384)
            }
            JwsAlgorithm::HS512 | JwsAlgorithm::RS512 | JwsAlgorithm::PS512 => {
                Some(HashAlgorithm::Sha512)
            }
            JwsAlgorithm::ES256 | JwsAlgorithm::ES384 | JwsAlgorithm::ES512 => {
                self.curve().map(|curve| curve.hash())
            }
            JwsAlgorithm::EdDSA => None,
        }
    }

    /// Curve required by the ECDSA algorithms
    pub fn curve(&self) -> Option<Curve> {
        match self {
            JwsAlgorithm::ES256 => Some(Curve::P256),
            JwsAlgorithm::ES384 => Some(Curve::P384),
            JwsAlgorithm::ES512 => Some(Curve::P521),
            _ => None,
        }
    }
}

impl FromStr for JwsAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        JwsAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
    }
}

/// How the output of a key agreement is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAgreementMode {
    /// The derived key is the CEK (`alg` = `ECDH-ES`)
    Direct,
    /// The derived key wraps a CEK (`alg` = `ECDH-ES+AxxxKW`)
    KeyWrap,
}

/// Expected output of an ECDH-ES key agreement.
///
/// The identifier is fed into the Concat KDF as `AlgorithmID`: the `enc`
/// value in direct mode, the key-wrap `alg` value in key-wrap mode. Only the
/// constants below exist; the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyAgreementTarget {
    id: &'static str,
    size: usize,
    mode: KeyAgreementMode,
}

impl KeyAgreementTarget {
    /// Direct agreement producing an A128CBC-HS256 key
    pub const A128CBC: Self = Self::direct(ContentEncryption::A128CbcHs256);
    /// Direct agreement producing an A192CBC-HS384 key
    pub const A192CBC: Self = Self::direct(ContentEncryption::A192CbcHs384);
    /// Direct agreement producing an A256CBC-HS512 key
    pub const A256CBC: Self = Self::direct(ContentEncryption::A256CbcHs512);
    /// Direct agreement producing an A128GCM key
    pub const A128GCM: Self = Self::direct(ContentEncryption::A128Gcm);
    /// Direct agreement producing an A192GCM key
    pub const A192GCM: Self = Self::direct(ContentEncryption::A192Gcm);
    /// Direct agreement producing an A256GCM key
    pub const A256GCM: Self = Self::direct(ContentEncryption::A256Gcm);
    /// Agreement producing an A128KW wrapping key
    pub const A128KW: Self = Self::key_wrap("A128KW", 16);
    /// Agreement producing an A192KW wrapping key
    pub const A192KW: Self = Self::key_wrap("A192KW", 24);
    /// Agreement producing an A256KW wrapping key
    pub const A256KW: Self = Self::key_wrap("A256KW", 32);

    /// Every target
    pub const ALL: [KeyAgreementTarget; 9] = [
        Self::A128CBC,
        Self::A192CBC,
        Self::A256CBC,
        Self::A128GCM,
        Self::A192GCM,
        Self::A256GCM,
        Self::A128KW,
        Self::A192KW,
        Self::A256KW,
    ];

    const fn direct(enc: ContentEncryption) -> Self {
        let (id, size) = match enc {
            ContentEncryption::A128CbcHs256 => ("A128CBC-HS256", 32),
            ContentEncryption::A192CbcHs384 => ("A192CBC-HS384", 48),
            ContentEncryption::A256CbcHs512 => ("A256CBC-HS512", 64),
            ContentEncryption::A128Gcm => ("A128GCM", 16),
            ContentEncryption::A192Gcm => ("A192GCM", 24),
            ContentEncryption::A256Gcm => ("A256GCM", 32),
        };
        Self {
            id,
            size,
            mode: KeyAgreementMode::Direct,
        }
    }

    const fn key_wrap(id: &'static str, size: usize) -> Self {
        Self {
            id,
            size,
            mode: KeyAgreementMode::KeyWrap,
        }
    }

    /// Target for `alg` = `ECDH-ES` with the given `enc`
    pub fn for_content_encryption(enc: ContentEncryption) -> Self {
        Self::direct(enc)
    }

    /// Target for the `ECDH-ES+AxxxKW` algorithms
    pub fn for_key_management(alg: KeyManagementAlgorithm) -> Result<Self> {
        match alg {
            KeyManagementAlgorithm::EcdhEsA128Kw => Ok(Self::A128KW),
            KeyManagementAlgorithm::EcdhEsA192Kw => Ok(Self::A192KW),
            KeyManagementAlgorithm::EcdhEsA256Kw => Ok(Self::A256KW),
            other => Err(Error::UnsupportedAlgorithm(format!(
                "{} is not an ECDH-ES key wrapping algorithm",
                other
            ))),
        }
    }

    /// AlgorithmID fed into the KDF
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Derived key size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Direct or key-wrap
    pub fn mode(&self) -> KeyAgreementMode {
        self.mode
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display!(
    HashAlgorithm,
    Curve,
    ContentEncryption,
    KeyManagementAlgorithm,
    JwsAlgorithm
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_round_trip_through_from_str() {
        for enc in ContentEncryption::ALL {
            assert_eq!(enc.as_str().parse::<ContentEncryption>().unwrap(), enc);
        }
        for alg in KeyManagementAlgorithm::ALL {
            assert_eq!(alg.as_str().parse::<KeyManagementAlgorithm>().unwrap(), alg);
        }
        for alg in JwsAlgorithm::ALL {
            assert_eq!(alg.as_str().parse::<JwsAlgorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn test_serde_uses_registered_names() {
        let json = serde_json::to_string(&ContentEncryption::A256CbcHs512).unwrap();
        assert_eq!(json, "\"A256CBC-HS512\"");

        let alg: KeyManagementAlgorithm = serde_json::from_str("\"ECDH-ES+A128KW\"").unwrap();
        assert_eq!(alg, KeyManagementAlgorithm::EcdhEsA128Kw);

        let crv: Curve = serde_json::from_str("\"P-521\"").unwrap();
        assert_eq!(crv, Curve::P521);
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        assert!(matches!(
            "secp256k1".parse::<Curve>(),
            Err(Error::UnsupportedCurve(_))
        ));
        assert!(matches!(
            "SHA3-384".parse::<HashAlgorithm>(),
            Err(Error::UnsupportedHash(_))
        ));
        assert!(matches!(
            "none".parse::<JwsAlgorithm>(),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_cbc_key_split_adds_up() {
        for enc in ContentEncryption::ALL.into_iter().filter(|e| !e.is_gcm()) {
            // MAC key and encryption key are each half of the CEK
            assert_eq!(enc.key_size() / 2 + enc.key_size() / 2, enc.key_size());
            assert_eq!(enc.tag_size(), enc.key_size() / 2);
            assert_eq!(enc.iv_size(), 16);
        }
        for enc in ContentEncryption::ALL.into_iter().filter(|e| e.is_gcm()) {
            assert_eq!(enc.tag_size(), 16);
            assert_eq!(enc.iv_size(), 12);
        }
    }

    #[test]
    fn test_key_agreement_targets() {
        assert_eq!(KeyAgreementTarget::A128CBC.id(), "A128CBC-HS256");
        assert_eq!(KeyAgreementTarget::A128CBC.size(), 32);
        assert_eq!(KeyAgreementTarget::A256GCM.size(), 32);
        assert_eq!(KeyAgreementTarget::A192KW.mode(), KeyAgreementMode::KeyWrap);
        assert_eq!(
            KeyAgreementTarget::for_content_encryption(ContentEncryption::A192Gcm),
            KeyAgreementTarget::A192GCM
        );
        assert_eq!(
            KeyAgreementTarget::for_key_management(KeyManagementAlgorithm::EcdhEsA256Kw).unwrap(),
            KeyAgreementTarget::A256KW
        );
        assert!(KeyAgreementTarget::for_key_management(KeyManagementAlgorithm::EcdhEs).is_err());

        for target in KeyAgreementTarget::ALL {
            if target.mode() == KeyAgreementMode::Direct {
                let enc: ContentEncryption = target.id().parse().unwrap();
                assert_eq!(enc.key_size(), target.size());
            }
        }
    }

    #[test]
    fn test_jws_hash_and_curve() {
        assert_eq!(JwsAlgorithm::ES512.hash(), Some(HashAlgorithm::Sha512));
        assert_eq!(JwsAlgorithm::ES384.curve(), Some(Curve::P384));
        assert_eq!(JwsAlgorithm::PS384.hash(), Some(HashAlgorithm::Sha384));
        assert_eq!(JwsAlgorithm::EdDSA.hash(), None);
        assert_eq!(Curve::P521.coordinate_size(), 66);
    }
}
