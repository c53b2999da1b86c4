//! Error handling for JOSE Core
//!
//! This module provides the error type shared by every algorithm family.
//! Variants are grouped the way callers need to react to them: configuration
//! mistakes, verification failures, malformed encodings and failures reported
//! by the underlying cryptographic backends.

use thiserror::Error;

/// Type alias for Results with JOSE Core errors
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for JOSE Core
#[derive(Error, Debug)]
pub enum Error {
    // ---------------------------------------------------------------------
    // Configuration errors
    // ---------------------------------------------------------------------
    /// The key length does not select any variant of the requested algorithm
    #[error("Unsupported key size: {0} bytes")]
    UnsupportedKeySize(usize),

    /// The hash function cannot be used with the requested algorithm
    #[error("Unsupported hash: {0}")]
    UnsupportedHash(String),

    /// The hash function is not available for signing or MAC computation
    #[error("Hash unavailable: {0}")]
    HashUnavailable(String),

    /// The elliptic curve is not one of P-256, P-384 or P-521
    #[error("Unsupported curve: {0}")]
    UnsupportedCurve(String),

    /// Unknown algorithm identifier
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The requested key derivation output is larger than the KDF accepts
    #[error("Key data length too large: {0} bytes")]
    KeyDataTooLarge(usize),

    /// The IV does not have the size required by the content encryption
    #[error("Invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIvLength {
        /// Size required by the algorithm
        expected: usize,
        /// Size that was supplied
        actual: usize,
    },

    /// Key wrap input is not a sequence of 64-bit blocks
    #[error("Invalid key wrap input: {0}")]
    InvalidKeyWrapInput(String),

    /// The key does not belong to the family required by the algorithm
    #[error("Invalid key type: {0}")]
    InvalidKeyType(String),

    /// Elliptic-curve keys live on different curves
    #[error("Key mismatch: keys are not on the same curve")]
    KeyMismatch,

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-side policy from [`crate::config::JoseConfig`] was not met
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    // ---------------------------------------------------------------------
    // Verification failures
    // ---------------------------------------------------------------------
    /// The CBC-HMAC authentication tag did not match
    #[error("Invalid ciphertext")]
    InvalidCiphertext,

    /// AES-GCM authentication failed
    #[error("Decryption failed")]
    DecryptionFailed,

    /// The key-wrap integrity value did not match after unwrapping
    #[error("Integrity check failed")]
    IntegrityCheckFailed,

    /// Signature or MAC did not verify
    #[error("Invalid signature")]
    InvalidSignature,

    // ---------------------------------------------------------------------
    // Encoding errors
    // ---------------------------------------------------------------------
    /// Base64url decoding failed
    #[error("Decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Key material could not be parsed
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Signature bytes have the wrong shape (empty or wrong width)
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    /// Padding could not be removed
    #[error("Invalid padding")]
    InvalidPadding,

    /// JSON configuration could not be parsed
    #[error("Serde JSON error: {0}")]
    SerdeError(#[from] serde_json::Error),

    // ---------------------------------------------------------------------
    // Underlying library failures
    // ---------------------------------------------------------------------
    /// RSA key encryption failed
    #[error("Key encryption failed: {0}")]
    KeyEncryptionFailed(String),

    /// RSA key decryption failed
    #[error("Key decryption failed: {0}")]
    KeyDecryptionFailed(String),

    /// Shared secret computation failed
    #[error("Key agreement failed: {0}")]
    KeyAgreement(String),

    /// Signature generation failed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Cipher construction or operation failed
    #[error("Cipher error: {0}")]
    Cipher(String),
}

impl Error {
    /// Returns true for the expected, security-relevant outcomes: a tag,
    /// signature or key-wrap integrity check that did not pass.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            Error::InvalidCiphertext
                | Error::DecryptionFailed
                | Error::IntegrityCheckFailed
                | Error::InvalidSignature
        )
    }
}
