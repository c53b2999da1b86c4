//! JOSE algorithm suite
//!
//! This crate provides the cryptographic algorithms behind JSON Web
//! Encryption and JSON Web Signature (RFC 7516, RFC 7515, RFC 7518). It works
//! on raw bytes: building or parsing JOSE headers and compact/JSON
//! serializations is left to the caller.
//!
//! The building blocks are:
//!
//! - [`crypto`]: PKCS#7 padding, AES key wrap (RFC 3394) and ConcatKDF
//! - [`jwe`]: content encryption, key encryption, key wrapping and
//!   ECDH-ES key agreement
//! - [`jws`]: HMAC, RSA, ECDSA and Ed25519 signatures
//! - [`jwa`]: the algorithm identifiers that select between them
//!
//! Every fallible operation returns [`Result`]. Authentication failures
//! (a bad tag, signature or key-wrap integrity value) are reported without
//! detail and can be recognised with [`Error::is_verification_failure`].

/// Caller-side policy
pub mod config;

/// Low-level primitives
pub mod crypto;

/// Base64url helpers
pub mod encoding;

/// Error types
pub mod error;

/// Algorithm identifiers
pub mod jwa;

/// JSON Web Encryption algorithms
pub mod jwe;

/// JSON Web Signature algorithms
pub mod jws;

/// Key material
pub mod keys;

// Re-export key types for convenience
pub use config::JoseConfig;
pub use error::{Error, Result};
pub use jwa::{
    ContentEncryption, Curve, HashAlgorithm, JwsAlgorithm, KeyAgreementMode, KeyAgreementTarget,
    KeyManagementAlgorithm,
};
pub use keys::{AeadOutput, EcPrivateKey, EcPublicKey, SecretBytes, SymmetricKeySet};

/// Version of JOSE Core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
