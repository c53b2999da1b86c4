//! Cryptographic primitives for JOSE Core
//!
//! This module provides the building blocks shared by the JWE and JWS
//! algorithm families:
//! - PKCS#7 padding
//! - Key Wrap per RFC 3394, generic over a 128-bit block cipher
//! - Concat KDF per NIST SP 800-56A
//! - Digest and HMAC dispatch over [`crate::jwa::HashAlgorithm`]

pub mod hash;
pub mod kdf;
pub mod key_wrap;
pub mod padding;

pub use kdf::{concat_kdf, concat_kdf_sha256, length_prefixed, OtherInfo};
pub use key_wrap::{unwrap, wrap};
pub use padding::{pad, unpad};
