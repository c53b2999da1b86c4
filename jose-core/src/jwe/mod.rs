//! JSON Web Encryption algorithms
//!
//! Key management produces or recovers a content encryption key; content
//! encryption then seals or opens the payload with it:
//!
//! - [`keyenc`]: RSA key encryption and PBES2 password-based wrapping
//! - [`keywrap`]: AES-KW and AES-GCM key wrapping
//! - [`keyagr`]: ECDH-ES over P-256/P-384/P-521 and X25519
//! - [`enc`]: AES-CBC-HMAC-SHA2 and AES-GCM content encryption

pub mod enc;
pub mod keyagr;
pub mod keyenc;
pub mod keywrap;
