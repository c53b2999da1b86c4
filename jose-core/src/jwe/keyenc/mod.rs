//! JWE key encryption: RSA and PBES2

pub mod pbes2;
pub mod rsa;
