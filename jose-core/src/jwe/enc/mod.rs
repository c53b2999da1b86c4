//! JWE content encryption
//!
//! Both families take a [`SymmetricKeySet`] and return an [`AeadOutput`].
//! The free functions in [`aes_cbc_hmac`] and [`aes_gcm`] select the key size
//! variant from the CEK length; [`ContentEncryption::encrypt`] additionally
//! checks that the CEK matches the declared `enc` algorithm.

pub mod aes_cbc_hmac;
pub mod aes_gcm;

use crate::error::{Error, Result};
use crate::jwa::ContentEncryption;
use crate::keys::{AeadOutput, SymmetricKeySet};

impl ContentEncryption {
    /// Encrypts `plaintext` under this algorithm
    pub fn encrypt(
        &self,
        keys: &SymmetricKeySet,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<AeadOutput> {
        self.check_cek(keys)?;
        if self.is_gcm() {
            aes_gcm::encrypt(keys, plaintext, aad)
        } else {
            aes_cbc_hmac::encrypt(keys, plaintext, aad)
        }
    }

    /// Authenticates and decrypts `ciphertext` under this algorithm
    pub fn decrypt(
        &self,
        keys: &SymmetricKeySet,
        ciphertext: &[u8],
        tag: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>> {
        self.check_cek(keys)?;
        if self.is_gcm() {
            aes_gcm::decrypt(keys, ciphertext, tag, aad)
        } else {
            aes_cbc_hmac::decrypt(keys, ciphertext, tag, aad)
        }
    }

    fn check_cek(&self, keys: &SymmetricKeySet) -> Result<()> {
        if keys.cek.len() != self.key_size() {
            return Err(Error::UnsupportedKeySize(keys.cek.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cek_must_match_declared_algorithm() {
        // 32 bytes is a valid A256GCM key but not an A128GCM one
        let keys = SymmetricKeySet::generate(ContentEncryption::A256Gcm);
        assert!(matches!(
            ContentEncryption::A128Gcm.encrypt(&keys, b"data", b""),
            Err(Error::UnsupportedKeySize(32))
        ));

        // and it would select A128CBC-HS256 if handed to the CBC family
        let cbc_keys = SymmetricKeySet::new(keys.cek.to_vec(), vec![0u8; 16]);
        assert!(ContentEncryption::A128CbcHs256
            .encrypt(&cbc_keys, b"data", b"")
            .is_ok());
    }

    #[test]
    fn test_round_trip_every_variant() {
        for enc in ContentEncryption::ALL {
            let keys = SymmetricKeySet::generate(enc);
            let out = enc.encrypt(&keys, b"payload", b"aad").unwrap();
            assert_eq!(out.tag.len(), enc.tag_size());
            assert_eq!(
                enc.decrypt(&keys, &out.ciphertext, &out.tag, b"aad").unwrap(),
                b"payload"
            );
        }
    }
}
