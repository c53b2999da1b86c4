//! AES_CBC_HMAC_SHA2 composite authenticated encryption (RFC 7518 Section 5.2)
//!
//! The CEK is split in half: the leading bytes are the MAC key, the trailing
//! bytes the AES key. The tag is the truncated
//! `HMAC(MAC_KEY, AAD ‖ IV ‖ E ‖ AL)`.

use crate::crypto::hash::{hmac, verify_hmac};
use crate::crypto::padding::{pad, unpad};
use crate::error::{Error, Result};
use crate::jwa::{ContentEncryption, HashAlgorithm};
use crate::keys::{AeadOutput, SymmetricKeySet};
use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use tracing::{debug, warn};

const BLOCK_SIZE: usize = 16;

/// Parameters selected by the CEK size
struct Params {
    enc: ContentEncryption,
    hash: HashAlgorithm,
    /// Length of each key half, which is also the tag length
    half: usize,
}

impl Params {
    fn for_key(cek: &[u8]) -> Result<Self> {
        let enc = ContentEncryption::from_cbc_key_size(cek.len())?;
        let hash = match enc {
            ContentEncryption::A128CbcHs256 => HashAlgorithm::Sha256,
            ContentEncryption::A192CbcHs384 => HashAlgorithm::Sha384,
            _ => HashAlgorithm::Sha512,
        };
        Ok(Self {
            enc,
            hash,
            half: cek.len() / 2,
        })
    }
}

/// Encrypt and authenticate `plaintext`
///
/// # Arguments
/// * `keys` - 32, 48 or 64 byte CEK and a 16 byte IV
/// * `plaintext` - Payload to encrypt
/// * `aad` - Additional authenticated data
///
/// # Returns
/// The ciphertext and a tag of half the CEK length
pub fn encrypt(keys: &SymmetricKeySet, plaintext: &[u8], aad: &[u8]) -> Result<AeadOutput> {
    let params = Params::for_key(&keys.cek)?;
    check_iv(&keys.iv)?;
    debug!(enc = %params.enc, plaintext_len = plaintext.len(), "Encrypting content");

    let (mac_key, enc_key) = keys.cek.split_at(params.half);

    let padded = pad(plaintext, BLOCK_SIZE);
    let ciphertext = match params.enc {
        ContentEncryption::A128CbcHs256 => cbc_encrypt::<Aes128>(enc_key, &keys.iv, &padded)?,
        ContentEncryption::A192CbcHs384 => cbc_encrypt::<Aes192>(enc_key, &keys.iv, &padded)?,
        _ => cbc_encrypt::<Aes256>(enc_key, &keys.iv, &padded)?,
    };

    let al = aad_bit_length(aad);
    let mut tag = hmac(params.hash, mac_key, &[aad, &keys.iv, &ciphertext, &al])?;
    tag.truncate(params.half);

    Ok(AeadOutput { ciphertext, tag })
}

/// Verify the tag and, only if it matches, decrypt `ciphertext`
///
/// # Security
/// The tag is recomputed and compared in constant time before the cipher
/// runs. A mismatch fails with [`Error::InvalidCiphertext`] without
/// decrypting anything, so padding errors are never observable on
/// unauthenticated input.
pub fn decrypt(
    keys: &SymmetricKeySet,
    ciphertext: &[u8],
    tag: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let params = Params::for_key(&keys.cek)?;
    check_iv(&keys.iv)?;
    debug!(enc = %params.enc, ciphertext_len = ciphertext.len(), "Decrypting content");

    let (mac_key, enc_key) = keys.cek.split_at(params.half);

    let al = aad_bit_length(aad);
    let authentic = tag.len() == params.half
        && verify_hmac(params.hash, mac_key, &[aad, &keys.iv, ciphertext, &al], tag)?;
    if !authentic {
        warn!(enc = %params.enc, "Authentication tag mismatch");
        return Err(Error::InvalidCiphertext);
    }

    let padded = match params.enc {
        ContentEncryption::A128CbcHs256 => cbc_decrypt::<Aes128>(enc_key, &keys.iv, ciphertext)?,
        ContentEncryption::A192CbcHs384 => cbc_decrypt::<Aes192>(enc_key, &keys.iv, ciphertext)?,
        _ => cbc_decrypt::<Aes256>(enc_key, &keys.iv, ciphertext)?,
    };
    unpad(padded)
}

/// AAD length in bits as a 64-bit big-endian integer
fn aad_bit_length(aad: &[u8]) -> [u8; 8] {
    ((aad.len() as u64) * 8).to_be_bytes()
}

fn check_iv(iv: &[u8]) -> Result<()> {
    if iv.len() != BLOCK_SIZE {
        return Err(Error::InvalidIvLength {
            expected: BLOCK_SIZE,
            actual: iv.len(),
        });
    }
    Ok(())
}

fn cbc_encrypt<C>(key: &[u8], iv: &[u8], padded: &[u8]) -> Result<Vec<u8>>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let cipher = cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|e| Error::Cipher(format!("Failed to create AES-CBC cipher: {}", e)))?;
    Ok(cipher.encrypt_padded_vec_mut::<NoPadding>(padded))
}

fn cbc_decrypt<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidPadding);
    }
    let cipher = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|e| Error::Cipher(format!("Failed to create AES-CBC cipher: {}", e)))?;
    cipher
        .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
        .map_err(|_| Error::InvalidPadding)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 7518 Appendix B.1
    fn rfc7518_b1() -> (SymmetricKeySet, Vec<u8>, Vec<u8>) {
        let cek: Vec<u8> = (0x00..=0x1f).collect();
        let iv = hex::decode("1af38c2dc2b96ffdd86694092341bc04").unwrap();
        let plaintext = b"A cipher system must not be required to be secret, and it must be able to fall into the hands of the enemy without inconvenience".to_vec();
        let aad = hex::decode(
            "546865207365636f6e64207072696e6369706c65206f66204175677573746520\
             4b6572636b686f666673",
        )
        .unwrap();
        (SymmetricKeySet::new(cek, iv), plaintext, aad)
    }

    #[test]
    fn test_rfc7518_a128cbc_hs256() {
        let (keys, plaintext, aad) = rfc7518_b1();
        let out = encrypt(&keys, &plaintext, &aad).unwrap();

        assert_eq!(
            hex::encode(&out.ciphertext),
            "c80edfa32ddf39d5ef00c0b468834279a2e46a1b8049f792f76bfe54b903a9c9\
             a94ac9b47ad2655c5f10f9aef71427e2fc6f9b3f399a221489f16362c7032336\
             09d45ac69864e3321cf82935ac4096c86e133314c54019e8ca7980dfa4b9cf1b\
             384c486f3a54c51078158ee5d79de59fbd34d848b3d69550a67646344427ade5\
             4b8851ffb598f7f80074b9473c82e2db"
        );
        assert_eq!(hex::encode(&out.tag), "652c3fa36b0a7c5b3219fab3a30bc1c4");

        let decrypted = decrypt(&keys, &out.ciphertext, &out.tag, &aad).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_key_split_puts_mac_key_first() {
        let (keys, plaintext, aad) = rfc7518_b1();
        let out = encrypt(&keys, &plaintext, &aad).unwrap();

        // swapping the halves must break authentication
        let mut swapped = keys.cek[16..].to_vec();
        swapped.extend_from_slice(&keys.cek[..16]);
        let swapped = SymmetricKeySet::new(swapped, keys.iv.clone());
        assert!(matches!(
            decrypt(&swapped, &out.ciphertext, &out.tag, &aad),
            Err(Error::InvalidCiphertext)
        ));
    }

    #[test]
    fn test_unsupported_key_size() {
        let keys = SymmetricKeySet::new(vec![0u8; 40], vec![0u8; 16]);
        assert!(matches!(
            encrypt(&keys, b"data", b""),
            Err(Error::UnsupportedKeySize(40))
        ));
    }

    #[test]
    fn test_wrong_iv_length() {
        let keys = SymmetricKeySet::new(vec![0u8; 32], vec![0u8; 12]);
        assert!(matches!(
            encrypt(&keys, b"data", b""),
            Err(Error::InvalidIvLength {
                expected: 16,
                actual: 12
            })
        ));
    }

    #[test]
    fn test_truncated_tag_rejected() {
        let keys = SymmetricKeySet::generate(ContentEncryption::A256CbcHs512);
        let out = encrypt(&keys, b"data", b"aad").unwrap();
        assert!(matches!(
            decrypt(&keys, &out.ciphertext, &out.tag[..16], b"aad"),
            Err(Error::InvalidCiphertext)
        ));
    }
}
