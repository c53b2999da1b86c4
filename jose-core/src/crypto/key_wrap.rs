//! Key Wrap per RFC 3394 / NIST SP 800-38F
//!
//! The construction is generic over any block cipher with a 128-bit block;
//! the AES-KW key management adapter picks AES-128/192/256 from the size of
//! the key-wrapping key.

use crate::error::{Error, Result};
use crate::keys::SecretBytes;
use aes::cipher::consts::U16;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, BlockSizeUser};
use subtle::ConstantTimeEq;
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

/// Default initial value from RFC 3394 Section 2.2.3.1
pub const DEFAULT_IV: [u8; 8] = [0xA6; 8];

const SEMIBLOCK: usize = 8;

/// Wrap a key (RFC 3394 Section 2.2.1)
///
/// # Arguments
/// * `cipher` - Block cipher keyed with the key-wrapping key
/// * `cek` - The key to wrap, a non-empty multiple of 8 bytes
///
/// # Returns
/// `IV_final ‖ R[0] ‖ … ‖ R[n-1]`, always 8 bytes longer than the input
pub fn wrap<C>(cipher: &C, cek: &[u8]) -> Result<Vec<u8>>
where
    C: BlockEncrypt + BlockSizeUser<BlockSize = U16>,
{
    if cek.is_empty() || cek.len() % SEMIBLOCK != 0 {
        return Err(Error::InvalidKeyWrapInput(format!(
            "key to wrap must be a non-empty multiple of 8 bytes, got {}",
            cek.len()
        )));
    }

    let n = cek.len() / SEMIBLOCK;
    let mut registers = Zeroizing::new(cek.to_vec());
    let mut a = DEFAULT_IV;
    let mut block = GenericArray::<u8, U16>::default();

    // 6n rounds; the counter runs across all registers and is never reset
    for t in 0..6 * n {
        let r = &mut registers[(t % n) * SEMIBLOCK..(t % n + 1) * SEMIBLOCK];
        block[..SEMIBLOCK].copy_from_slice(&a);
        block[SEMIBLOCK..].copy_from_slice(r);
        cipher.encrypt_block(&mut block);

        a.copy_from_slice(&block[..SEMIBLOCK]);
        xor_counter(&mut a, (t + 1) as u64);
        r.copy_from_slice(&block[SEMIBLOCK..]);
    }
    block.as_mut_slice().zeroize();

    let mut out = Vec::with_capacity(cek.len() + SEMIBLOCK);
    out.extend_from_slice(&a);
    out.extend_from_slice(&registers);
    Ok(out)
}

/// Unwrap a key (RFC 3394 Section 2.2.2)
///
/// # Arguments
/// * `cipher` - Block cipher keyed with the key-wrapping key
/// * `ciphertext` - Wrapped key, at least 16 bytes and a multiple of 8
///
/// # Returns
/// The unwrapped key
///
/// # Security
/// The recovered IV is compared with [`DEFAULT_IV`] in constant time. A
/// mismatch (wrong key or tampered input) fails with
/// [`Error::IntegrityCheckFailed`] and no key bytes are returned.
pub fn unwrap<C>(cipher: &C, ciphertext: &[u8]) -> Result<SecretBytes>
where
    C: BlockDecrypt + BlockSizeUser<BlockSize = U16>,
{
    if ciphertext.len() < 2 * SEMIBLOCK || ciphertext.len() % SEMIBLOCK != 0 {
        return Err(Error::InvalidKeyWrapInput(format!(
            "wrapped key must be a multiple of 8 bytes and at least 16, got {}",
            ciphertext.len()
        )));
    }

    let n = ciphertext.len() / SEMIBLOCK - 1;
    let mut a = [0u8; SEMIBLOCK];
    a.copy_from_slice(&ciphertext[..SEMIBLOCK]);
    let mut registers = Zeroizing::new(ciphertext[SEMIBLOCK..].to_vec());
    let mut block = GenericArray::<u8, U16>::default();

    for t in (0..6 * n).rev() {
        let r = &mut registers[(t % n) * SEMIBLOCK..(t % n + 1) * SEMIBLOCK];
        xor_counter(&mut a, (t + 1) as u64);
        block[..SEMIBLOCK].copy_from_slice(&a);
        block[SEMIBLOCK..].copy_from_slice(r);
        cipher.decrypt_block(&mut block);

        a.copy_from_slice(&block[..SEMIBLOCK]);
        r.copy_from_slice(&block[SEMIBLOCK..]);
    }
    block.as_mut_slice().zeroize();

    if !bool::from(a[..].ct_eq(&DEFAULT_IV[..])) {
        warn!("Key unwrap integrity check failed");
        return Err(Error::IntegrityCheckFailed);
    }

    Ok(registers)
}

fn xor_counter(a: &mut [u8; SEMIBLOCK], t: u64) {
    for (byte, counter) in a.iter_mut().zip(t.to_be_bytes()) {
        *byte ^= counter;
    }
}
