//! RSA signatures: RSASSA-PKCS1-v1_5 (`RS*`) and RSASSA-PSS (`PS*`)
//!
//! Both sign a digest of the message computed with the algorithm's hash.
//! PSS signatures are produced with a salt as long as the hash output; on
//! verification the salt length is recovered from the encoded message, so
//! signatures from producers using other salt lengths still verify.

use super::ensure_not_empty;
use crate::crypto::hash;
use crate::error::{Error, Result};
use crate::jwa::HashAlgorithm;
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Pkcs1v15Sign, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};
use tracing::{debug, warn};

fn pkcs1v15(hash: HashAlgorithm) -> Result<Pkcs1v15Sign> {
    match hash {
        HashAlgorithm::Sha256 => Ok(Pkcs1v15Sign::new::<Sha256>()),
        HashAlgorithm::Sha384 => Ok(Pkcs1v15Sign::new::<Sha384>()),
        HashAlgorithm::Sha512 => Ok(Pkcs1v15Sign::new::<Sha512>()),
        HashAlgorithm::Sha1 => Err(Error::HashUnavailable(hash.to_string())),
    }
}

fn pss(hash: HashAlgorithm, salt_len: usize) -> Result<Pss> {
    match hash {
        HashAlgorithm::Sha256 => Ok(Pss::new_with_salt::<Sha256>(salt_len)),
        HashAlgorithm::Sha384 => Ok(Pss::new_with_salt::<Sha384>(salt_len)),
        HashAlgorithm::Sha512 => Ok(Pss::new_with_salt::<Sha512>(salt_len)),
        HashAlgorithm::Sha1 => Err(Error::HashUnavailable(hash.to_string())),
    }
}

/// Sign with RSASSA-PKCS1-v1_5
pub fn sign_pkcs1v15(
    hash: HashAlgorithm,
    private: &RsaPrivateKey,
    message: &[u8],
) -> Result<Vec<u8>> {
    let scheme = pkcs1v15(hash)?;
    debug!(hash = %hash, "Signing with RSASSA-PKCS1-v1_5");
    let digest = hash::digest(hash, message);
    private
        .sign_with_rng(&mut OsRng, scheme, &digest)
        .map_err(|e| Error::Signing(e.to_string()))
}

/// Verify an RSASSA-PKCS1-v1_5 signature
pub fn verify_pkcs1v15(
    hash: HashAlgorithm,
    public: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    let scheme = pkcs1v15(hash)?;
    ensure_not_empty(signature)?;
    let digest = hash::digest(hash, message);
    public.verify(scheme, &digest, signature).map_err(|_| {
        warn!(hash = %hash, "RSASSA-PKCS1-v1_5 signature mismatch");
        Error::InvalidSignature
    })
}

/// Sign with RSASSA-PSS, salt length equal to the hash output length
pub fn sign_pss(hash: HashAlgorithm, private: &RsaPrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    let scheme = pss(hash, hash.output_size())?;
    debug!(hash = %hash, "Signing with RSASSA-PSS");
    let digest = hash::digest(hash, message);
    private
        .sign_with_rng(&mut OsRng, scheme, &digest)
        .map_err(|e| Error::Signing(e.to_string()))
}

/// Verify an RSASSA-PSS signature with any salt length
pub fn verify_pss(
    hash: HashAlgorithm,
    public: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    // rejects SHA-1 before touching the signature
    pss(hash, 0)?;
    ensure_not_empty(signature)?;

    let mismatch = || {
        warn!(hash = %hash, "RSASSA-PSS signature mismatch");
        Error::InvalidSignature
    };

    let salt_len = recover_pss_salt_len(hash, public, signature).ok_or_else(mismatch)?;
    let digest = hash::digest(hash, message);
    public
        .verify(pss(hash, salt_len)?, &digest, signature)
        .map_err(|_| mismatch())
}

/// Opens the signature with the public exponent and reads the salt length
/// out of the EMSA-PSS encoding (RFC 8017 Section 9.1.2).
fn recover_pss_salt_len(
    hash: HashAlgorithm,
    public: &RsaPublicKey,
    signature: &[u8],
) -> Option<usize> {
    let n = public.n();
    let s = BigUint::from_bytes_be(signature);
    if &s >= n {
        return None;
    }

    let em_bits = n.bits() - 1;
    let em_len = em_bits.div_ceil(8);
    let h_len = hash.output_size();
    if em_len < h_len + 2 {
        return None;
    }

    let m = s.modpow(public.e(), n).to_bytes_be();
    if m.len() > em_len {
        return None;
    }
    let mut em = vec![0u8; em_len - m.len()];
    em.extend_from_slice(&m);

    if em[em_len - 1] != 0xbc {
        return None;
    }

    let (db, rest) = em.split_at_mut(em_len - h_len - 1);
    let h = &rest[..h_len];

    // bits above em_bits must be clear
    let top_mask = 0xffu8 >> (8 * em_len - em_bits);
    if db[0] & !top_mask != 0 {
        return None;
    }

    mgf1_xor(hash, h, db);
    db[0] &= top_mask;

    let separator = db.iter().position(|&b| b != 0)?;
    if db[separator] != 0x01 {
        return None;
    }
    Some(db.len() - separator - 1)
}

/// XORs `MGF1(seed)` into `out`
fn mgf1_xor(hash: HashAlgorithm, seed: &[u8], out: &mut [u8]) {
    let mut input = Vec::with_capacity(seed.len() + 4);
    for (counter, chunk) in out.chunks_mut(hash.output_size()).enumerate() {
        input.clear();
        input.extend_from_slice(seed);
        input.extend_from_slice(&(counter as u32).to_be_bytes());
        for (byte, mask) in chunk.iter_mut().zip(hash::digest(hash, &input)) {
            *byte ^= mask;
        }
    }
}
