//! Concat KDF (NIST SP 800-56A, Section 5.8.1)
//!
//! Used by ECDH-ES (RFC 7518 Section 4.6) to turn a raw shared secret `Z`
//! into a content encryption key or a key-wrapping key.

use crate::error::{Error, Result};
use crate::keys::SecretBytes;
use sha2::Digest;
use zeroize::Zeroizing;

/// Largest output `concat_kdf_sha256` will produce, in bytes
pub const MAX_KEY_DATA_LEN: usize = 0x0FFF_FFFF;

/// The OtherInfo fields, already encoded as they go into the hash input.
///
/// `algorithm_id`, `party_u_info` and `party_v_info` are normally
/// [`length_prefixed`]; `supp_pub_info` is the output length in bits as a
/// 4-byte big-endian integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OtherInfo<'a> {
    /// AlgorithmID
    pub algorithm_id: &'a [u8],
    /// PartyUInfo (`apu`)
    pub party_u_info: &'a [u8],
    /// PartyVInfo (`apv`)
    pub party_v_info: &'a [u8],
    /// SuppPubInfo
    pub supp_pub_info: &'a [u8],
    /// SuppPrivInfo, empty for JOSE
    pub supp_priv_info: &'a [u8],
}

/// Prefixes `data` with its length as a 4-byte big-endian integer.
///
/// Empty input still contributes the four zero bytes.
pub fn length_prefixed(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + data.len());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(data);
    out
}

/// Derive `key_data_len` bytes from the shared secret `z`
///
/// # Arguments
/// * `z` - The raw shared secret
/// * `info` - Encoded OtherInfo fields
/// * `key_data_len` - Output length in bytes
///
/// # Returns
/// `H(1 ‖ Z ‖ OtherInfo) ‖ H(2 ‖ Z ‖ OtherInfo) ‖ …` truncated to
/// `key_data_len` bytes
pub fn concat_kdf<D: Digest>(z: &[u8], info: &OtherInfo<'_>, key_data_len: usize) -> SecretBytes {
    let hash_len = <D as Digest>::output_size();
    let reps = key_data_len.div_ceil(hash_len);
    let mut derived = Zeroizing::new(Vec::with_capacity(reps * hash_len));

    for counter in 1..=reps as u32 {
        let mut hasher = D::new();
        // counter as 4-byte big-endian
        hasher.update(counter.to_be_bytes());
        hasher.update(z);
        hasher.update(info.algorithm_id);
        hasher.update(info.party_u_info);
        hasher.update(info.party_v_info);
        hasher.update(info.supp_pub_info);
        hasher.update(info.supp_priv_info);
        derived.extend_from_slice(&hasher.finalize());
    }

    derived.truncate(key_data_len);
    derived
}

/// Concat KDF with SHA-256 and JOSE OtherInfo encoding
///
/// Length-prefixes `algorithm_id`, `apu` and `apv`, and appends the
/// output length in bits as SuppPubInfo. Lengths above
/// [`MAX_KEY_DATA_LEN`] fail with [`Error::KeyDataTooLarge`].
pub fn concat_kdf_sha256(
    z: &[u8],
    algorithm_id: &[u8],
    apu: &[u8],
    apv: &[u8],
    key_data_len: usize,
) -> Result<SecretBytes> {
    if key_data_len > MAX_KEY_DATA_LEN {
        return Err(Error::KeyDataTooLarge(key_data_len));
    }

    let algorithm_id = length_prefixed(algorithm_id);
    let party_u_info = length_prefixed(apu);
    let party_v_info = length_prefixed(apv);
    let supp_pub_info = ((key_data_len * 8) as u32).to_be_bytes();

    let info = OtherInfo {
        algorithm_id: &algorithm_id,
        party_u_info: &party_u_info,
        party_v_info: &party_v_info,
        supp_pub_info: &supp_pub_info,
        supp_priv_info: &[],
    };
    Ok(concat_kdf::<sha2::Sha256>(z, &info, key_data_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Sha256, Sha512};

    const Z: [u8; 32] = [
        158, 86, 217, 29, 129, 113, 53, 211, 114, 131, 66, 131, 191, 132, 38, 156, 251, 49, 110,
        163, 218, 128, 106, 72, 246, 218, 167, 121, 140, 254, 144, 196,
    ];

    #[test]
    fn test_rfc7518_appendix_c() {
        let key = concat_kdf_sha256(&Z, b"A128GCM", b"Alice", b"Bob", 16).unwrap();
        assert_eq!(
            &key[..],
            &[86, 170, 141, 234, 248, 35, 109, 32, 92, 34, 40, 205, 113, 167, 16, 26]
        );
    }

    #[test]
    fn test_oversized_output_rejected() {
        assert!(matches!(
            concat_kdf_sha256(&Z, b"A128GCM", b"", b"", MAX_KEY_DATA_LEN + 1),
            Err(Error::KeyDataTooLarge(_))
        ));
    }

    #[test]
    fn test_length_prefixed() {
        assert_eq!(length_prefixed(b""), vec![0, 0, 0, 0]);
        assert_eq!(length_prefixed(b"Bob"), vec![0, 0, 0, 3, b'B', b'o', b'b']);
    }

    #[test]
    fn test_multi_round_output() {
        let info = OtherInfo::default();
        let long = concat_kdf::<Sha256>(&Z, &info, 64);
        assert_eq!(long.len(), 64);

        // first round is a prefix of longer outputs
        let short = concat_kdf::<Sha256>(&Z, &info, 32);
        assert_eq!(&long[..32], &short[..]);
        // the counter advances, so the rounds differ
        assert_ne!(&long[..32], &long[32..]);
    }

    #[test]
    fn test_hash_is_pluggable() {
        let info = OtherInfo::default();
        let sha256 = concat_kdf::<Sha256>(&Z, &info, 16);
        let sha512 = concat_kdf::<Sha512>(&Z, &info, 16);
        assert_ne!(sha256, sha512);
    }

    #[test]
    fn test_kdf_deterministic() {
        let k1 = concat_kdf_sha256(&Z, b"A256KW", b"a", b"b", 32).unwrap();
        let k2 = concat_kdf_sha256(&Z, b"A256KW", b"a", b"b", 32).unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_kdf_different_inputs() {
        let k1 = concat_kdf_sha256(&Z, b"A256KW", b"a", b"b", 32).unwrap();
        let k2 = concat_kdf_sha256(&Z, b"A256KW", b"a", b"c", 32).unwrap();
        let k3 = concat_kdf_sha256(&Z, b"A192KW", b"a", b"b", 32).unwrap();
        assert_ne!(k1, k2);
        assert_ne!(k1, k3);
    }
}
