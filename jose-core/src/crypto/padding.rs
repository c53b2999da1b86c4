//! PKCS#7 padding
//!
//! `unpad` does not check that the padding bytes are consistent. It must only
//! run on data that has already been authenticated, otherwise it becomes a
//! padding oracle.

use crate::error::{Error, Result};

/// Appends `p` bytes of value `p`, where `p = block_size - len % block_size`.
///
/// Block-aligned input gets a whole extra block of padding, so `p` is never 0.
pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    debug_assert!(block_size > 0 && block_size <= 255);
    let padding = block_size - data.len() % block_size;
    let mut out = Vec::with_capacity(data.len() + padding);
    out.extend_from_slice(data);
    out.resize(data.len() + padding, padding as u8);
    out
}

/// Strips the padding count stored in the last byte.
///
/// A zero count or a count larger than the input is rejected with
/// [`Error::InvalidPadding`].
pub fn unpad(mut data: Vec<u8>) -> Result<Vec<u8>> {
    let count = *data.last().ok_or(Error::InvalidPadding)? as usize;
    if count == 0 || count > data.len() {
        return Err(Error::InvalidPadding);
    }
    data.truncate(data.len() - count);
    Ok(data)
}
