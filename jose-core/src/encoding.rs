//! Base64url boundary helpers
//!
//! JOSE carries every binary value (signatures, IVs, tags, `apu`/`apv`) as
//! unpadded base64url text. The algorithm functions only ever see decoded
//! bytes; these helpers are the conversion at the edge.

use crate::error::Result;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encodes bytes as unpadded base64url
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes unpadded base64url text.
///
/// Malformed input surfaces as [`crate::Error::Decode`].
pub fn decode_segment(text: &str) -> Result<Vec<u8>> {
    Ok(URL_SAFE_NO_PAD.decode(text.as_bytes())?)
}
