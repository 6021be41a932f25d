//! Hex and address parsing helpers.
//!
//! Inputs tolerate an optional `0x`/`0X` prefix. Decoding failures map onto
//! the crate error enum so callers can distinguish malformed input from
//! internal failures.

use alloy_primitives::Address;

use crate::{Error, Result};

/// Strip an optional `0x`/`0X` prefix.
fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

/// Decode a hex string into bytes, rejecting output longer than `max_len`.
pub fn hex_to_bytes(s: &str, max_len: usize) -> Result<Vec<u8>> {
    let bytes = hex::decode(strip_prefix(s))?;
    if bytes.len() > max_len {
        return Err(Error::BufferTooSmall {
            actual: bytes.len(),
            max: max_len,
        });
    }
    Ok(bytes)
}

/// Decode a hex string into an exact-length byte array.
pub fn hex_to_fixed<const N: usize>(s: &str) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    hex::decode_to_slice(strip_prefix(s), &mut out)?;
    Ok(out)
}

/// Encode bytes as lowercase hex, optionally `0x`-prefixed.
pub fn bytes_to_hex(bytes: &[u8], with_prefix: bool) -> String {
    let body = hex::encode(bytes);
    if with_prefix {
        format!("0x{body}")
    } else {
        body
    }
}

/// Parse a 20-byte address from a hex string.
pub fn parse_address(s: &str) -> Result<Address> {
    let bytes = hex::decode(strip_prefix(s))?;
    if bytes.len() != Address::len_bytes() {
        return Err(Error::InvalidAddress(bytes.len()));
    }
    Ok(Address::from_slice(&bytes))
}
