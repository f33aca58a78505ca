//! PKCS5 padding for the 8-byte DES block size.
//!
//! Padding always adds between 1 and 8 bytes, each equal to the pad
//! length, so even already-aligned input grows by a full block. Unpad
//! validates the full pad run and rejects anything malformed — a
//! corruption or tamper signal on the CBC path.

use super::BLOCK_SIZE;
use crate::error::CryptoError;

/// Pads `data` to the next multiple of 8 bytes.
pub fn pkcs5_pad(data: &[u8]) -> Vec<u8> {
    let pad = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, pad as u8);
    out
}

/// Strips and validates PKCS5 padding.
///
/// # Errors
/// Returns [`CryptoError::PaddingValidationFailure`] if the input is
/// empty, the final byte is outside `1..=8`, the pad run is longer than
/// the input, or any trailing pad byte differs from the pad length.
pub fn pkcs5_unpad(data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.is_empty() {
        return Err(CryptoError::PaddingValidationFailure);
    }
    let pad = data[data.len() - 1] as usize;
    if pad == 0 || pad > BLOCK_SIZE || pad > data.len() {
        return Err(CryptoError::PaddingValidationFailure);
    }
    let boundary = data.len() - pad;
    if data[boundary..].iter().any(|&byte| byte as usize != pad) {
        return Err(CryptoError::PaddingValidationFailure);
    }
    Ok(data[..boundary].to_vec())
}
