//! Cipher Block Chaining over Triple-DES.
//!
//! `C_i = E(P_i ⊕ C_{i-1})` with `C_0 = IV`. Inputs must already be
//! block-aligned; padding is the caller's concern (see
//! [`padding`](super::padding)).

use super::{TripleDes, BLOCK_SIZE};
use crate::error::CryptoError;

/// Encrypts block-aligned `plaintext` in CBC mode.
///
/// # Errors
/// Returns [`CryptoError::InvalidBlockLength`] if `plaintext` is not a
/// multiple of 8 bytes.
pub fn encrypt(
    cipher: &TripleDes,
    iv: &[u8; BLOCK_SIZE],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if plaintext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidBlockLength {
            expected: BLOCK_SIZE,
            got: plaintext.len(),
        });
    }
    let mut out = Vec::with_capacity(plaintext.len());
    let mut previous = *iv;
    for chunk in plaintext.chunks(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        for (i, byte) in block.iter_mut().enumerate() {
            *byte = chunk[i] ^ previous[i];
        }
        let encrypted = cipher.encrypt_block(&block);
        out.extend_from_slice(&encrypted);
        previous = encrypted;
    }
    Ok(out)
}

/// Decrypts block-aligned `ciphertext` in CBC mode:
/// `P_i = D(C_i) ⊕ C_{i-1}`.
///
/// # Errors
/// Returns [`CryptoError::InvalidBlockLength`] if `ciphertext` is not a
/// multiple of 8 bytes.
pub fn decrypt(
    cipher: &TripleDes,
    iv: &[u8; BLOCK_SIZE],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidBlockLength {
            expected: BLOCK_SIZE,
            got: ciphertext.len(),
        });
    }
    let mut out = Vec::with_capacity(ciphertext.len());
    let mut previous = *iv;
    for chunk in ciphertext.chunks(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        let decrypted = cipher.decrypt_block(&block);
        for (i, &byte) in decrypted.iter().enumerate() {
            out.push(byte ^ previous[i]);
        }
        previous = block;
    }
    Ok(out)
}
