//! ChaCha20-Poly1305 authenticated encryption per RFC 8439.
//!
//! Combines the ChaCha20 keystream with a Poly1305 tag keyed from
//! keystream block 0: the one-time MAC key is the first 32 bytes of
//! `chacha20::block(key, 0, nonce)`, the payload is encrypted with
//! blocks from counter 1 onward, and the tag covers
//! `AAD ‖ pad ‖ ciphertext ‖ pad ‖ lengths`.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::chacha20;
use crate::error::CryptoError;
use crate::poly1305;

/// Key size in bytes (shared with ChaCha20).
pub const KEY_SIZE: usize = chacha20::KEY_SIZE;

/// Nonce size in bytes.
pub const NONCE_SIZE: usize = chacha20::NONCE_SIZE;

/// Authentication tag size in bytes.
pub const TAG_SIZE: usize = poly1305::TAG_SIZE;

/// Derives the one-time Poly1305 key from keystream block 0.
fn one_time_key(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE]) -> [u8; poly1305::KEY_SIZE] {
    let mut block = chacha20::block(key, 0, nonce);
    let mut otk = [0u8; poly1305::KEY_SIZE];
    otk.copy_from_slice(&block[..poly1305::KEY_SIZE]);
    block.zeroize();
    otk
}

/// Assembles the authenticated input:
/// `AAD ‖ zero-pad16 ‖ ciphertext ‖ zero-pad16 ‖ len(AAD) ‖ len(CT)`,
/// lengths as 64-bit little-endian values.
fn mac_data(aad: &[u8], ciphertext: &[u8]) -> Vec<u8> {
    let pad = |len: usize| (16 - len % 16) % 16;
    let mut data =
        Vec::with_capacity(aad.len() + pad(aad.len()) + ciphertext.len() + pad(ciphertext.len()) + 16);
    data.extend_from_slice(aad);
    data.extend_from_slice(&[0u8; 16][..pad(aad.len())]);
    data.extend_from_slice(ciphertext);
    data.extend_from_slice(&[0u8; 16][..pad(ciphertext.len())]);
    data.extend_from_slice(&(aad.len() as u64).to_le_bytes());
    data.extend_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    data
}

/// Encrypts `plaintext` and authenticates it together with `aad`.
///
/// # Returns
/// The ciphertext (same length as the plaintext) and the 16-byte tag.
pub fn encrypt(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    aad: &[u8],
    plaintext: &[u8],
) -> (Vec<u8>, [u8; TAG_SIZE]) {
    let mut otk = one_time_key(key, nonce);
    let ciphertext = chacha20::apply_keystream(key, 1, nonce, plaintext);
    let tag = poly1305::mac(&otk, &mac_data(aad, &ciphertext));
    otk.zeroize();
    (ciphertext, tag)
}

/// Verifies the tag and decrypts `ciphertext`.
///
/// The tag is recomputed over the ciphertext and compared in constant
/// time before any keystream is applied, so no tampered plaintext ever
/// exists.
///
/// # Errors
/// Returns [`CryptoError::AuthenticationFailure`] if the tag does not
/// match.
pub fn decrypt(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8; TAG_SIZE],
) -> Result<Vec<u8>, CryptoError> {
    let mut otk = one_time_key(key, nonce);
    let expected = poly1305::mac(&otk, &mac_data(aad, ciphertext));
    otk.zeroize();
    if !bool::from(expected.ct_eq(tag)) {
        return Err(CryptoError::AuthenticationFailure);
    }
    Ok(chacha20::apply_keystream(key, 1, nonce, ciphertext))
}
