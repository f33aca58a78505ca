//! Galois/Counter Mode over the AES block cipher, per NIST SP 800-38D.
//!
//! CTR-mode encryption combined with a GHASH-based authentication tag.
//! Only 96-bit IVs are supported: for that size the pre-counter block is
//! simply `IV ‖ 0x00000001`, with data counters starting at 2.

use subtle::ConstantTimeEq;

use super::{encrypt_block, RoundKeys, BLOCK_SIZE};
use crate::error::CryptoError;

/// GCM IV size in bytes (96 bits).
pub const IV_SIZE: usize = 12;

/// Authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// The reduction polynomial of GF(2^128): x^128 + x^7 + x^2 + x + 1,
/// in the reflected bit order GHASH uses.
const R: u128 = 0xE1 << 120;

/// Multiplies two elements of GF(2^128) (blocks interpreted big-endian,
/// bit 0 = most significant).
fn gf128_mul(x: u128, y: u128) -> u128 {
    let mut z: u128 = 0;
    let mut v = x;
    for i in (0..128).rev() {
        if (y >> i) & 1 == 1 {
            z ^= v;
        }
        let lsb = v & 1;
        v >>= 1;
        if lsb == 1 {
            v ^= R;
        }
    }
    z
}

/// Loads a partial or full 16-byte chunk as a zero-padded block.
fn be_block(chunk: &[u8]) -> u128 {
    let mut block = [0u8; BLOCK_SIZE];
    block[..chunk.len()].copy_from_slice(chunk);
    u128::from_be_bytes(block)
}

/// GHASH over `aad` and `ciphertext`, each zero-padded to a 16-byte
/// multiple, followed by their bit lengths as two 64-bit values.
fn ghash(h: u128, aad: &[u8], ciphertext: &[u8]) -> u128 {
    let mut y: u128 = 0;
    for chunk in aad.chunks(BLOCK_SIZE) {
        y = gf128_mul(y ^ be_block(chunk), h);
    }
    for chunk in ciphertext.chunks(BLOCK_SIZE) {
        y = gf128_mul(y ^ be_block(chunk), h);
    }
    let lengths = ((aad.len() as u128 * 8) << 64) | (ciphertext.len() as u128 * 8);
    gf128_mul(y ^ lengths, h)
}

/// Builds the counter block `IV ‖ counter` for a 96-bit IV.
fn counter_block(iv: &[u8; IV_SIZE], counter: u32) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    block[..IV_SIZE].copy_from_slice(iv);
    block[IV_SIZE..].copy_from_slice(&counter.to_be_bytes());
    block
}

/// CTR-mode keystream XOR starting at `counter`.
fn ctr_crypt(round_keys: &RoundKeys, iv: &[u8; IV_SIZE], mut counter: u32, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks(BLOCK_SIZE) {
        let mut keystream = counter_block(iv, counter);
        encrypt_block(&mut keystream, round_keys);
        for (i, &byte) in chunk.iter().enumerate() {
            out.push(byte ^ keystream[i]);
        }
        counter = counter.wrapping_add(1);
    }
    out
}

/// Computes the authentication tag: `GHASH ⊕ E_K(J0)` with `J0 = IV ‖ 1`.
fn compute_tag(
    round_keys: &RoundKeys,
    h: u128,
    iv: &[u8; IV_SIZE],
    aad: &[u8],
    ciphertext: &[u8],
) -> [u8; TAG_SIZE] {
    let digest = ghash(h, aad, ciphertext);
    let mut j0 = counter_block(iv, 1);
    encrypt_block(&mut j0, round_keys);
    (digest ^ u128::from_be_bytes(j0)).to_be_bytes()
}

/// The hash subkey `H = E_K(0^128)`.
fn hash_subkey(round_keys: &RoundKeys) -> u128 {
    let mut block = [0u8; BLOCK_SIZE];
    encrypt_block(&mut block, round_keys);
    u128::from_be_bytes(block)
}

/// Encrypts `plaintext` and authenticates it together with `aad`.
///
/// # Returns
/// The ciphertext (same length as the plaintext) and the 16-byte tag.
pub fn encrypt(
    round_keys: &RoundKeys,
    iv: &[u8; IV_SIZE],
    aad: &[u8],
    plaintext: &[u8],
) -> (Vec<u8>, [u8; TAG_SIZE]) {
    let h = hash_subkey(round_keys);
    let ciphertext = ctr_crypt(round_keys, iv, 2, plaintext);
    let tag = compute_tag(round_keys, h, iv, aad, &ciphertext);
    (ciphertext, tag)
}

/// Verifies the tag and decrypts `ciphertext`.
///
/// The expected tag is recomputed from the ciphertext and compared in
/// constant time before any plaintext is produced; on mismatch no
/// partial plaintext exists to leak.
///
/// # Errors
/// Returns [`CryptoError::AuthenticationFailure`] if the tag does not
/// match.
pub fn decrypt(
    round_keys: &RoundKeys,
    iv: &[u8; IV_SIZE],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8; TAG_SIZE],
) -> Result<Vec<u8>, CryptoError> {
    let h = hash_subkey(round_keys);
    let expected = compute_tag(round_keys, h, iv, aad, ciphertext);
    if !bool::from(expected.ct_eq(tag)) {
        return Err(CryptoError::AuthenticationFailure);
    }
    Ok(ctr_crypt(round_keys, iv, 2, ciphertext))
}
