//! Rijndael (AES) block cipher per FIPS 197.
//!
//! Implements the 10/12/14-round substitution-permutation network over a
//! 16-byte state held in column-major order: byte `i` of a block sits at
//! row `i % 4`, column `i / 4`. The S-box and its inverse are derived at
//! compile time from the GF(2^8) multiplicative inverse followed by the
//! affine transform, so the tables are fixed data by the time any cipher
//! code runs.

pub mod gcm;

use zeroize::Zeroize;

use crate::error::CryptoError;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

// ──────── GF(2^8) arithmetic and table generation ────────

/// Multiplies two elements of GF(2^8) modulo the AES polynomial
/// x^8 + x^4 + x^3 + x + 1 (0x11B).
const fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut p: u8 = 0;
    let mut i = 0;
    while i < 8 {
        if b & 1 != 0 {
            p ^= a;
        }
        let carry = a & 0x80;
        a <<= 1;
        if carry != 0 {
            a ^= 0x1B;
        }
        b >>= 1;
        i += 1;
    }
    p
}

/// Multiplicative inverse in GF(2^8); inv(0) is defined as 0.
///
/// a^(-1) = a^254, computed by square-and-multiply.
const fn gf_inv(a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let a2 = gf_mul(a, a);
    let a4 = gf_mul(a2, a2);
    let a8 = gf_mul(a4, a4);
    let a16 = gf_mul(a8, a8);
    let a32 = gf_mul(a16, a16);
    let a64 = gf_mul(a32, a32);
    let a128 = gf_mul(a64, a64);
    // 254 = 128 + 64 + 32 + 16 + 8 + 4 + 2
    let mut t = gf_mul(a128, a64);
    t = gf_mul(t, a32);
    t = gf_mul(t, a16);
    t = gf_mul(t, a8);
    t = gf_mul(t, a4);
    gf_mul(t, a2)
}

/// The S-box affine transform: bit matrix multiply in GF(2) plus 0x63.
const fn affine(x: u8) -> u8 {
    x ^ x.rotate_left(1) ^ x.rotate_left(2) ^ x.rotate_left(3) ^ x.rotate_left(4) ^ 0x63
}

const fn make_sbox() -> [u8; 256] {
    let mut sbox = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        sbox[i] = affine(gf_inv(i as u8));
        i += 1;
    }
    sbox
}

const fn make_inv_sbox(sbox: &[u8; 256]) -> [u8; 256] {
    let mut inv = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inv[sbox[i] as usize] = i as u8;
        i += 1;
    }
    inv
}

/// SubBytes lookup table.
const SBOX: [u8; 256] = make_sbox();

/// InvSubBytes lookup table.
const INV_SBOX: [u8; 256] = make_inv_sbox(&SBOX);

/// Key-schedule round constants: successive doublings of 1 in GF(2^8).
const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1B, 0x36];

// ──────── Key schedule ────────

/// Expanded AES key: `rounds + 1` 16-byte round keys.
///
/// Round keys are key material; they are wiped on drop.
pub struct RoundKeys {
    keys: Vec<[u8; BLOCK_SIZE]>,
}

impl RoundKeys {
    /// Number of cipher rounds this schedule drives (10, 12 or 14).
    pub fn rounds(&self) -> usize {
        self.keys.len() - 1
    }

    fn key(&self, round: usize) -> &[u8; BLOCK_SIZE] {
        &self.keys[round]
    }
}

impl Drop for RoundKeys {
    fn drop(&mut self) {
        self.keys.zeroize();
    }
}

impl core::fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RoundKeys")
            .field("rounds", &self.rounds())
            .field("keys", &"[REDACTED]")
            .finish()
    }
}

/// Expands `key` into the per-round key schedule for an AES variant with
/// `rounds` rounds (10, 12 or 14).
///
/// Applies the Rijndael key schedule: each new 32-bit word is the XOR of
/// the word `Nk` positions back with the previous word, rotated and
/// substituted through the S-box plus a round constant every `Nk` words
/// (with the extra SubWord step for 256-bit keys).
///
/// # Errors
/// Returns [`CryptoError::InvalidKeyLength`] if `key` is not the
/// `4 * (rounds - 6)` bytes the round count requires.
pub fn expand_key(key: &[u8], rounds: usize) -> Result<RoundKeys, CryptoError> {
    let nk = rounds.saturating_sub(6);
    if !matches!(nk, 4 | 6 | 8) || key.len() != 4 * nk {
        return Err(CryptoError::InvalidKeyLength {
            expected: 4 * nk,
            got: key.len(),
        });
    }

    let total_words = 4 * (rounds + 1);
    let mut words = vec![0u32; total_words];
    for (i, word) in words.iter_mut().take(nk).enumerate() {
        *word = u32::from_be_bytes([key[4 * i], key[4 * i + 1], key[4 * i + 2], key[4 * i + 3]]);
    }
    for i in nk..total_words {
        let mut temp = words[i - 1];
        if i % nk == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ ((RCON[i / nk - 1] as u32) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        words[i] = words[i - nk] ^ temp;
    }

    let mut keys = Vec::with_capacity(rounds + 1);
    for round in 0..=rounds {
        let mut rk = [0u8; BLOCK_SIZE];
        for col in 0..4 {
            rk[4 * col..4 * col + 4].copy_from_slice(&words[4 * round + col].to_be_bytes());
        }
        keys.push(rk);
    }
    words.zeroize();
    Ok(RoundKeys { keys })
}

/// Applies the S-box to each byte of a key-schedule word.
fn sub_word(word: u32) -> u32 {
    let [a, b, c, d] = word.to_be_bytes();
    u32::from_be_bytes([
        SBOX[a as usize],
        SBOX[b as usize],
        SBOX[c as usize],
        SBOX[d as usize],
    ])
}

// ──────── Block transforms ────────

fn add_round_key(state: &mut [u8; BLOCK_SIZE], round_key: &[u8; BLOCK_SIZE]) {
    for (s, k) in state.iter_mut().zip(round_key.iter()) {
        *s ^= k;
    }
}

fn sub_bytes(state: &mut [u8; BLOCK_SIZE]) {
    for byte in state.iter_mut() {
        *byte = SBOX[*byte as usize];
    }
}

fn inv_sub_bytes(state: &mut [u8; BLOCK_SIZE]) {
    for byte in state.iter_mut() {
        *byte = INV_SBOX[*byte as usize];
    }
}

/// Rotates row `r` of the state left by `r` positions.
fn shift_rows(state: &mut [u8; BLOCK_SIZE]) {
    let t = state[1];
    state[1] = state[5];
    state[5] = state[9];
    state[9] = state[13];
    state[13] = t;

    state.swap(2, 10);
    state.swap(6, 14);

    let t = state[15];
    state[15] = state[11];
    state[11] = state[7];
    state[7] = state[3];
    state[3] = t;
}

fn inv_shift_rows(state: &mut [u8; BLOCK_SIZE]) {
    let t = state[13];
    state[13] = state[9];
    state[9] = state[5];
    state[5] = state[1];
    state[1] = t;

    state.swap(2, 10);
    state.swap(6, 14);

    let t = state[3];
    state[3] = state[7];
    state[7] = state[11];
    state[11] = state[15];
    state[15] = t;
}

/// Multiplies each state column by {03}x^3 + {01}x^2 + {01}x + {02}
/// in GF(2^8)[x]/(x^4 + 1).
fn mix_columns(state: &mut [u8; BLOCK_SIZE]) {
    for col in 0..4 {
        let i = 4 * col;
        let (a0, a1, a2, a3) = (state[i], state[i + 1], state[i + 2], state[i + 3]);
        state[i] = gf_mul(a0, 2) ^ gf_mul(a1, 3) ^ a2 ^ a3;
        state[i + 1] = a0 ^ gf_mul(a1, 2) ^ gf_mul(a2, 3) ^ a3;
        state[i + 2] = a0 ^ a1 ^ gf_mul(a2, 2) ^ gf_mul(a3, 3);
        state[i + 3] = gf_mul(a0, 3) ^ a1 ^ a2 ^ gf_mul(a3, 2);
    }
}

fn inv_mix_columns(state: &mut [u8; BLOCK_SIZE]) {
    for col in 0..4 {
        let i = 4 * col;
        let (a0, a1, a2, a3) = (state[i], state[i + 1], state[i + 2], state[i + 3]);
        state[i] = gf_mul(a0, 0x0E) ^ gf_mul(a1, 0x0B) ^ gf_mul(a2, 0x0D) ^ gf_mul(a3, 0x09);
        state[i + 1] = gf_mul(a0, 0x09) ^ gf_mul(a1, 0x0E) ^ gf_mul(a2, 0x0B) ^ gf_mul(a3, 0x0D);
        state[i + 2] = gf_mul(a0, 0x0D) ^ gf_mul(a1, 0x09) ^ gf_mul(a2, 0x0E) ^ gf_mul(a3, 0x0B);
        state[i + 3] = gf_mul(a0, 0x0B) ^ gf_mul(a1, 0x0D) ^ gf_mul(a2, 0x09) ^ gf_mul(a3, 0x0E);
    }
}

/// Encrypts one 16-byte block in place.
///
/// AddRoundKey, then `rounds - 1` full rounds of SubBytes/ShiftRows/
/// MixColumns/AddRoundKey, then a final round without MixColumns.
pub fn encrypt_block(block: &mut [u8; BLOCK_SIZE], round_keys: &RoundKeys) {
    let rounds = round_keys.rounds();
    add_round_key(block, round_keys.key(0));
    for round in 1..rounds {
        sub_bytes(block);
        shift_rows(block);
        mix_columns(block);
        add_round_key(block, round_keys.key(round));
    }
    sub_bytes(block);
    shift_rows(block);
    add_round_key(block, round_keys.key(rounds));
}

/// Decrypts one 16-byte block in place (the inverse cipher).
pub fn decrypt_block(block: &mut [u8; BLOCK_SIZE], round_keys: &RoundKeys) {
    let rounds = round_keys.rounds();
    add_round_key(block, round_keys.key(rounds));
    for round in (1..rounds).rev() {
        inv_shift_rows(block);
        inv_sub_bytes(block);
        add_round_key(block, round_keys.key(round));
        inv_mix_columns(block);
    }
    inv_shift_rows(block);
    inv_sub_bytes(block);
    add_round_key(block, round_keys.key(0));
}
