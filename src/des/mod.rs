//! DES and Triple-DES block ciphers per FIPS 46-3.
//!
//! A 16-round Feistel network over 64-bit blocks. All permutations are
//! table-driven with the standard 1-indexed bit positions (bit 1 is the
//! most significant bit of the register, as the standard numbers them).
//! Triple-DES composes the single cipher as encrypt-decrypt-encrypt with
//! one, two or three independent sub-keys.

pub mod cbc;
pub mod padding;

use zeroize::Zeroize;

use crate::error::CryptoError;

/// DES block size in bytes.
pub const BLOCK_SIZE: usize = 8;

/// Number of Feistel rounds.
pub const NUM_ROUNDS: usize = 16;

/// Initial permutation.
const IP: [u8; 64] = [
    58, 50, 42, 34, 26, 18, 10, 2, 60, 52, 44, 36, 28, 20, 12, 4, //
    62, 54, 46, 38, 30, 22, 14, 6, 64, 56, 48, 40, 32, 24, 16, 8, //
    57, 49, 41, 33, 25, 17, 9, 1, 59, 51, 43, 35, 27, 19, 11, 3, //
    61, 53, 45, 37, 29, 21, 13, 5, 63, 55, 47, 39, 31, 23, 15, 7,
];

/// Final permutation (inverse of IP).
const FP: [u8; 64] = [
    40, 8, 48, 16, 56, 24, 64, 32, 39, 7, 47, 15, 55, 23, 63, 31, //
    38, 6, 46, 14, 54, 22, 62, 30, 37, 5, 45, 13, 53, 21, 61, 29, //
    36, 4, 44, 12, 52, 20, 60, 28, 35, 3, 43, 11, 51, 19, 59, 27, //
    34, 2, 42, 10, 50, 18, 58, 26, 33, 1, 41, 9, 49, 17, 57, 25,
];

/// Expansion of the 32-bit half into 48 bits.
const E: [u8; 48] = [
    32, 1, 2, 3, 4, 5, 4, 5, 6, 7, 8, 9, //
    8, 9, 10, 11, 12, 13, 12, 13, 14, 15, 16, 17, //
    16, 17, 18, 19, 20, 21, 20, 21, 22, 23, 24, 25, //
    24, 25, 26, 27, 28, 29, 28, 29, 30, 31, 32, 1,
];

/// Permutation applied after S-box substitution.
const P: [u8; 32] = [
    16, 7, 20, 21, 29, 12, 28, 17, 1, 15, 23, 26, 5, 18, 31, 10, //
    2, 8, 24, 14, 32, 27, 3, 9, 19, 13, 30, 6, 22, 11, 4, 25,
];

/// Permuted choice 1: selects 56 key bits, dropping parity bits.
const PC1: [u8; 56] = [
    57, 49, 41, 33, 25, 17, 9, 1, 58, 50, 42, 34, 26, 18, //
    10, 2, 59, 51, 43, 35, 27, 19, 11, 3, 60, 52, 44, 36, //
    63, 55, 47, 39, 31, 23, 15, 7, 62, 54, 46, 38, 30, 22, //
    14, 6, 61, 53, 45, 37, 29, 21, 13, 5, 28, 20, 12, 4,
];

/// Permuted choice 2: selects the 48-bit round key from C ‖ D.
const PC2: [u8; 48] = [
    14, 17, 11, 24, 1, 5, 3, 28, 15, 6, 21, 10, //
    23, 19, 12, 4, 26, 8, 16, 7, 27, 20, 13, 2, //
    41, 52, 31, 37, 47, 55, 30, 40, 51, 45, 33, 48, //
    44, 49, 39, 56, 34, 53, 46, 42, 50, 36, 29, 32,
];

/// Per-round left-rotation counts for the 28-bit key halves.
const SHIFTS: [u32; NUM_ROUNDS] = [1, 1, 2, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 2, 1];

/// The eight 6-bit to 4-bit substitution boxes. Each is laid out as
/// four rows of sixteen columns; the row is selected by the outer two
/// input bits and the column by the inner four.
const SBOXES: [[u8; 64]; 8] = [
    [
        14, 4, 13, 1, 2, 15, 11, 8, 3, 10, 6, 12, 5, 9, 0, 7, //
        0, 15, 7, 4, 14, 2, 13, 1, 10, 6, 12, 11, 9, 5, 3, 8, //
        4, 1, 14, 8, 13, 6, 2, 11, 15, 12, 9, 7, 3, 10, 5, 0, //
        15, 12, 8, 2, 4, 9, 1, 7, 5, 11, 3, 14, 10, 0, 6, 13,
    ],
    [
        15, 1, 8, 14, 6, 11, 3, 4, 9, 7, 2, 13, 12, 0, 5, 10, //
        3, 13, 4, 7, 15, 2, 8, 14, 12, 0, 1, 10, 6, 9, 11, 5, //
        0, 14, 7, 11, 10, 4, 13, 1, 5, 8, 12, 6, 9, 3, 2, 15, //
        13, 8, 10, 1, 3, 15, 4, 2, 11, 6, 7, 12, 0, 5, 14, 9,
    ],
    [
        10, 0, 9, 14, 6, 3, 15, 5, 1, 13, 12, 7, 11, 4, 2, 8, //
        13, 7, 0, 9, 3, 4, 6, 10, 2, 8, 5, 14, 12, 11, 15, 1, //
        13, 6, 4, 9, 8, 15, 3, 0, 11, 1, 2, 12, 5, 10, 14, 7, //
        1, 10, 13, 0, 6, 9, 8, 7, 4, 15, 14, 3, 11, 5, 2, 12,
    ],
    [
        7, 13, 14, 3, 0, 6, 9, 10, 1, 2, 8, 5, 11, 12, 4, 15, //
        13, 8, 11, 5, 6, 15, 0, 3, 4, 7, 2, 12, 1, 10, 14, 9, //
        10, 6, 9, 0, 12, 11, 7, 13, 15, 1, 3, 14, 5, 2, 8, 4, //
        3, 15, 0, 6, 10, 1, 13, 8, 9, 4, 5, 11, 12, 7, 2, 14,
    ],
    [
        2, 12, 4, 1, 7, 10, 11, 6, 8, 5, 3, 15, 13, 0, 14, 9, //
        14, 11, 2, 12, 4, 7, 13, 1, 5, 0, 15, 10, 3, 9, 8, 6, //
        4, 2, 1, 11, 10, 13, 7, 8, 15, 9, 12, 5, 6, 3, 0, 14, //
        11, 8, 12, 7, 1, 14, 2, 13, 6, 15, 0, 9, 10, 4, 5, 3,
    ],
    [
        12, 1, 10, 15, 9, 2, 6, 8, 0, 13, 3, 4, 14, 7, 5, 11, //
        10, 15, 4, 2, 7, 12, 9, 5, 6, 1, 13, 14, 0, 11, 3, 8, //
        9, 14, 15, 5, 2, 8, 12, 3, 7, 0, 4, 10, 1, 13, 11, 6, //
        4, 3, 2, 12, 9, 5, 15, 10, 11, 14, 1, 7, 6, 0, 8, 13,
    ],
    [
        4, 11, 2, 14, 15, 0, 8, 13, 3, 12, 9, 7, 5, 10, 6, 1, //
        13, 0, 11, 7, 4, 9, 1, 10, 14, 3, 5, 12, 2, 15, 8, 6, //
        1, 4, 11, 13, 12, 3, 7, 14, 10, 15, 6, 8, 0, 5, 9, 2, //
        6, 11, 13, 8, 1, 4, 10, 7, 9, 5, 0, 15, 14, 2, 3, 12,
    ],
    [
        13, 2, 8, 4, 6, 15, 11, 1, 10, 9, 3, 14, 5, 0, 12, 7, //
        1, 15, 13, 8, 10, 3, 7, 4, 12, 5, 6, 11, 0, 14, 9, 2, //
        7, 11, 4, 1, 9, 12, 14, 2, 0, 6, 10, 13, 15, 3, 5, 8, //
        2, 1, 14, 7, 4, 10, 8, 13, 15, 12, 9, 0, 3, 5, 6, 11,
    ],
];

/// Applies a 1-indexed permutation table to the low `src_bits` bits of
/// `src`, producing one output bit per table entry (MSB first).
fn permute(src: u64, src_bits: u32, table: &[u8]) -> u64 {
    let mut out: u64 = 0;
    for &pos in table {
        out = (out << 1) | ((src >> (src_bits - pos as u32)) & 1);
    }
    out
}

/// Left-rotates a 28-bit value.
fn rotl28(value: u64, shift: u32) -> u64 {
    ((value << shift) | (value >> (28 - shift))) & 0x0FFF_FFFF
}

/// Derives the sixteen 48-bit round keys from an 8-byte key.
///
/// PC1 drops the parity bits and splits the remaining 56 bits into two
/// 28-bit halves, which rotate left by the per-round shift counts; PC2
/// selects 48 bits from the rotated halves for each round.
pub fn round_keys(key: &[u8; BLOCK_SIZE]) -> [u64; NUM_ROUNDS] {
    let permuted = permute(u64::from_be_bytes(*key), 64, &PC1);
    let mut c = (permuted >> 28) & 0x0FFF_FFFF;
    let mut d = permuted & 0x0FFF_FFFF;
    let mut keys = [0u64; NUM_ROUNDS];
    for (round, &shift) in SHIFTS.iter().enumerate() {
        c = rotl28(c, shift);
        d = rotl28(d, shift);
        keys[round] = permute((c << 28) | d, 56, &PC2);
    }
    keys
}

/// The round function F: expansion, key mixing, S-box substitution and
/// the P permutation.
fn feistel(half: u32, round_key: u64) -> u32 {
    let mixed = permute(half as u64, 32, &E) ^ round_key;
    let mut substituted: u32 = 0;
    for (i, sbox) in SBOXES.iter().enumerate() {
        let six = ((mixed >> (42 - 6 * i)) & 0x3F) as usize;
        let row = ((six & 0x20) >> 4) | (six & 1);
        let col = (six >> 1) & 0x0F;
        substituted = (substituted << 4) | sbox[row * 16 + col] as u32;
    }
    permute(substituted as u64, 32, &P) as u32
}

/// Runs the Feistel network with round keys supplied in `keys` order.
fn crypt_block<'a>(
    block: &[u8; BLOCK_SIZE],
    keys: impl Iterator<Item = &'a u64>,
) -> [u8; BLOCK_SIZE] {
    let permuted = permute(u64::from_be_bytes(*block), 64, &IP);
    let mut left = (permuted >> 32) as u32;
    let mut right = permuted as u32;
    for &key in keys {
        let next = left ^ feistel(right, key);
        left = right;
        right = next;
    }
    // The halves swap after round 16.
    let preoutput = ((right as u64) << 32) | left as u64;
    permute(preoutput, 64, &FP).to_be_bytes()
}

/// Encrypts one 8-byte block with the given round keys.
pub fn encrypt_block(block: &[u8; BLOCK_SIZE], keys: &[u64; NUM_ROUNDS]) -> [u8; BLOCK_SIZE] {
    crypt_block(block, keys.iter())
}

/// Decrypts one 8-byte block: the same network with the round keys in
/// reverse order.
pub fn decrypt_block(block: &[u8; BLOCK_SIZE], keys: &[u64; NUM_ROUNDS]) -> [u8; BLOCK_SIZE] {
    crypt_block(block, keys.iter().rev())
}

/// Triple-DES in encrypt-decrypt-encrypt composition.
///
/// Built from 8, 16 or 24 key bytes:
/// - 24 bytes: three independent sub-keys (3-key EDE, 168 key bits);
/// - 16 bytes: two sub-keys with K3 = K1 (2-key EDE, 112 key bits);
/// - 8 bytes: K1 = K2 = K3, which degenerates to single DES (keying
///   option 3, kept for interoperability).
pub struct TripleDes {
    k1: [u64; NUM_ROUNDS],
    k2: [u64; NUM_ROUNDS],
    k3: [u64; NUM_ROUNDS],
}

impl TripleDes {
    /// Builds the three key schedules from raw key bytes.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidKeyLength`] unless `key` is 8, 16
    /// or 24 bytes long.
    pub fn new(key: &[u8]) -> Result<TripleDes, CryptoError> {
        let sub_key = |offset: usize| {
            let mut bytes = [0u8; BLOCK_SIZE];
            bytes.copy_from_slice(&key[offset..offset + BLOCK_SIZE]);
            round_keys(&bytes)
        };
        match key.len() {
            8 => {
                let k = sub_key(0);
                Ok(TripleDes {
                    k1: k,
                    k2: k,
                    k3: k,
                })
            }
            16 => {
                let k1 = sub_key(0);
                Ok(TripleDes {
                    k1,
                    k2: sub_key(8),
                    k3: k1,
                })
            }
            24 => Ok(TripleDes {
                k1: sub_key(0),
                k2: sub_key(8),
                k3: sub_key(16),
            }),
            got => Err(CryptoError::InvalidKeyLength { expected: 24, got }),
        }
    }

    /// Encrypts one block: `E_K3(D_K2(E_K1(block)))`.
    pub fn encrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let stage1 = encrypt_block(block, &self.k1);
        let stage2 = decrypt_block(&stage1, &self.k2);
        encrypt_block(&stage2, &self.k3)
    }

    /// Decrypts one block: `D_K1(E_K2(D_K3(block)))`.
    pub fn decrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let stage1 = decrypt_block(block, &self.k3);
        let stage2 = encrypt_block(&stage1, &self.k2);
        decrypt_block(&stage2, &self.k1)
    }
}

impl Drop for TripleDes {
    fn drop(&mut self) {
        self.k1.zeroize();
        self.k2.zeroize();
        self.k3.zeroize();
    }
}

impl core::fmt::Debug for TripleDes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TripleDes")
            .field("k1", &"[REDACTED]")
            .field("k2", &"[REDACTED]")
            .field("k3", &"[REDACTED]")
            .finish()
    }
}
