//! Poly1305 one-time authenticator per RFC 8439.
//!
//! Evaluates the message as a polynomial over GF(2^130 − 5) at the
//! clamped point `r`, then adds `s` modulo 2^128. The accumulator is
//! held in five base-2^26 limbs so every partial product fits a `u64`
//! with room for the carry chains.
//!
//! The key is one-time: authenticating two messages under the same key
//! forfeits the security guarantee. Callers derive a fresh key per
//! message (see [`aead`](crate::aead)).

/// Key size in bytes: the 16-byte point `r` followed by the 16-byte
/// final addend `s`.
pub const KEY_SIZE: usize = 32;

/// Tag size in bytes.
pub const TAG_SIZE: usize = 16;

const LIMB_MASK: u32 = 0x03FF_FFFF;

/// Little-endian 32-bit read at `offset`.
fn le32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Computes the Poly1305 tag of `message` under a one-time `key`.
pub fn mac(key: &[u8; KEY_SIZE], message: &[u8]) -> [u8; TAG_SIZE] {
    // Clamp r: clear the top four bits of every fourth byte and the
    // bottom two bits of bytes 4, 8 and 12.
    let mut r_bytes = [0u8; 16];
    r_bytes.copy_from_slice(&key[..16]);
    r_bytes[3] &= 0x0F;
    r_bytes[7] &= 0x0F;
    r_bytes[11] &= 0x0F;
    r_bytes[15] &= 0x0F;
    r_bytes[4] &= 0xFC;
    r_bytes[8] &= 0xFC;
    r_bytes[12] &= 0xFC;

    let r0 = le32(&r_bytes, 0) & LIMB_MASK;
    let r1 = (le32(&r_bytes, 3) >> 2) & LIMB_MASK;
    let r2 = (le32(&r_bytes, 6) >> 4) & LIMB_MASK;
    let r3 = (le32(&r_bytes, 9) >> 6) & LIMB_MASK;
    let r4 = (le32(&r_bytes, 12) >> 8) & LIMB_MASK;

    let s1 = r1 * 5;
    let s2 = r2 * 5;
    let s3 = r3 * 5;
    let s4 = r4 * 5;

    let (mut h0, mut h1, mut h2, mut h3, mut h4) = (0u32, 0u32, 0u32, 0u32, 0u32);

    for chunk in message.chunks(16) {
        // A full chunk contributes 2^128 through the high limb; a short
        // final chunk instead carries a single 0x01 byte directly after
        // the data, inside the block.
        let mut block = [0u8; 17];
        block[..chunk.len()].copy_from_slice(chunk);
        block[chunk.len()] = 1;

        let t0 = le32(&block, 0) & LIMB_MASK;
        let t1 = (le32(&block, 3) >> 2) & LIMB_MASK;
        let t2 = (le32(&block, 6) >> 4) & LIMB_MASK;
        let t3 = (le32(&block, 9) >> 6) & LIMB_MASK;
        let t4 = (le32(&block, 12) >> 8) | ((block[16] as u32) << 24);

        // h = (h + block) * r mod 2^130 - 5, with the multiples of 5
        // folding the limbs above 2^130 back down.
        h0 += t0;
        h1 += t1;
        h2 += t2;
        h3 += t3;
        h4 += t4;

        let d0 = h0 as u64 * r0 as u64
            + h1 as u64 * s4 as u64
            + h2 as u64 * s3 as u64
            + h3 as u64 * s2 as u64
            + h4 as u64 * s1 as u64;
        let mut d1 = h0 as u64 * r1 as u64
            + h1 as u64 * r0 as u64
            + h2 as u64 * s4 as u64
            + h3 as u64 * s3 as u64
            + h4 as u64 * s2 as u64;
        let mut d2 = h0 as u64 * r2 as u64
            + h1 as u64 * r1 as u64
            + h2 as u64 * r0 as u64
            + h3 as u64 * s4 as u64
            + h4 as u64 * s3 as u64;
        let mut d3 = h0 as u64 * r3 as u64
            + h1 as u64 * r2 as u64
            + h2 as u64 * r1 as u64
            + h3 as u64 * r0 as u64
            + h4 as u64 * s4 as u64;
        let mut d4 = h0 as u64 * r4 as u64
            + h1 as u64 * r3 as u64
            + h2 as u64 * r2 as u64
            + h3 as u64 * r1 as u64
            + h4 as u64 * r0 as u64;

        let mut carry = (d0 >> 26) as u32;
        h0 = d0 as u32 & LIMB_MASK;
        d1 += carry as u64;
        carry = (d1 >> 26) as u32;
        h1 = d1 as u32 & LIMB_MASK;
        d2 += carry as u64;
        carry = (d2 >> 26) as u32;
        h2 = d2 as u32 & LIMB_MASK;
        d3 += carry as u64;
        carry = (d3 >> 26) as u32;
        h3 = d3 as u32 & LIMB_MASK;
        d4 += carry as u64;
        carry = (d4 >> 26) as u32;
        h4 = d4 as u32 & LIMB_MASK;
        h0 += carry * 5;
        carry = h0 >> 26;
        h0 &= LIMB_MASK;
        h1 += carry;
    }

    // Fully propagate the carries left pending between blocks.
    let mut carry = h1 >> 26;
    h1 &= LIMB_MASK;
    h2 += carry;
    carry = h2 >> 26;
    h2 &= LIMB_MASK;
    h3 += carry;
    carry = h3 >> 26;
    h3 &= LIMB_MASK;
    h4 += carry;
    carry = h4 >> 26;
    h4 &= LIMB_MASK;
    h0 += carry * 5;
    carry = h0 >> 26;
    h0 &= LIMB_MASK;
    h1 += carry;

    // g = h + 5 - 2^130; pick g when h >= 2^130 - 5, else keep h.
    let mut g0 = h0.wrapping_add(5);
    carry = g0 >> 26;
    g0 &= LIMB_MASK;
    let mut g1 = h1.wrapping_add(carry);
    carry = g1 >> 26;
    g1 &= LIMB_MASK;
    let mut g2 = h2.wrapping_add(carry);
    carry = g2 >> 26;
    g2 &= LIMB_MASK;
    let mut g3 = h3.wrapping_add(carry);
    carry = g3 >> 26;
    g3 &= LIMB_MASK;
    let g4 = h4.wrapping_add(carry).wrapping_sub(1 << 26);

    // All-ones when g4 is non-negative (h reached the modulus).
    let mask = (g4 >> 31).wrapping_sub(1);
    h0 = (h0 & !mask) | (g0 & mask);
    h1 = (h1 & !mask) | (g1 & mask);
    h2 = (h2 & !mask) | (g2 & mask);
    h3 = (h3 & !mask) | (g3 & mask);
    h4 = (h4 & !mask) | (g4 & mask);

    // Repack the limbs into four 32-bit words (mod 2^128) and add s.
    let f0 = (h0 as u64 | (h1 as u64) << 26) as u32;
    let f1 = ((h1 >> 6) as u64 | (h2 as u64) << 20) as u32;
    let f2 = ((h2 >> 12) as u64 | (h3 as u64) << 14) as u32;
    let f3 = ((h3 >> 18) as u64 | (h4 as u64) << 8) as u32;

    let mut tag = [0u8; TAG_SIZE];
    let mut acc = f0 as u64 + le32(key, 16) as u64;
    tag[0..4].copy_from_slice(&(acc as u32).to_le_bytes());
    acc = f1 as u64 + le32(key, 20) as u64 + (acc >> 32);
    tag[4..8].copy_from_slice(&(acc as u32).to_le_bytes());
    acc = f2 as u64 + le32(key, 24) as u64 + (acc >> 32);
    tag[8..12].copy_from_slice(&(acc as u32).to_le_bytes());
    acc = f3 as u64 + le32(key, 28) as u64 + (acc >> 32);
    tag[12..16].copy_from_slice(&(acc as u32).to_le_bytes());
    tag
}
