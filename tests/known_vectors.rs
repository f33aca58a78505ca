//! Known-answer vectors for every engine, taken from the defining
//! standards: FIPS 197 (AES), NIST SP 800-38D (GCM), FIPS 46-3 (DES)
//! and RFC 8439 (ChaCha20, Poly1305, the AEAD construction).
//!
//! All expected values are frozen; any change in output is a
//! correctness regression, not a formatting issue.

use cipherkit::{aead, aes, chacha20, des, poly1305};

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// AES — FIPS 197 Appendix C example vectors
// ═══════════════════════════════════════════════════════════════════════

/// Shared Appendix C plaintext 00112233445566778899aabbccddeeff.
const AES_PLAINTEXT: &str = "00112233445566778899aabbccddeeff";

/// Runs one Appendix C case: encrypt, compare, decrypt, compare.
fn aes_case(key_hex: &str, rounds: usize, expected_hex: &str) {
    let key = unhex(key_hex);
    let round_keys = aes::expand_key(&key, rounds).unwrap();
    let mut block: [u8; 16] = unhex(AES_PLAINTEXT).try_into().unwrap();
    aes::encrypt_block(&mut block, &round_keys);
    assert_eq!(block.to_vec(), unhex(expected_hex), "encrypt mismatch");
    aes::decrypt_block(&mut block, &round_keys);
    assert_eq!(block.to_vec(), unhex(AES_PLAINTEXT), "decrypt mismatch");
}

#[test]
fn aes128_fips197_appendix_c1() {
    aes_case(
        "000102030405060708090a0b0c0d0e0f",
        10,
        "69c4e0d86a7b0430d8cdb78070b4c55a",
    );
}

#[test]
fn aes192_fips197_appendix_c2() {
    aes_case(
        "000102030405060708090a0b0c0d0e0f1011121314151617",
        12,
        "dda97ca4864cdfe06eaf70a0ec0d7191",
    );
}

#[test]
fn aes256_fips197_appendix_c3() {
    aes_case(
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        14,
        "8ea2b7ca516745bfeafc49904b496089",
    );
}

// ═══════════════════════════════════════════════════════════════════════
// AES-GCM — SP 800-38D validation cases (zero key, zero IV)
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn gcm_empty_plaintext_tag() {
    let round_keys = aes::expand_key(&[0u8; 16], 10).unwrap();
    let (ciphertext, tag) = aes::gcm::encrypt(&round_keys, &[0u8; 12], b"", b"");
    assert!(ciphertext.is_empty());
    assert_eq!(tag.to_vec(), unhex("58e2fccefa7e3061367f1d57a4e7455a"));
}

#[test]
fn gcm_single_zero_block() {
    let round_keys = aes::expand_key(&[0u8; 16], 10).unwrap();
    let (ciphertext, tag) = aes::gcm::encrypt(&round_keys, &[0u8; 12], b"", &[0u8; 16]);
    assert_eq!(ciphertext, unhex("0388dace60b6a392f328c2b971b2fe78"));
    assert_eq!(tag.to_vec(), unhex("ab6e47d42cec13bdf53a67b21257bddf"));
    let recovered = aes::gcm::decrypt(&round_keys, &[0u8; 12], b"", &ciphertext, &tag).unwrap();
    assert_eq!(recovered, [0u8; 16]);
}

// ═══════════════════════════════════════════════════════════════════════
// DES / Triple-DES — FIPS 46-3 worked example and NBS validation vector
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn des_worked_example() {
    let key: [u8; 8] = unhex("133457799bbcdff1").try_into().unwrap();
    let keys = des::round_keys(&key);
    let plaintext: [u8; 8] = unhex("0123456789abcdef").try_into().unwrap();
    let ciphertext = des::encrypt_block(&plaintext, &keys);
    assert_eq!(ciphertext.to_vec(), unhex("85e813540f0ab405"));
    assert_eq!(des::decrypt_block(&ciphertext, &keys), plaintext);
}

#[test]
fn des_weak_parity_key_zero_block() {
    let keys = des::round_keys(&[0x01; 8]);
    let ciphertext = des::encrypt_block(&[0u8; 8], &keys);
    assert_eq!(ciphertext.to_vec(), unhex("8ca64de9c1b123a7"));
}

#[test]
fn triple_des_collapses_to_single_des_with_equal_subkeys() {
    // Keying options 2 and 3 with identical sub-keys must match plain
    // DES exactly; this pins the EDE composition order.
    let single = des::round_keys(&[0x01; 8]);
    let block: [u8; 8] = unhex("0123456789abcdef").try_into().unwrap();
    let expected = des::encrypt_block(&block, &single);

    let two_key = des::TripleDes::new(&[0x01; 16]).unwrap();
    assert_eq!(two_key.encrypt_block(&block), expected);

    let three_key = des::TripleDes::new(&[0x01; 24]).unwrap();
    assert_eq!(three_key.encrypt_block(&block), expected);
}

// ═══════════════════════════════════════════════════════════════════════
// ChaCha20 / Poly1305 / AEAD — RFC 8439 vectors
// ═══════════════════════════════════════════════════════════════════════

/// Key 00 01 02 ... 1f used by the RFC 8439 block test.
fn rfc8439_block_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    for (i, byte) in key.iter_mut().enumerate() {
        *byte = i as u8;
    }
    key
}

#[test]
fn chacha20_block_vector() {
    // RFC 8439 section 2.3.2.
    let nonce = [0, 0, 0, 9, 0, 0, 0, 0x4a, 0, 0, 0, 0];
    let keystream = chacha20::block(&rfc8439_block_key(), 1, &nonce);
    assert_eq!(
        keystream.to_vec(),
        unhex(
            "10f1e7e4d13b5915500fdd1fa32071c4c7d1f4c733c068030422aa9ac3d46c4e\
             d2826446079faa0914c2d705d98b02a2b5129cd1de164eb9cbd083e8a2503c4e"
        )
    );
}

#[test]
fn poly1305_tag_vector() {
    // RFC 8439 section 2.5.2.
    let key: [u8; 32] =
        unhex("85d6be7857556d337f4452fe42d506a80103808afb0db2fd4abff6af4149f51b")
            .try_into()
            .unwrap();
    let tag = poly1305::mac(&key, b"Cryptographic Forum Research Group");
    assert_eq!(tag.to_vec(), unhex("a8061dc1305136c6c22b8baf0c0127a9"));
}

#[test]
fn chacha20_poly1305_aead_vector() {
    // RFC 8439 section 2.8.2: key 80..9f, the sunscreen plaintext.
    let mut key = [0u8; 32];
    for (i, byte) in key.iter_mut().enumerate() {
        *byte = 0x80 + i as u8;
    }
    let nonce = [0x07, 0, 0, 0, 0x40, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47];
    let aad = unhex("50515253c0c1c2c3c4c5c6c7");
    let plaintext = b"Ladies and Gentlemen of the class of '99: \
If I could offer you only one tip for the future, sunscreen would be it.";

    let (ciphertext, tag) = aead::encrypt(&key, &nonce, &aad, plaintext);
    assert_eq!(ciphertext.len(), plaintext.len());
    assert_eq!(
        ciphertext[..16],
        unhex("d31a8d34648e60db7b86afbc53ef7ec2")[..]
    );
    assert_eq!(tag.to_vec(), unhex("1ae10b594f09e26a7e902ecbd0600691"));

    let recovered = aead::decrypt(&key, &nonce, &aad, &ciphertext, &tag).unwrap();
    assert_eq!(recovered, plaintext);
}
