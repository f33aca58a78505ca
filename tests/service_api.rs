//! Behavioral tests for the public facade API: round-trips across every
//! algorithm, the error taxonomy, tamper detection and randomness
//! guarantees.

use cipherkit::service::{aes_gcm, chacha20_poly1305, triple_des_cbc};
use cipherkit::{CryptoError, EncryptedMessage, EncryptionAlgorithm, EncryptionKey};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Plaintext lengths that exercise empty, partial, exact and multi-block
/// inputs for both 8-byte and 16/64-byte block structures.
const LENGTHS: [usize; 9] = [0, 1, 7, 8, 15, 16, 63, 64, 257];

fn rng() -> StdRng {
    StdRng::seed_from_u64(0xC1F0)
}

/// Dispatches to the facade that owns `algorithm`.
fn facade_generate_key(
    rng: &mut StdRng,
    algorithm: EncryptionAlgorithm,
) -> Result<EncryptionKey, CryptoError> {
    match algorithm {
        EncryptionAlgorithm::Aes128
        | EncryptionAlgorithm::Aes192
        | EncryptionAlgorithm::Aes256 => aes_gcm::generate_key(rng, algorithm),
        EncryptionAlgorithm::ChaCha20 => chacha20_poly1305::generate_key(rng, algorithm),
        EncryptionAlgorithm::TripleDes112 | EncryptionAlgorithm::TripleDes168 => {
            triple_des_cbc::generate_key(rng, algorithm)
        }
    }
}

fn facade_encrypt(
    rng: &mut StdRng,
    plaintext: &[u8],
    key: &EncryptionKey,
) -> Result<EncryptedMessage, CryptoError> {
    match key.algorithm() {
        EncryptionAlgorithm::Aes128
        | EncryptionAlgorithm::Aes192
        | EncryptionAlgorithm::Aes256 => aes_gcm::encrypt(rng, plaintext, key),
        EncryptionAlgorithm::ChaCha20 => chacha20_poly1305::encrypt(rng, plaintext, key),
        EncryptionAlgorithm::TripleDes112 | EncryptionAlgorithm::TripleDes168 => {
            triple_des_cbc::encrypt(rng, plaintext, key)
        }
    }
}

fn facade_decrypt(
    message: &EncryptedMessage,
    key: &EncryptionKey,
) -> Result<Vec<u8>, CryptoError> {
    match key.algorithm() {
        EncryptionAlgorithm::Aes128
        | EncryptionAlgorithm::Aes192
        | EncryptionAlgorithm::Aes256 => aes_gcm::decrypt(message, key),
        EncryptionAlgorithm::ChaCha20 => chacha20_poly1305::decrypt(message, key),
        EncryptionAlgorithm::TripleDes112 | EncryptionAlgorithm::TripleDes168 => {
            triple_des_cbc::decrypt(message, key)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Round-trips across the whole catalogue
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn roundtrip_every_algorithm_and_length() {
    let mut rng = rng();
    for algorithm in EncryptionAlgorithm::ALL {
        let key = facade_generate_key(&mut rng, algorithm).unwrap();
        for len in LENGTHS {
            let plaintext: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
            let message = facade_encrypt(&mut rng, &plaintext, &key).unwrap();
            let recovered = facade_decrypt(&message, &key).unwrap();
            assert_eq!(recovered, plaintext, "{} with {} bytes", algorithm, len);
        }
    }
}

#[test]
fn generated_keys_have_descriptor_size() {
    let mut rng = rng();
    for algorithm in EncryptionAlgorithm::ALL {
        let key = facade_generate_key(&mut rng, algorithm).unwrap();
        assert_eq!(
            key.bytes().len(),
            algorithm.key_size_bytes(),
            "{}",
            algorithm
        );
    }
}

#[test]
fn iv_matches_descriptor_size() {
    let mut rng = rng();
    for algorithm in EncryptionAlgorithm::ALL {
        let key = facade_generate_key(&mut rng, algorithm).unwrap();
        let message = facade_encrypt(&mut rng, b"sized", &key).unwrap();
        assert_eq!(
            message.iv().map(<[u8]>::len),
            Some(algorithm.iv_size_bytes()),
            "{}",
            algorithm
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Randomness per call
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn same_plaintext_twice_differs_in_iv_and_ciphertext() {
    let mut rng = rng();
    for algorithm in EncryptionAlgorithm::ALL {
        let key = facade_generate_key(&mut rng, algorithm).unwrap();
        let first = facade_encrypt(&mut rng, b"identical plaintext", &key).unwrap();
        let second = facade_encrypt(&mut rng, b"identical plaintext", &key).unwrap();
        assert_ne!(first.iv(), second.iv(), "{} reused its IV", algorithm);
        assert_ne!(
            first.bytes(),
            second.bytes(),
            "{} produced identical ciphertext",
            algorithm
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tamper detection — AEAD modes must catch every single-bit flip
// ═══════════════════════════════════════════════════════════════════════

/// Flips each bit of the ciphertext-and-tag body in turn and expects
/// every variant to be rejected.
fn assert_every_bit_flip_detected(algorithm: EncryptionAlgorithm) {
    let mut rng = rng();
    let key = facade_generate_key(&mut rng, algorithm).unwrap();
    let message = facade_encrypt(&mut rng, b"short but covered", &key).unwrap();
    for byte_index in 0..message.bytes().len() {
        for bit in 0..8 {
            let mut bytes = message.bytes().to_vec();
            bytes[byte_index] ^= 1 << bit;
            let tampered = EncryptedMessage::new(
                message.algorithm(),
                message.iv().map(<[u8]>::to_vec),
                bytes,
            );
            assert_eq!(
                facade_decrypt(&tampered, &key).unwrap_err(),
                CryptoError::AuthenticationFailure,
                "{}: flip of byte {} bit {} not detected",
                algorithm,
                byte_index,
                bit
            );
        }
    }
}

#[test]
fn aes_gcm_detects_every_bit_flip() {
    assert_every_bit_flip_detected(EncryptionAlgorithm::Aes128);
}

#[test]
fn chacha20_poly1305_detects_every_bit_flip() {
    assert_every_bit_flip_detected(EncryptionAlgorithm::ChaCha20);
}

#[test]
fn aead_detects_nonce_substitution() {
    let mut rng = rng();
    for algorithm in [EncryptionAlgorithm::Aes256, EncryptionAlgorithm::ChaCha20] {
        let key = facade_generate_key(&mut rng, algorithm).unwrap();
        let message = facade_encrypt(&mut rng, b"bound to its nonce", &key).unwrap();
        let mut iv = message.iv().unwrap().to_vec();
        iv[0] ^= 0xFF;
        let swapped =
            EncryptedMessage::new(message.algorithm(), Some(iv), message.bytes().to_vec());
        assert_eq!(
            facade_decrypt(&swapped, &key).unwrap_err(),
            CryptoError::AuthenticationFailure,
            "{}",
            algorithm
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Error taxonomy
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn every_facade_rejects_every_foreign_algorithm() {
    let mut rng = rng();
    for algorithm in EncryptionAlgorithm::ALL {
        let key = EncryptionKey::generate(&mut rng, algorithm);
        let expected = CryptoError::UnsupportedAlgorithm { algorithm };
        let is_aes = matches!(
            algorithm,
            EncryptionAlgorithm::Aes128 | EncryptionAlgorithm::Aes192 | EncryptionAlgorithm::Aes256
        );
        let is_chacha = algorithm == EncryptionAlgorithm::ChaCha20;
        let is_tdes = matches!(
            algorithm,
            EncryptionAlgorithm::TripleDes112 | EncryptionAlgorithm::TripleDes168
        );

        if !is_aes {
            assert_eq!(
                aes_gcm::encrypt(&mut rng, b"x", &key).unwrap_err(),
                expected,
                "{} accepted by the AES-GCM facade",
                algorithm
            );
        }
        if !is_chacha {
            assert_eq!(
                chacha20_poly1305::encrypt(&mut rng, b"x", &key).unwrap_err(),
                expected,
                "{} accepted by the ChaCha20-Poly1305 facade",
                algorithm
            );
        }
        if !is_tdes {
            assert_eq!(
                triple_des_cbc::encrypt(&mut rng, b"x", &key).unwrap_err(),
                expected,
                "{} accepted by the Triple-DES facade",
                algorithm
            );
        }
    }
}

#[test]
fn message_key_algorithm_mismatch_is_rejected() {
    let mut rng = rng();
    let aes128 = aes_gcm::generate_key(&mut rng, EncryptionAlgorithm::Aes128).unwrap();
    let aes256 = aes_gcm::generate_key(&mut rng, EncryptionAlgorithm::Aes256).unwrap();
    let message = aes_gcm::encrypt(&mut rng, b"tagged by algorithm", &aes128).unwrap();
    assert_eq!(
        aes_gcm::decrypt(&message, &aes256).unwrap_err(),
        CryptoError::UnsupportedAlgorithm {
            algorithm: EncryptionAlgorithm::Aes128
        }
    );
}

#[test]
fn wrong_length_key_material_is_rejected_at_construction() {
    use std::time::SystemTime;
    for algorithm in EncryptionAlgorithm::ALL {
        let wrong = vec![0u8; algorithm.key_size_bytes() + 1];
        let got = wrong.len();
        assert_eq!(
            EncryptionKey::from_parts("id", algorithm, wrong, SystemTime::now()).unwrap_err(),
            CryptoError::InvalidKeyLength {
                expected: algorithm.key_size_bytes(),
                got
            },
            "{}",
            algorithm
        );
    }
}

#[test]
fn missing_iv_is_always_a_hard_error() {
    let mut rng = rng();
    for algorithm in EncryptionAlgorithm::ALL {
        let key = facade_generate_key(&mut rng, algorithm).unwrap();
        let message = facade_encrypt(&mut rng, b"needs its iv", &key).unwrap();
        let stripped =
            EncryptedMessage::new(message.algorithm(), None, message.bytes().to_vec());
        assert_eq!(
            facade_decrypt(&stripped, &key).unwrap_err(),
            CryptoError::MissingNonceOrIv,
            "{}",
            algorithm
        );
    }
}

#[test]
fn wrong_iv_length_is_rejected() {
    let mut rng = rng();
    for algorithm in EncryptionAlgorithm::ALL {
        let key = facade_generate_key(&mut rng, algorithm).unwrap();
        let message = facade_encrypt(&mut rng, b"iv sized", &key).unwrap();
        let short_iv = vec![0u8; algorithm.iv_size_bytes() - 1];
        let reshaped = EncryptedMessage::new(
            message.algorithm(),
            Some(short_iv),
            message.bytes().to_vec(),
        );
        assert_eq!(
            facade_decrypt(&reshaped, &key).unwrap_err(),
            CryptoError::InvalidBlockLength {
                expected: algorithm.iv_size_bytes(),
                got: algorithm.iv_size_bytes() - 1
            },
            "{}",
            algorithm
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Output shape
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn aead_output_is_plaintext_plus_tag() {
    let mut rng = rng();
    for algorithm in [EncryptionAlgorithm::Aes192, EncryptionAlgorithm::ChaCha20] {
        let key = facade_generate_key(&mut rng, algorithm).unwrap();
        for len in LENGTHS {
            let message = facade_encrypt(&mut rng, &vec![0u8; len], &key).unwrap();
            assert_eq!(message.bytes().len(), len + 16, "{}", algorithm);
        }
    }
}

#[test]
fn cbc_output_is_padded_to_blocks() {
    let mut rng = rng();
    let key = triple_des_cbc::generate_key(&mut rng, EncryptionAlgorithm::TripleDes112).unwrap();
    for len in LENGTHS {
        let message = triple_des_cbc::encrypt(&mut rng, &vec![0u8; len], &key).unwrap();
        let expected = (len / 8 + 1) * 8;
        assert_eq!(message.bytes().len(), expected, "input length {}", len);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Property sweeps
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_roundtrip_aes_gcm(plaintext in proptest::collection::vec(any::<u8>(), 0..512), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let key = aes_gcm::generate_key(&mut rng, EncryptionAlgorithm::Aes256).unwrap();
        let message = aes_gcm::encrypt(&mut rng, &plaintext, &key).unwrap();
        prop_assert_eq!(aes_gcm::decrypt(&message, &key).unwrap(), plaintext);
    }

    #[test]
    fn prop_roundtrip_chacha20_poly1305(plaintext in proptest::collection::vec(any::<u8>(), 0..512), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let key = chacha20_poly1305::generate_key(&mut rng, EncryptionAlgorithm::ChaCha20).unwrap();
        let message = chacha20_poly1305::encrypt(&mut rng, &plaintext, &key).unwrap();
        prop_assert_eq!(chacha20_poly1305::decrypt(&message, &key).unwrap(), plaintext);
    }

    #[test]
    fn prop_roundtrip_triple_des(plaintext in proptest::collection::vec(any::<u8>(), 0..256), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let key = triple_des_cbc::generate_key(&mut rng, EncryptionAlgorithm::TripleDes168).unwrap();
        let message = triple_des_cbc::encrypt(&mut rng, &plaintext, &key).unwrap();
        prop_assert_eq!(triple_des_cbc::decrypt(&message, &key).unwrap(), plaintext);
    }
}
