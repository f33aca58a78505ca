//! ChaCha20-Poly1305 encryption facade.
//!
//! Accepts 256-bit ChaCha20 keys, draws a fresh 12-byte nonce per
//! encryption, and packages the output as `ciphertext ‖ tag`.
//!
//! # Examples
//!
//! ```
//! use cipherkit::service::chacha20_poly1305;
//! use cipherkit::EncryptionAlgorithm;
//!
//! let mut rng = rand::thread_rng();
//! let key =
//!     chacha20_poly1305::generate_key(&mut rng, EncryptionAlgorithm::ChaCha20).unwrap();
//! let message = chacha20_poly1305::encrypt(&mut rng, b"rendezvous at six", &key).unwrap();
//! assert_eq!(
//!     chacha20_poly1305::decrypt(&message, &key).unwrap(),
//!     b"rendezvous at six"
//! );
//! ```

use rand::{CryptoRng, RngCore};

use crate::aead;
use crate::error::CryptoError;
use crate::key::{EncryptedMessage, EncryptionAlgorithm, EncryptionKey};

/// Rejects keys that do not belong to ChaCha20.
fn check_algorithm(algorithm: EncryptionAlgorithm) -> Result<(), CryptoError> {
    match algorithm {
        EncryptionAlgorithm::ChaCha20 => Ok(()),
        other => Err(CryptoError::UnsupportedAlgorithm { algorithm: other }),
    }
}

/// Borrows the key bytes as the fixed-size array the engine expects.
fn key_bytes(key: &EncryptionKey) -> Result<[u8; aead::KEY_SIZE], CryptoError> {
    key.bytes()
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength {
            expected: aead::KEY_SIZE,
            got: key.bytes().len(),
        })
}

/// Generates a fresh 256-bit ChaCha20 key.
///
/// # Errors
/// Returns [`CryptoError::UnsupportedAlgorithm`] for any algorithm
/// other than [`EncryptionAlgorithm::ChaCha20`].
pub fn generate_key<R: RngCore + CryptoRng>(
    rng: &mut R,
    algorithm: EncryptionAlgorithm,
) -> Result<EncryptionKey, CryptoError> {
    check_algorithm(algorithm)?;
    Ok(EncryptionKey::generate(rng, algorithm))
}

/// Encrypts `plaintext` under `key` with a fresh random nonce.
///
/// # Returns
/// An [`EncryptedMessage`] holding `ciphertext ‖ tag` and the nonce.
///
/// # Errors
/// Returns [`CryptoError::UnsupportedAlgorithm`] if `key` is not a
/// ChaCha20 key.
pub fn encrypt<R: RngCore + CryptoRng>(
    rng: &mut R,
    plaintext: &[u8],
    key: &EncryptionKey,
) -> Result<EncryptedMessage, CryptoError> {
    check_algorithm(key.algorithm())?;
    let key_bytes = key_bytes(key)?;
    let mut nonce = [0u8; aead::NONCE_SIZE];
    rng.fill_bytes(&mut nonce);
    let (mut bytes, tag) = aead::encrypt(&key_bytes, &nonce, b"", plaintext);
    bytes.extend_from_slice(&tag);
    Ok(EncryptedMessage::new(
        key.algorithm(),
        Some(nonce.to_vec()),
        bytes,
    ))
}

/// Authenticates and decrypts `message` under `key`.
///
/// # Errors
/// - [`CryptoError::UnsupportedAlgorithm`] if the key is not ChaCha20
///   or the message was produced under a different algorithm;
/// - [`CryptoError::MissingNonceOrIv`] if the message carries no nonce;
/// - [`CryptoError::InvalidBlockLength`] for a wrong-sized nonce or a
///   body shorter than the tag;
/// - [`CryptoError::AuthenticationFailure`] on tag mismatch — no
///   plaintext is released.
pub fn decrypt(message: &EncryptedMessage, key: &EncryptionKey) -> Result<Vec<u8>, CryptoError> {
    check_algorithm(key.algorithm())?;
    if message.algorithm() != key.algorithm() {
        return Err(CryptoError::UnsupportedAlgorithm {
            algorithm: message.algorithm(),
        });
    }
    let nonce = message.iv().ok_or(CryptoError::MissingNonceOrIv)?;
    let nonce: [u8; aead::NONCE_SIZE] =
        nonce.try_into().map_err(|_| CryptoError::InvalidBlockLength {
            expected: aead::NONCE_SIZE,
            got: nonce.len(),
        })?;
    let bytes = message.bytes();
    if bytes.len() < aead::TAG_SIZE {
        return Err(CryptoError::InvalidBlockLength {
            expected: aead::TAG_SIZE,
            got: bytes.len(),
        });
    }
    let (ciphertext, tag_bytes) = bytes.split_at(bytes.len() - aead::TAG_SIZE);
    let mut tag = [0u8; aead::TAG_SIZE];
    tag.copy_from_slice(tag_bytes);
    aead::decrypt(&key_bytes(key)?, &nonce, b"", ciphertext, &tag)
}
