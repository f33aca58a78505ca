//! AES-GCM encryption facade.
//!
//! Accepts the AES family (128/192/256-bit keys), draws a fresh 12-byte
//! IV per encryption, and packages the output as `ciphertext ‖ tag`.
//!
//! # Examples
//!
//! ```
//! use cipherkit::service::aes_gcm;
//! use cipherkit::EncryptionAlgorithm;
//!
//! let mut rng = rand::thread_rng();
//! let key = aes_gcm::generate_key(&mut rng, EncryptionAlgorithm::Aes256).unwrap();
//! let message = aes_gcm::encrypt(&mut rng, b"attack at dawn", &key).unwrap();
//! let plaintext = aes_gcm::decrypt(&message, &key).unwrap();
//! assert_eq!(plaintext, b"attack at dawn");
//! ```

use rand::{CryptoRng, RngCore};

use crate::aes::{self, gcm};
use crate::error::CryptoError;
use crate::key::{EncryptedMessage, EncryptionAlgorithm, EncryptionKey};

/// Rejects keys that do not belong to the AES family.
fn check_algorithm(algorithm: EncryptionAlgorithm) -> Result<(), CryptoError> {
    match algorithm {
        EncryptionAlgorithm::Aes128
        | EncryptionAlgorithm::Aes192
        | EncryptionAlgorithm::Aes256 => Ok(()),
        other => Err(CryptoError::UnsupportedAlgorithm { algorithm: other }),
    }
}

/// Generates a fresh AES key of the requested size.
///
/// # Errors
/// Returns [`CryptoError::UnsupportedAlgorithm`] for non-AES algorithms.
pub fn generate_key<R: RngCore + CryptoRng>(
    rng: &mut R,
    algorithm: EncryptionAlgorithm,
) -> Result<EncryptionKey, CryptoError> {
    check_algorithm(algorithm)?;
    Ok(EncryptionKey::generate(rng, algorithm))
}

/// Encrypts `plaintext` under `key` with a fresh random IV.
///
/// # Returns
/// An [`EncryptedMessage`] holding `ciphertext ‖ tag` and the IV.
///
/// # Errors
/// Returns [`CryptoError::UnsupportedAlgorithm`] if `key` is not an AES
/// key.
pub fn encrypt<R: RngCore + CryptoRng>(
    rng: &mut R,
    plaintext: &[u8],
    key: &EncryptionKey,
) -> Result<EncryptedMessage, CryptoError> {
    check_algorithm(key.algorithm())?;
    let round_keys = aes::expand_key(key.bytes(), key.algorithm().rounds())?;
    let mut iv = [0u8; gcm::IV_SIZE];
    rng.fill_bytes(&mut iv);
    let (mut bytes, tag) = gcm::encrypt(&round_keys, &iv, b"", plaintext);
    bytes.extend_from_slice(&tag);
    Ok(EncryptedMessage::new(
        key.algorithm(),
        Some(iv.to_vec()),
        bytes,
    ))
}

/// Authenticates and decrypts `message` under `key`.
///
/// # Errors
/// - [`CryptoError::UnsupportedAlgorithm`] if the key is not AES or the
///   message was produced under a different algorithm;
/// - [`CryptoError::MissingNonceOrIv`] if the message carries no IV;
/// - [`CryptoError::InvalidBlockLength`] for a wrong-sized IV or a body
///   shorter than the tag;
/// - [`CryptoError::AuthenticationFailure`] on tag mismatch — no
///   plaintext is released.
pub fn decrypt(message: &EncryptedMessage, key: &EncryptionKey) -> Result<Vec<u8>, CryptoError> {
    check_algorithm(key.algorithm())?;
    if message.algorithm() != key.algorithm() {
        return Err(CryptoError::UnsupportedAlgorithm {
            algorithm: message.algorithm(),
        });
    }
    let iv = message.iv().ok_or(CryptoError::MissingNonceOrIv)?;
    let iv: [u8; gcm::IV_SIZE] = iv.try_into().map_err(|_| CryptoError::InvalidBlockLength {
        expected: gcm::IV_SIZE,
        got: iv.len(),
    })?;
    let bytes = message.bytes();
    if bytes.len() < gcm::TAG_SIZE {
        return Err(CryptoError::InvalidBlockLength {
            expected: gcm::TAG_SIZE,
            got: bytes.len(),
        });
    }
    let (ciphertext, tag_bytes) = bytes.split_at(bytes.len() - gcm::TAG_SIZE);
    let mut tag = [0u8; gcm::TAG_SIZE];
    tag.copy_from_slice(tag_bytes);
    let round_keys = aes::expand_key(key.bytes(), key.algorithm().rounds())?;
    gcm::decrypt(&round_keys, &iv, b"", ciphertext, &tag)
}
