//! Triple-DES-CBC encryption facade.
//!
//! Accepts two-key (112-bit) and three-key (168-bit) Triple-DES keys,
//! draws a fresh 8-byte IV per encryption, and applies PKCS5 padding
//! around CBC mode. CBC has no authentication tag; tampering surfaces
//! as a padding validation failure at best, so prefer the AEAD facades
//! where integrity matters.
//!
//! # Examples
//!
//! ```
//! use cipherkit::service::triple_des_cbc;
//! use cipherkit::EncryptionAlgorithm;
//!
//! let mut rng = rand::thread_rng();
//! let key =
//!     triple_des_cbc::generate_key(&mut rng, EncryptionAlgorithm::TripleDes168).unwrap();
//! let message = triple_des_cbc::encrypt(&mut rng, b"legacy interop", &key).unwrap();
//! assert_eq!(
//!     triple_des_cbc::decrypt(&message, &key).unwrap(),
//!     b"legacy interop"
//! );
//! ```

use rand::{CryptoRng, RngCore};

use crate::des::{self, cbc, padding, TripleDes};
use crate::error::CryptoError;
use crate::key::{EncryptedMessage, EncryptionAlgorithm, EncryptionKey};

/// Rejects keys that do not belong to the Triple-DES family.
fn check_algorithm(algorithm: EncryptionAlgorithm) -> Result<(), CryptoError> {
    match algorithm {
        EncryptionAlgorithm::TripleDes112 | EncryptionAlgorithm::TripleDes168 => Ok(()),
        other => Err(CryptoError::UnsupportedAlgorithm { algorithm: other }),
    }
}

/// Generates a fresh two-key or three-key Triple-DES key.
///
/// # Errors
/// Returns [`CryptoError::UnsupportedAlgorithm`] for non-Triple-DES
/// algorithms.
pub fn generate_key<R: RngCore + CryptoRng>(
    rng: &mut R,
    algorithm: EncryptionAlgorithm,
) -> Result<EncryptionKey, CryptoError> {
    check_algorithm(algorithm)?;
    Ok(EncryptionKey::generate(rng, algorithm))
}

/// Pads and encrypts `plaintext` under `key` with a fresh random IV.
///
/// # Returns
/// An [`EncryptedMessage`] holding the block-aligned ciphertext and the
/// IV. The ciphertext is always at least one block long: PKCS5 padding
/// adds a full block to already-aligned input.
///
/// # Errors
/// Returns [`CryptoError::UnsupportedAlgorithm`] if `key` is not a
/// Triple-DES key.
pub fn encrypt<R: RngCore + CryptoRng>(
    rng: &mut R,
    plaintext: &[u8],
    key: &EncryptionKey,
) -> Result<EncryptedMessage, CryptoError> {
    check_algorithm(key.algorithm())?;
    let cipher = TripleDes::new(key.bytes())?;
    let mut iv = [0u8; des::BLOCK_SIZE];
    rng.fill_bytes(&mut iv);
    let padded = padding::pkcs5_pad(plaintext);
    let bytes = cbc::encrypt(&cipher, &iv, &padded)?;
    Ok(EncryptedMessage::new(
        key.algorithm(),
        Some(iv.to_vec()),
        bytes,
    ))
}

/// Decrypts `message` under `key` and strips the padding.
///
/// # Errors
/// - [`CryptoError::UnsupportedAlgorithm`] if the key is not Triple-DES
///   or the message was produced under a different algorithm;
/// - [`CryptoError::MissingNonceOrIv`] if the message carries no IV;
/// - [`CryptoError::InvalidBlockLength`] for a wrong-sized IV or a
///   ciphertext that is empty or not 8-byte aligned;
/// - [`CryptoError::PaddingValidationFailure`] if the decrypted padding
///   is malformed (corruption, tampering, or the wrong key).
pub fn decrypt(message: &EncryptedMessage, key: &EncryptionKey) -> Result<Vec<u8>, CryptoError> {
    check_algorithm(key.algorithm())?;
    if message.algorithm() != key.algorithm() {
        return Err(CryptoError::UnsupportedAlgorithm {
            algorithm: message.algorithm(),
        });
    }
    let iv = message.iv().ok_or(CryptoError::MissingNonceOrIv)?;
    let iv: [u8; des::BLOCK_SIZE] =
        iv.try_into().map_err(|_| CryptoError::InvalidBlockLength {
            expected: des::BLOCK_SIZE,
            got: iv.len(),
        })?;
    let bytes = message.bytes();
    if bytes.is_empty() || bytes.len() % des::BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidBlockLength {
            expected: des::BLOCK_SIZE,
            got: bytes.len(),
        });
    }
    let cipher = TripleDes::new(key.bytes())?;
    let padded = cbc::decrypt(&cipher, &iv, bytes)?;
    padding::pkcs5_unpad(&padded)
}
