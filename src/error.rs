//! Error types for the cipherkit library.

use thiserror::Error;

use crate::key::EncryptionAlgorithm;

/// Errors produced by the cipherkit engines and facades.
///
/// Every failure is a value returned to the caller; the engines never
/// panic across the crate boundary and never retry (all operations are
/// deterministic, so a retry cannot change the outcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The key's algorithm is not handled by the invoked cipher facade,
    /// or the message and key disagree about the algorithm.
    #[error("algorithm {algorithm} is not supported by this cipher")]
    UnsupportedAlgorithm {
        /// The offending algorithm.
        algorithm: EncryptionAlgorithm,
    },

    /// Key material does not match the algorithm's key size.
    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    /// An IV, nonce or ciphertext has the wrong length for the mode.
    #[error("invalid IV or ciphertext length: expected {expected} bytes, got {got}")]
    InvalidBlockLength { expected: usize, got: usize },

    /// Decryption was requested without the IV/nonce the mode requires.
    #[error("decryption requires the IV/nonce used during encryption")]
    MissingNonceOrIv,

    /// The authentication tag did not match; the ciphertext or tag has
    /// been corrupted or tampered with. No plaintext is released.
    #[error("authentication tag mismatch")]
    AuthenticationFailure,

    /// PKCS5 padding did not validate after block decryption; the
    /// ciphertext has been corrupted or the wrong key was used.
    #[error("malformed PKCS5 padding")]
    PaddingValidationFailure,
}
