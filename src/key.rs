//! Algorithm descriptors, key material and ciphertext envelopes.
//!
//! Everything here is an immutable value object: keys and IVs are
//! generated once per request, ciphertext and tag are computed once and
//! returned. Nothing is updated in place.

use std::fmt;
use std::time::SystemTime;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Supported symmetric algorithms.
///
/// Each variant fixes the key size, round count and IV/nonce size used
/// by the corresponding engine and facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncryptionAlgorithm {
    /// AES with a 128-bit key in GCM mode.
    Aes128,
    /// AES with a 192-bit key in GCM mode.
    Aes192,
    /// AES with a 256-bit key in GCM mode.
    Aes256,
    /// ChaCha20 with a 256-bit key, authenticated with Poly1305.
    ChaCha20,
    /// Two-key Triple-DES (EDE) in CBC mode, 112 effective key bits.
    TripleDes112,
    /// Three-key Triple-DES (EDE) in CBC mode, 168 effective key bits.
    TripleDes168,
}

impl EncryptionAlgorithm {
    /// Every supported algorithm, for table-driven tests and callers
    /// that enumerate the catalogue.
    pub const ALL: [EncryptionAlgorithm; 6] = [
        EncryptionAlgorithm::Aes128,
        EncryptionAlgorithm::Aes192,
        EncryptionAlgorithm::Aes256,
        EncryptionAlgorithm::ChaCha20,
        EncryptionAlgorithm::TripleDes112,
        EncryptionAlgorithm::TripleDes168,
    ];

    /// Key size in bytes.
    pub const fn key_size_bytes(self) -> usize {
        match self {
            EncryptionAlgorithm::Aes128 => 16,
            EncryptionAlgorithm::Aes192 => 24,
            EncryptionAlgorithm::Aes256 => 32,
            EncryptionAlgorithm::ChaCha20 => 32,
            EncryptionAlgorithm::TripleDes112 => 16,
            EncryptionAlgorithm::TripleDes168 => 24,
        }
    }

    /// IV/nonce size in bytes for the algorithm's operating mode
    /// (GCM and ChaCha20-Poly1305: 12, Triple-DES-CBC: 8).
    pub const fn iv_size_bytes(self) -> usize {
        match self {
            EncryptionAlgorithm::Aes128
            | EncryptionAlgorithm::Aes192
            | EncryptionAlgorithm::Aes256
            | EncryptionAlgorithm::ChaCha20 => 12,
            EncryptionAlgorithm::TripleDes112 | EncryptionAlgorithm::TripleDes168 => 8,
        }
    }

    /// Number of cipher rounds (AES: 10/12/14, ChaCha20: 20, DES: 16).
    pub const fn rounds(self) -> usize {
        match self {
            EncryptionAlgorithm::Aes128 => 10,
            EncryptionAlgorithm::Aes192 => 12,
            EncryptionAlgorithm::Aes256 => 14,
            EncryptionAlgorithm::ChaCha20 => 20,
            EncryptionAlgorithm::TripleDes112 | EncryptionAlgorithm::TripleDes168 => 16,
        }
    }

    /// Conventional display name.
    pub const fn name(self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes128 => "AES-128",
            EncryptionAlgorithm::Aes192 => "AES-192",
            EncryptionAlgorithm::Aes256 => "AES-256",
            EncryptionAlgorithm::ChaCha20 => "ChaCha20",
            EncryptionAlgorithm::TripleDes112 => "3DES-112",
            EncryptionAlgorithm::TripleDes168 => "3DES-168",
        }
    }
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw symmetric key material tagged with its algorithm.
///
/// The length invariant `bytes.len() == algorithm.key_size_bytes()` is
/// enforced at construction, so no cipher operation ever runs with a
/// malformed key. Key bytes are wiped on drop and redacted from `Debug`
/// output.
///
/// # Examples
///
/// ```
/// use cipherkit::{EncryptionAlgorithm, EncryptionKey};
///
/// let mut rng = rand::thread_rng();
/// let key = EncryptionKey::generate(&mut rng, EncryptionAlgorithm::Aes256);
/// assert_eq!(key.bytes().len(), 32);
/// ```
#[derive(Clone)]
pub struct EncryptionKey {
    id: String,
    algorithm: EncryptionAlgorithm,
    bytes: Vec<u8>,
    created_at: SystemTime,
}

impl EncryptionKey {
    /// Generates a fresh key for `algorithm` from the injected CSPRNG.
    ///
    /// The key always has exactly `algorithm.key_size_bytes()` bytes and
    /// a random 128-bit hex identity.
    pub fn generate<R: RngCore + CryptoRng>(
        rng: &mut R,
        algorithm: EncryptionAlgorithm,
    ) -> EncryptionKey {
        let mut bytes = vec![0u8; algorithm.key_size_bytes()];
        rng.fill_bytes(&mut bytes);
        let mut id_bytes = [0u8; 16];
        rng.fill_bytes(&mut id_bytes);
        EncryptionKey {
            id: format!("{:032x}", u128::from_be_bytes(id_bytes)),
            algorithm,
            bytes,
            created_at: SystemTime::now(),
        }
    }

    /// Reassembles a key from externally stored parts (the caller owns
    /// key persistence).
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidKeyLength`] if `bytes` does not
    /// match the algorithm's key size.
    pub fn from_parts(
        id: impl Into<String>,
        algorithm: EncryptionAlgorithm,
        bytes: Vec<u8>,
        created_at: SystemTime,
    ) -> Result<EncryptionKey, CryptoError> {
        if bytes.len() != algorithm.key_size_bytes() {
            return Err(CryptoError::InvalidKeyLength {
                expected: algorithm.key_size_bytes(),
                got: bytes.len(),
            });
        }
        Ok(EncryptionKey {
            id: id.into(),
            algorithm,
            bytes,
            created_at,
        })
    }

    /// The key's identity, stable for its whole lifetime.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The algorithm this key belongs to.
    pub fn algorithm(&self) -> EncryptionAlgorithm {
        self.algorithm
    }

    /// The raw key bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// When the key was created.
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }
}

impl Drop for EncryptionKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("id", &self.id)
            .field("algorithm", &self.algorithm)
            .field("bytes", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// The output of one encryption request.
///
/// For the AEAD modes (AES-GCM, ChaCha20-Poly1305) `bytes` is
/// `ciphertext ‖ tag` with the tag in the final 16 bytes; for
/// Triple-DES-CBC it is the PKCS5-padded, block-aligned ciphertext.
/// The IV/nonce drawn for the request travels alongside; decryption
/// without it fails with [`CryptoError::MissingNonceOrIv`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedMessage {
    algorithm: EncryptionAlgorithm,
    iv: Option<Vec<u8>>,
    bytes: Vec<u8>,
}

impl EncryptedMessage {
    /// Packages ciphertext produced under `algorithm` with its IV/nonce.
    pub fn new(
        algorithm: EncryptionAlgorithm,
        iv: Option<Vec<u8>>,
        bytes: Vec<u8>,
    ) -> EncryptedMessage {
        EncryptedMessage {
            algorithm,
            iv,
            bytes,
        }
    }

    /// The algorithm that produced this message.
    pub fn algorithm(&self) -> EncryptionAlgorithm {
        self.algorithm
    }

    /// The IV/nonce used for encryption, if one was recorded.
    pub fn iv(&self) -> Option<&[u8]> {
        self.iv.as_deref()
    }

    /// Ciphertext bytes (including the trailing tag for AEAD modes).
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
