//! cipherkit: a self-contained symmetric encryption engine.
//!
//! Implements AES (FIPS 197) with GCM (NIST SP 800-38D), DES and
//! Triple-DES (FIPS 46-3) with CBC and PKCS5 padding, and
//! ChaCha20-Poly1305 (RFC 8439) from first principles — permutation
//! tables, S-boxes, GF(2^128) multiplication and base-2^26 limb
//! arithmetic included — with no platform crypto provider underneath.
//!
//! # Architecture
//!
//! ```text
//! EncryptionAlgorithm  (descriptors — key/IV sizes, round counts)
//!     ↓
//! aes / des / chacha20 / poly1305   (block and stream primitives)
//!     ↓
//! aes::gcm / des::cbc + des::padding / aead   (operating modes)
//!     ↓
//! service::{aes_gcm, triple_des_cbc, chacha20_poly1305}   (facades)
//! ```
//!
//! Every engine function is pure, synchronous and free of shared state;
//! concurrent use on independent inputs needs no synchronization. The
//! only external dependency is the CSPRNG injected into key/IV
//! generation.
//!
//! Tag comparisons run in constant time. Table lookups do not; this
//! crate makes no claim of resistance to timing side channels beyond
//! the comparison step.
//!
//! # Examples
//!
//! Authenticated encryption through a facade:
//!
//! ```
//! use cipherkit::service::aes_gcm;
//! use cipherkit::EncryptionAlgorithm;
//!
//! let mut rng = rand::thread_rng();
//! let key = aes_gcm::generate_key(&mut rng, EncryptionAlgorithm::Aes256).unwrap();
//!
//! let message = aes_gcm::encrypt(&mut rng, b"meet me at the usual place", &key).unwrap();
//! let plaintext = aes_gcm::decrypt(&message, &key).unwrap();
//! assert_eq!(plaintext, b"meet me at the usual place");
//! ```
//!
//! Tampering is always detected on the AEAD paths:
//!
//! ```
//! use cipherkit::service::chacha20_poly1305;
//! use cipherkit::{CryptoError, EncryptedMessage, EncryptionAlgorithm};
//!
//! let mut rng = rand::thread_rng();
//! let key = chacha20_poly1305::generate_key(&mut rng, EncryptionAlgorithm::ChaCha20).unwrap();
//! let message = chacha20_poly1305::encrypt(&mut rng, b"payload", &key).unwrap();
//!
//! let mut bytes = message.bytes().to_vec();
//! bytes[0] ^= 1;
//! let tampered = EncryptedMessage::new(
//!     message.algorithm(),
//!     message.iv().map(|iv| iv.to_vec()),
//!     bytes,
//! );
//! assert_eq!(
//!     chacha20_poly1305::decrypt(&tampered, &key),
//!     Err(CryptoError::AuthenticationFailure)
//! );
//! ```

#![deny(clippy::all)]

pub mod aead;
pub mod aes;
pub mod chacha20;
pub mod des;
pub mod error;
pub mod key;
pub mod poly1305;
pub mod service;

pub use error::CryptoError;
pub use key::{EncryptedMessage, EncryptionAlgorithm, EncryptionKey};
