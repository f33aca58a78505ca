//! Per-algorithm encryption facades.
//!
//! Each submodule fronts one engine with the same three operations:
//! `generate_key`, `encrypt` and `decrypt`. The facades own input
//! validation — algorithm/key agreement, IV presence and length,
//! minimum ciphertext length — and never let a malformed request reach
//! the engines. Randomness is injected per call: pass any
//! `RngCore + CryptoRng` (`OsRng`, `thread_rng()`, or a seeded
//! `StdRng` in tests).
//!
//! The facades are stateless free functions; there is nothing to
//! construct or share between threads.

pub mod aes_gcm;
pub mod chacha20_poly1305;
pub mod triple_des_cbc;
