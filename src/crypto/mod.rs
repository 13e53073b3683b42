// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Payload Encryption Module
//!
//! Cryptographic primitives for the protected request/response transport:
//!
//! - **Envelope**: the `{ iv, data }` wire unit carrying nonce and
//!   ciphertext‖tag
//! - **AES-GCM**: authenticated encryption of JSON payloads under the
//!   shared 256-bit key
//! - **Keys**: environment key loading with a process-lifetime cache
//!
//! ## Security Considerations
//!
//! - The key is a shared secret: both transport directions use the same
//!   32 raw bytes
//! - Nonces are random per encryption and never reused under the key
//! - All inbound failures collapse into one error variant so the reject
//!   path offers no parse-vs-authentication oracle

pub mod aes_gcm;
pub mod envelope;
pub mod error;
pub mod keys;

pub use aes_gcm::{generate_nonce, PayloadCipher, NONCE_LEN, TAG_LEN};
pub use envelope::EncryptedEnvelope;
pub use error::CryptoError;
pub use keys::{decode_key, encryption_key, load_encryption_key, KEY_LEN};
