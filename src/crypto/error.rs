// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crypto Error Types
//!
//! Error types for the payload encryption layer.
//!
//! ## Error Variants
//!
//! - **MissingKey**: no encryption key present in the environment
//! - **InvalidKey**: key present but not 32 bytes of base64
//! - **EncryptionFailed**: AEAD encryption failed (cipher construction or seal)
//! - **DecryptionFailed**: envelope could not be opened
//!
//! `DecryptionFailed` deliberately covers every inbound failure mode —
//! bad base64, short payload, nonce length, tag mismatch — so callers
//! cannot tell (and cannot leak) which check rejected the envelope.
//! The specific cause is logged server-side at `debug` level only.

use thiserror::Error;

/// Error type for payload encryption and key loading
#[derive(Debug, Clone, Error)]
pub enum CryptoError {
    /// Neither `API_CRYPTO_KEY` nor `PUBLIC_API_CRYPTO_KEY` is set
    #[error("missing encryption key: set API_CRYPTO_KEY or PUBLIC_API_CRYPTO_KEY")]
    MissingKey,

    /// Key is set but does not decode to exactly 32 raw bytes
    #[error("invalid encryption key: {reason}")]
    InvalidKey { reason: String },

    /// AEAD seal failed
    #[error("payload encryption failed")]
    EncryptionFailed,

    /// Envelope could not be opened (malformed, truncated, tampered, or wrong key)
    #[error("payload decryption failed")]
    DecryptionFailed,
}
