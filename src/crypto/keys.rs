// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Encryption Key Loading
//!
//! Loads the shared 256-bit payload encryption key from the environment.
//! The same raw key is provisioned on both sides of the transport: the
//! server reads `API_CRYPTO_KEY` and clients are shipped the identical
//! bytes under `PUBLIC_API_CRYPTO_KEY`, so the server accepts either
//! variable (server-side name wins).
//!
//! ## Security Considerations
//!
//! - Key must be exactly 32 bytes of base64
//! - The key material is NEVER logged
//! - A missing or malformed key is a fatal configuration error, not a
//!   per-request error
//!
//! The decoded key is cached for the lifetime of the process. Concurrent
//! first callers may decode twice; the decode is deterministic and
//! `OnceLock` publishes exactly one value, so the race is harmless.

use std::env;
use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::info;

use super::error::CryptoError;

/// Required raw key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Server-side key variable
pub const SERVER_KEY_VAR: &str = "API_CRYPTO_KEY";

/// Client-facing key variable (same raw bytes, different provisioning path)
pub const CLIENT_KEY_VAR: &str = "PUBLIC_API_CRYPTO_KEY";

static ENCRYPTION_KEY: OnceLock<[u8; KEY_LEN]> = OnceLock::new();

/// Decode a base64 key string into raw key bytes
///
/// # Errors
///
/// Returns `CryptoError::InvalidKey` if the string is not valid base64
/// or does not decode to exactly 32 bytes.
pub fn decode_key(raw: &str) -> Result<[u8; KEY_LEN], CryptoError> {
    let bytes = BASE64
        .decode(raw.trim())
        .map_err(|e| CryptoError::InvalidKey {
            reason: format!("not valid base64: {}", e),
        })?;

    let len = bytes.len();
    bytes.try_into().map_err(|_| CryptoError::InvalidKey {
        reason: format!("expected {} bytes after decode, got {}", KEY_LEN, len),
    })
}

/// Load the encryption key from the environment
///
/// Reads `API_CRYPTO_KEY`, falling back to `PUBLIC_API_CRYPTO_KEY`.
///
/// # Errors
///
/// - `CryptoError::MissingKey` if neither variable is set
/// - `CryptoError::InvalidKey` if the value is malformed
pub fn load_encryption_key() -> Result<[u8; KEY_LEN], CryptoError> {
    let raw = env::var(SERVER_KEY_VAR)
        .or_else(|_| env::var(CLIENT_KEY_VAR))
        .map_err(|_| CryptoError::MissingKey)?;

    let key = decode_key(&raw)?;
    info!("✅ Payload encryption key loaded");
    Ok(key)
}

/// Process-wide cached encryption key
///
/// Decodes the key from the environment on first use and caches it for
/// the lifetime of the process. Subsequent calls return the cached value
/// without touching the environment again.
pub fn encryption_key() -> Result<&'static [u8; KEY_LEN], CryptoError> {
    if let Some(key) = ENCRYPTION_KEY.get() {
        return Ok(key);
    }

    let key = load_encryption_key()?;
    Ok(ENCRYPTION_KEY.get_or_init(|| key))
}
