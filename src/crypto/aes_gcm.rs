// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AES-GCM Payload Encryption
//!
//! Implements the symmetric half of the protected transport: every
//! sensitive request and response body is sealed with AES-256-GCM under
//! the shared key and carried in an [`EncryptedEnvelope`].
//!
//! **Envelope Format**:
//! ```text
//! iv   = 12-byte random nonce (base64 on the wire)
//! data = ciphertext + 16-byte authentication tag (base64 on the wire)
//! ```
//!
//! - Nonce: 12 bytes (96 bits), sampled from the OS CSPRNG per encryption.
//!   Never reused under the fixed key; random sampling over the 96-bit
//!   space keeps the birthday-bound collision probability negligible at
//!   the volumes this node can reach.
//! - Algorithm: AES-256-GCM, no Additional Authenticated Data

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use tracing::debug;

use super::envelope::EncryptedEnvelope;
use super::error::CryptoError;
use super::keys::{self, KEY_LEN};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Nonce length in bytes (96 bits, AES-GCM standard)
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes (128 bits)
pub const TAG_LEN: usize = 16;

/// Sample a fresh random nonce from the OS CSPRNG
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

/// Symmetric payload cipher bound to one 256-bit key
///
/// One cipher, one key, both directions: the client holds the same raw
/// bytes under its public-facing variable, so this is a shared secret
/// rather than a true public/private split.
#[derive(Clone)]
pub struct PayloadCipher {
    key: [u8; KEY_LEN],
}

impl PayloadCipher {
    /// Build a cipher from an explicit raw key
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Build a cipher from the process-wide cached environment key
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::MissingKey` / `CryptoError::InvalidKey` if the
    /// environment does not hold a usable key. This is a fatal
    /// configuration condition, not a per-request error.
    pub fn from_env() -> Result<Self, CryptoError> {
        Ok(Self::new(*keys::encryption_key()?))
    }

    /// Encrypt a plaintext payload into a wire envelope
    ///
    /// Generates a fresh random 12-byte nonce, seals the payload with
    /// AES-256-GCM, and packs nonce and ciphertext‖tag separately.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EncryptionFailed` if the seal fails.
    pub fn encrypt_payload(&self, plaintext: &[u8]) -> Result<EncryptedEnvelope, CryptoError> {
        // 1. Fresh nonce per encryption, never reused under this key
        let nonce_bytes = generate_nonce();
        let nonce = Nonce::from_slice(&nonce_bytes);

        // 2. Seal: output is ciphertext with the tag appended
        let cipher =
            Aes256Gcm::new_from_slice(&self.key).map_err(|_| CryptoError::EncryptionFailed)?;
        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CryptoError::EncryptionFailed)?;

        Ok(EncryptedEnvelope {
            iv: BASE64.encode(nonce_bytes),
            data: BASE64.encode(ciphertext),
        })
    }

    /// Open a wire envelope back into plaintext
    ///
    /// Every failure mode — undecodable base64, wrong nonce length, a
    /// payload no longer than the tag, tag verification failure — maps to
    /// the single `CryptoError::DecryptionFailed` variant. The concrete
    /// cause is logged at `debug` and never surfaced to the caller.
    pub fn decrypt_payload(&self, envelope: &EncryptedEnvelope) -> Result<Vec<u8>, CryptoError> {
        // 1. Decode both envelope fields
        let nonce_bytes = BASE64.decode(&envelope.iv).map_err(|e| {
            debug!("envelope rejected: iv not base64: {}", e);
            CryptoError::DecryptionFailed
        })?;
        let combined = BASE64.decode(&envelope.data).map_err(|e| {
            debug!("envelope rejected: data not base64: {}", e);
            CryptoError::DecryptionFailed
        })?;

        // 2. Structural checks: 12-byte nonce, payload strictly longer than the tag
        if nonce_bytes.len() != NONCE_LEN {
            debug!("envelope rejected: nonce length {}", nonce_bytes.len());
            return Err(CryptoError::DecryptionFailed);
        }
        if combined.len() <= TAG_LEN {
            debug!("envelope rejected: payload length {}", combined.len());
            return Err(CryptoError::DecryptionFailed);
        }

        // 3. Open and verify the authentication tag
        let cipher =
            Aes256Gcm::new_from_slice(&self.key).map_err(|_| CryptoError::DecryptionFailed)?;
        let nonce = Nonce::from_slice(&nonce_bytes);
        cipher.decrypt(nonce, combined.as_slice()).map_err(|_| {
            debug!("envelope rejected: authentication failed");
            CryptoError::DecryptionFailed
        })
    }
}
