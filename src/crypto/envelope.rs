// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire Envelope
//!
//! The sole transport unit for protected payloads:
//!
//! ```text
//! { "iv": "<base64 nonce>", "data": "<base64 ciphertext||tag>" }
//! ```
//!
//! Status codes travel out-of-band on the HTTP layer, never inside the
//! envelope. Success and error bodies share this exact shape, so failure
//! responses are indistinguishable in format from success responses to a
//! network observer.

use serde::{Deserialize, Serialize};

/// Encrypted request/response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// Base64-encoded 12-byte nonce, single-use, random per encryption
    pub iv: String,
    /// Base64-encoded ciphertext with the 16-byte authentication tag appended
    pub data: String,
}
