// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Secure Transport
//!
//! The request/response contract over the payload cipher: decode then
//! validate inbound, serialize then encrypt outbound. All protected
//! business responses — success and error alike — leave through
//! [`SecureTransport::write_encrypted`], so error messages are
//! confidentiality-protected in transit exactly like success payloads.
//!
//! Inbound failures (envelope JSON, decryption, plaintext JSON) collapse
//! into `ApiError::RequestFormat` with one generic message. The concrete
//! cause is logged at `debug` and is not echoed to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::crypto::{CryptoError, EncryptedEnvelope, PayloadCipher};

use super::errors::{ApiError, ErrorBody};

/// Envelope transport bound to the shared payload cipher
#[derive(Clone)]
pub struct SecureTransport {
    cipher: PayloadCipher,
}

impl SecureTransport {
    pub fn new(cipher: PayloadCipher) -> Self {
        Self { cipher }
    }

    /// Build a transport over the process-wide cached key
    pub fn from_env() -> Result<Self, CryptoError> {
        Ok(Self::new(PayloadCipher::from_env()?))
    }

    /// Parse and decrypt a request body into `T`
    ///
    /// # Errors
    ///
    /// `ApiError::RequestFormat` on any parse or decrypt failure.
    pub fn read_encrypted<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T, ApiError> {
        let envelope: EncryptedEnvelope = serde_json::from_slice(raw).map_err(|e| {
            debug!("request rejected: envelope parse failed: {}", e);
            ApiError::RequestFormat
        })?;

        let plaintext = self.cipher.decrypt_payload(&envelope).map_err(|_| {
            // Cause already logged by the cipher; indistinguishable out here
            ApiError::RequestFormat
        })?;

        serde_json::from_slice(&plaintext).map_err(|e| {
            debug!("request rejected: payload parse failed: {}", e);
            ApiError::RequestFormat
        })
    }

    /// Serialize, encrypt and wrap `data` with the given status code
    ///
    /// # Errors
    ///
    /// Fails only if serialization or the cipher itself fails — a
    /// configuration-level condition, surfaced as `ApiError::Internal`.
    pub fn write_encrypted<T: Serialize>(
        &self,
        data: &T,
        status: StatusCode,
    ) -> Result<Response, ApiError> {
        let json = serde_json::to_vec(data).map_err(|e| ApiError::Internal(e.to_string()))?;
        let envelope = self
            .cipher
            .encrypt_payload(&json)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok((status, Json(envelope)).into_response())
    }

    /// Map an [`ApiError`] to its encrypted error envelope
    ///
    /// Falls back to a bare 500 only when the error body itself cannot be
    /// encrypted (missing/unusable key — fatal territory).
    pub fn error_response(&self, err: ApiError) -> Response {
        if let ApiError::Internal(detail) = &err {
            error!("internal error: {}", detail);
        }

        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            error: err.public_message(),
        };

        match self.write_encrypted(&body, status) {
            Ok(response) => response,
            Err(e) => {
                error!("failed to encrypt error response: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
