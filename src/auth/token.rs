// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session Token Service
//!
//! Issues and verifies the stateless signed session tokens that carry a
//! logged-in user's identity. Tokens are compact JWS strings
//! (`header.payload.signature`, HS256) asserting subject id, email and
//! username plus issued-at and expiry claims.
//!
//! Lifecycle: issued at successful login, never stored server-side, dead
//! at `iat + 7 days` or whenever the client discards it. There is no
//! revocation list; expiry is evaluated against the wall clock at
//! verification time.
//!
//! The signing secret comes from `JWT_SECRET` and is cached for the
//! process lifetime. Verification failures return `None` — callers treat
//! every failure uniformly as "unauthenticated"; the cause is logged at
//! `debug` only.

use std::env;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed token lifetime: 7 days (not externally configurable)
pub const TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Signing secret variable
pub const SIGNING_SECRET_VAR: &str = "JWT_SECRET";

const DEFAULT_SIGNING_SECRET: &str = "your-secret-key-change-in-production";

static SIGNING_SECRET: OnceLock<Vec<u8>> = OnceLock::new();

/// Claims asserted by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject id (user id)
    pub sub: String,
    pub email: String,
    pub username: String,
    /// Issued-at, seconds since the unix epoch
    pub iat: u64,
    /// Expiry, seconds since the unix epoch (`iat` + 7 days)
    pub exp: u64,
}

/// Current wall-clock time in seconds since the unix epoch
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Process-wide cached signing secret
///
/// Reads `JWT_SECRET` on first use, falling back to an insecure
/// development default. Cached for the process lifetime.
pub fn signing_secret() -> &'static [u8] {
    SIGNING_SECRET.get_or_init(|| {
        env::var(SIGNING_SECRET_VAR)
            .unwrap_or_else(|_| DEFAULT_SIGNING_SECRET.to_string())
            .into_bytes()
    })
}

/// Extract the token from an `Authorization` header value
///
/// Accepts only the `Bearer <token>` scheme; any other scheme or an
/// absent header yields `None`.
pub fn extract_bearer_token(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix("Bearer ")
}

/// Issues and verifies HS256 session tokens under one signing secret
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Build a service over an explicit signing secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Build a service over the process-wide cached `JWT_SECRET`
    pub fn from_env() -> Self {
        Self::new(signing_secret())
    }

    /// Issue a token for the given user, valid for 7 days from now
    pub fn issue(&self, subject_id: &str, email: &str, username: &str) -> Result<String> {
        self.issue_at(subject_id, email, username, unix_now())
    }

    /// Issue a token with an explicit issued-at instant
    ///
    /// Expiry is always `issued_at` + 7 days. Exposed so tests can
    /// simulate clock movement without waiting.
    pub fn issue_at(
        &self,
        subject_id: &str,
        email: &str,
        username: &str,
        issued_at: u64,
    ) -> Result<String> {
        let claims = Claims {
            sub: subject_id.to_string(),
            email: email.to_string(),
            username: username.to_string(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding).context("failed to sign session token")
    }

    /// Verify a token's signature and expiry
    ///
    /// Returns the claims on success, `None` on any failure. Malformed,
    /// expired and tampered tokens are indistinguishable to the caller;
    /// the distinction is retained in server logs only.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding, &Validation::default()) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!("token rejected: {}", e);
                None
            }
        }
    }
}
