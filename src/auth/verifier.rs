// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Token Verifier Capability
//!
//! Two independent implementations of one verification interface. The
//! request gate runs in front of every protected route and may execute in
//! an environment without the handler's JWT library, so it carries its own
//! HMAC backend. Both implementations validate the identical compact JWS
//! format (HS256) and the same claims; neither shares crypto code with
//! the other.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::debug;

use super::token::{unix_now, Claims, TokenService};

type HmacSha256 = Hmac<Sha256>;

/// Verifies a session token, returning its claims or `None`
///
/// Implementations must treat every failure mode identically from the
/// caller's point of view.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Option<Claims>;
}

/// Handler-path verifier: delegates to [`TokenService`] (jsonwebtoken)
#[derive(Clone)]
pub struct JwtVerifier {
    tokens: TokenService,
}

impl JwtVerifier {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Option<Claims> {
        self.tokens.verify(token)
    }
}

#[derive(Deserialize)]
struct JwsHeader {
    alg: String,
}

/// Gate-path verifier: standalone HMAC-SHA256 over the compact JWS
///
/// Splits the three-part token itself, recomputes the signature over
/// `header.payload` with a constant-time comparison, then checks expiry.
pub struct HmacVerifier {
    secret: Vec<u8>,
}

impl HmacVerifier {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: secret.to_vec(),
        }
    }

    fn verify_inner(&self, token: &str) -> Option<Claims> {
        // 1. Exactly three dot-separated parts
        let mut parts = token.split('.');
        let header_b64 = parts.next()?;
        let payload_b64 = parts.next()?;
        let signature_b64 = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        // 2. Only HS256 is ever issued; reject anything else outright
        let header_bytes = URL_SAFE_NO_PAD.decode(header_b64).ok()?;
        let header: JwsHeader = serde_json::from_slice(&header_bytes).ok()?;
        if header.alg != "HS256" {
            return None;
        }

        // 3. Recompute the signature over the signing input
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature).ok()?;

        // 4. Claims are trusted only after the signature holds
        let payload_bytes = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        let claims: Claims = serde_json::from_slice(&payload_bytes).ok()?;
        if claims.exp <= unix_now() {
            return None;
        }

        Some(claims)
    }
}

impl TokenVerifier for HmacVerifier {
    fn verify(&self, token: &str) -> Option<Claims> {
        let claims = self.verify_inner(token);
        if claims.is_none() {
            debug!("gate verifier rejected token");
        }
        claims
    }
}
