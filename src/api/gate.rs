// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request Gate
//!
//! Middleware that intercepts every inbound request and, for protected
//! path prefixes, requires a verifiable `Bearer` token before the
//! handler runs. Login and register are explicitly exempt even though
//! they can sit under a protected prefix.
//!
//! The gate operates on request metadata only — it never touches the
//! (encrypted) body, and its 401 rejection is a plain response rather
//! than an encrypted envelope. It uses its own [`TokenVerifier`] backend
//! (see `auth::verifier::HmacVerifier`) and does not mutate or consume
//! the token; handlers re-verify on their own path.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::auth::extract_bearer_token;

use super::http_server::AppState;

/// Protected-path configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Prefixes that require a verified token
    pub protected_prefixes: Vec<String>,
    /// Exact paths that pass unchecked even under a protected prefix
    pub exempt_paths: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: vec!["/v1/chat".to_string()],
            exempt_paths: vec![
                "/v1/auth/login".to_string(),
                "/v1/auth/register".to_string(),
            ],
        }
    }
}

impl GateConfig {
    /// Whether a request path must present a verified token
    pub fn requires_auth(&self, path: &str) -> bool {
        if self.exempt_paths.iter().any(|p| p == path) {
            return false;
        }
        self.protected_prefixes.iter().any(|p| path.starts_with(p))
    }
}

/// Gate middleware: allow or deny, nothing else
pub async fn auth_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if !state.gate.requires_auth(path) {
        return next.run(req).await;
    }

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(token) = extract_bearer_token(header_value) else {
        debug!("gate rejected {}: no bearer token", path);
        return unauthorized();
    };

    if state.gate_verifier.verify(token).is_none() {
        debug!("gate rejected {}: token failed verification", path);
        return unauthorized();
    }

    next.run(req).await
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
}
