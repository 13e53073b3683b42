// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Route Handlers
//!
//! Handlers for the auth and chat routes. Protected handlers run their
//! own token verification (`verify_auth`) in addition to the gate — the
//! gate's check happens up front on headers only, this one happens with
//! the full JWT path and rejects with an *encrypted* 401 envelope.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::{extract_bearer_token, Claims, LoginRequest, RegisterRequest};

use super::chat::ChatCompletionRequest;
use super::errors::ApiError;
use super::http_server::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Plain liveness probe, outside the protected transport
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler-level token verification
///
/// Extracts the bearer token and runs the full verification path.
/// Failures collapse into the single generic unauthenticated error.
pub fn verify_auth(state: &AppState, headers: &HeaderMap) -> Result<Claims, ApiError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = extract_bearer_token(header_value).ok_or_else(ApiError::unauthenticated)?;
    state
        .tokens
        .verify(token)
        .ok_or_else(ApiError::unauthenticated)
}

/// POST /v1/auth/login — encrypted envelope in/out
pub async fn login_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let input: LoginRequest = match state.transport.read_encrypted(&body) {
        Ok(input) => input,
        Err(e) => return state.transport.error_response(e),
    };

    match state.auth.login(input).await {
        Ok(success) => state
            .transport
            .write_encrypted(&success, StatusCode::OK)
            .unwrap_or_else(|e| state.transport.error_response(e)),
        Err(e) => state.transport.error_response(e),
    }
}

/// POST /v1/auth/register — encrypted envelope in/out, no token issued
pub async fn register_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let input: RegisterRequest = match state.transport.read_encrypted(&body) {
        Ok(input) => input,
        Err(e) => return state.transport.error_response(e),
    };

    match state.auth.register(input).await {
        Ok(success) => state
            .transport
            .write_encrypted(&success, StatusCode::OK)
            .unwrap_or_else(|e| state.transport.error_response(e)),
        Err(e) => state.transport.error_response(e),
    }
}

/// POST /v1/chat/completions — protected passthrough
pub async fn chat_completions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(e) = verify_auth(&state, &headers) {
        return state.transport.error_response(e);
    }

    let request: ChatCompletionRequest = match state.transport.read_encrypted(&body) {
        Ok(request) => request,
        Err(e) => return state.transport.error_response(e),
    };

    match state.chat.complete(request).await {
        Ok(response) => state
            .transport
            .write_encrypted(&response, StatusCode::OK)
            .unwrap_or_else(|e| state.transport.error_response(e)),
        Err(e) => state.transport.error_response(e),
    }
}
