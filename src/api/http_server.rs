// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP Server
//!
//! Router assembly and startup. The gate middleware wraps every route;
//! per-route protection is decided by [`GateConfig`] path matching.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::auth::{
    Argon2PasswordHasher, AuthService, HmacVerifier, TokenService, TokenVerifier,
};
use crate::crypto::CryptoError;
use crate::store::{MemoryUserStore, UserStore};

use super::chat::{ChatBackend, EchoBackend};
use super::gate::{auth_gate, GateConfig};
use super::handlers::{
    chat_completions_handler, health_handler, login_handler, register_handler,
};
use super::transport::SecureTransport;

/// Shared per-request state
#[derive(Clone)]
pub struct AppState {
    pub transport: SecureTransport,
    pub tokens: TokenService,
    pub auth: Arc<AuthService>,
    pub gate: Arc<GateConfig>,
    pub gate_verifier: Arc<dyn TokenVerifier>,
    pub chat: Arc<dyn ChatBackend>,
}

impl AppState {
    /// Assemble state from explicit components
    pub fn new(
        transport: SecureTransport,
        tokens: TokenService,
        signing_secret: &[u8],
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn crate::auth::PasswordHasher>,
        chat: Arc<dyn ChatBackend>,
        gate: GateConfig,
    ) -> Self {
        let auth = Arc::new(AuthService::new(store, hasher, tokens.clone()));
        Self {
            transport,
            tokens,
            auth,
            gate: Arc::new(gate),
            gate_verifier: Arc::new(HmacVerifier::new(signing_secret)),
            chat,
        }
    }

    /// Assemble state from the environment with the default collaborators
    ///
    /// # Errors
    ///
    /// Fails if the encryption key is missing or malformed — a fatal
    /// startup condition.
    pub fn from_env() -> Result<Self, CryptoError> {
        let secret = crate::auth::signing_secret();
        Ok(Self::new(
            SecureTransport::from_env()?,
            TokenService::from_env(),
            secret,
            Arc::new(MemoryUserStore::new()),
            Arc::new(Argon2PasswordHasher),
            Arc::new(EchoBackend),
            GateConfig::default(),
        ))
    }
}

/// Build the full router with gate and CORS layers
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Auth routes (gate-exempt, envelope-protected)
        .route("/v1/auth/login", post(login_handler))
        .route("/v1/auth/register", post(register_handler))
        // Protected chat route family
        .route("/v1/chat/completions", post(chat_completions_handler))
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn start_server(state: AppState, listen_addr: &str) -> Result<()> {
    let app = build_router(state);

    let addr = listen_addr.parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
