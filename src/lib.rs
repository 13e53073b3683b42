// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod auth;
pub mod crypto;
pub mod store;

// Re-export main types
pub use api::{
    build_router, start_server, ApiError, AppState, ChatBackend, ChatCompletionRequest,
    ChatCompletionResponse, EchoBackend, ErrorBody, GateConfig, SecureTransport,
};
pub use auth::{
    extract_bearer_token, Argon2PasswordHasher, AuthService, Claims, HmacVerifier, JwtVerifier,
    LoginRequest, PasswordHasher, RegisterRequest, TokenService, TokenVerifier, TOKEN_TTL_SECS,
};
pub use crypto::{EncryptedEnvelope, PayloadCipher};
pub use store::{MemoryUserStore, NewUser, PublicUser, StoreError, User, UserStore};
