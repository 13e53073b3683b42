// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Authentication Module
//!
//! Stateless session tokens and the login/register flows built on them:
//!
//! - **Token**: HS256 compact JWS issuance/verification, 7-day lifetime
//! - **Verifier**: the `TokenVerifier` capability with two independent
//!   backends (handler path and gate path)
//! - **Password**: opaque hash/verify collaborator (Argon2id)
//! - **Validation**: structural credential checks
//! - **Service**: the orchestrator composing store, hasher and tokens

pub mod password;
pub mod service;
pub mod token;
pub mod validation;
pub mod verifier;

pub use password::{Argon2PasswordHasher, PasswordError, PasswordHasher};
pub use service::{AuthService, LoginResponse, RegisterResponse};
pub use token::{
    extract_bearer_token, signing_secret, Claims, TokenService, SIGNING_SECRET_VAR, TOKEN_TTL_SECS,
};
pub use validation::{validate_login, validate_register, LoginRequest, RegisterRequest};
pub use verifier::{HmacVerifier, JwtVerifier, TokenVerifier};
