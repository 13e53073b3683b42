// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Auth Orchestration
//!
//! Login and register flows composing the token service with the
//! external user-store and password-hash collaborators. Every failure is
//! returned as an [`ApiError`] and funnelled into the encrypted error
//! path at the handler boundary.
//!
//! Login never reveals which of email/password was wrong: an unknown
//! email and a mismatched password produce the identical message.
//! Register checks email uniqueness before username uniqueness (the
//! second check does not run if the first rejected) and does NOT issue a
//! token — the client logs in separately.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::errors::{
    ApiError, MSG_DUPLICATE_IDENTITY, MSG_EMAIL_TAKEN, MSG_INVALID_CREDENTIALS, MSG_USERNAME_TAKEN,
};
use crate::store::{NewUser, PublicUser, StoreError, UserStore};

use super::password::PasswordHasher;
use super::token::TokenService;
use super::validation::{validate_login, validate_register, LoginRequest, RegisterRequest};

/// Successful login response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

/// Successful register response body (no token: register is not a login)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Login/register orchestrator
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenService,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Validate credentials and issue a session token
    pub async fn login(&self, input: LoginRequest) -> Result<LoginResponse, ApiError> {
        validate_login(&input)?;

        let user = self.store.find_by_email(&input.email).await?;
        let Some(user) = user else {
            debug!("login rejected: unknown email");
            return Err(ApiError::Unauthorized(MSG_INVALID_CREDENTIALS.to_string()));
        };

        if !self.hasher.verify(&input.password, &user.password_hash).await {
            debug!("login rejected: password mismatch");
            return Err(ApiError::Unauthorized(MSG_INVALID_CREDENTIALS.to_string()));
        }

        let token = self
            .tokens
            .issue(&user.id, &user.email, &user.username)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        info!("user logged in: {}", user.id);
        Ok(LoginResponse {
            message: "login successful".to_string(),
            token,
            user: PublicUser::from(&user),
        })
    }

    /// Validate input, enforce uniqueness and create the user record
    pub async fn register(&self, input: RegisterRequest) -> Result<RegisterResponse, ApiError> {
        validate_register(&input)?;

        if self.store.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::Conflict(MSG_EMAIL_TAKEN.to_string()));
        }
        if self.store.find_by_username(&input.username).await?.is_some() {
            return Err(ApiError::Conflict(MSG_USERNAME_TAKEN.to_string()));
        }

        let password_hash = self
            .hasher
            .hash(&input.password)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let user = self
            .store
            .create(NewUser {
                email: input.email,
                username: input.username,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                // Lookup-then-insert race lost: report the same generic conflict
                StoreError::Conflict => ApiError::Conflict(MSG_DUPLICATE_IDENTITY.to_string()),
                other => ApiError::from(other),
            })?;

        info!("user registered: {}", user.id);
        Ok(RegisterResponse {
            message: "registration successful".to_string(),
            user: PublicUser::from(&user),
        })
    }
}
