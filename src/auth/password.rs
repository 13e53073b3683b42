// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Password Hashing Collaborator
//!
//! One-way salted hashing behind a trait so the auth flows never see the
//! scheme. The shipped implementation uses Argon2id with the library
//! defaults; the digest is a self-describing PHC string carrying its own
//! salt and parameters.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier as _,
};
use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Opaque hash/verify collaborator
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a salted, self-describing digest
    async fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored digest
    ///
    /// An unparseable stored digest counts as a mismatch, not an error.
    async fn verify(&self, password: &str, digest: &str) -> bool;
}

/// Argon2id implementation with library-default cost parameters
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher;

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    async fn verify(&self, password: &str, digest: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("stored password digest unparseable: {}", e);
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
