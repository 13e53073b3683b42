// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! User Store Collaborator
//!
//! The persistent user store is external to this node; the core only
//! depends on the unique-key contract below. `MemoryUserStore` is the
//! in-process implementation used for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Stored user record
///
/// The password hash never serializes; anything leaving the store for a
/// client goes through [`PublicUser`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Client-visible projection of a user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

/// Input for creating a user record
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Store collaborator errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Duplicate-key insert (email or username already present)
    #[error("duplicate key")]
    Conflict,

    /// Backend failure
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Unique-key lookup/insert contract for the external user store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new record, assigning id and creation timestamp
    ///
    /// Surfaces `StoreError::Conflict` if either unique key is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}

/// In-memory user store, keyed by user id
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        // Uniqueness is re-checked under the write lock: the orchestrator's
        // lookups and this insert are separate critical sections
        if users
            .values()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(StoreError::Conflict);
        }

        let record = User {
            id: Uuid::new_v4().to_string(),
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(record.id.clone(), record.clone());
        Ok(record)
    }
}
