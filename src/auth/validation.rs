// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Credential Validation
//!
//! Structural validation of login and register input, run before any
//! store lookup. Rules:
//!
//! - email: must look like an address
//! - login password: non-empty
//! - register password: at least 6 characters
//! - username: 2-20 characters, letters/digits/underscore only

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_USERNAME_LEN: usize = 2;
pub const MAX_USERNAME_LEN: usize = 20;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
    })
}

fn username_regex() -> &'static Regex {
    static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
    USERNAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap())
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    if !email_regex().is_match(email) {
        return Err(ApiError::Validation("invalid email format".to_string()));
    }
    Ok(())
}

/// Validate login credentials structurally
pub fn validate_login(input: &LoginRequest) -> Result<(), ApiError> {
    validate_email(&input.email)?;
    if input.password.is_empty() {
        return Err(ApiError::Validation(
            "password must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate register input structurally
///
/// Checks run in field-priority order (email, password, username) so the
/// first failing field determines the returned message.
pub fn validate_register(input: &RegisterRequest) -> Result<(), ApiError> {
    validate_email(&input.email)?;

    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let username_len = input.username.chars().count();
    if username_len < MIN_USERNAME_LEN || username_len > MAX_USERNAME_LEN {
        return Err(ApiError::Validation(format!(
            "username must be {}-{} characters",
            MIN_USERNAME_LEN, MAX_USERNAME_LEN
        )));
    }
    if !username_regex().is_match(&input.username) {
        return Err(ApiError::Validation(
            "username may only contain letters, numbers and underscores".to_string(),
        ));
    }

    Ok(())
}
