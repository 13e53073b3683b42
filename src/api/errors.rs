// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! API Error Taxonomy
//!
//! Every expected failure maps to one of these variants at the handler
//! boundary and travels to the client as an encrypted `{ "error": msg }`
//! envelope. Public messages are deliberately generic; internal detail
//! (the `Internal` payload, decrypt causes, token causes) stays in
//! server logs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::StoreError;

/// Generic message for undecodable/undecryptable request bodies
pub const MSG_REQUEST_FORMAT: &str = "request format invalid";

/// Generic message for every token-verification failure
pub const MSG_UNAUTHENTICATED: &str = "unauthenticated";

/// Generic message for both unknown-email and wrong-password logins
pub const MSG_INVALID_CREDENTIALS: &str = "invalid email or password";

/// Register conflict messages (email checked first, by design)
pub const MSG_EMAIL_TAKEN: &str = "email already registered";
pub const MSG_USERNAME_TAKEN: &str = "username already taken";
pub const MSG_DUPLICATE_IDENTITY: &str = "email or username already exists";

/// Generic message for unexpected failures
pub const MSG_SERVER_ERROR: &str = "internal server error";

/// Wire shape of every failure body (encrypted in transit)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Envelope parse or decrypt failure → 400, one generic message
    RequestFormat,
    /// Malformed input shape → 400
    Validation(String),
    /// Bad credentials or bad/expired/missing token → 401
    Unauthorized(String),
    /// Duplicate email/username → 409
    Conflict(String),
    /// Unexpected/internal failure → 500; the payload is logged, never echoed
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::RequestFormat | ApiError::Validation(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Conflict(_) => 409,
            ApiError::Internal(_) => 500,
        }
    }

    /// The message a client is allowed to see
    pub fn public_message(&self) -> String {
        match self {
            ApiError::RequestFormat => MSG_REQUEST_FORMAT.to_string(),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::Conflict(msg) => msg.clone(),
            ApiError::Internal(_) => MSG_SERVER_ERROR.to_string(),
        }
    }

    /// Shorthand for the uniform token-failure rejection
    pub fn unauthenticated() -> Self {
        ApiError::Unauthorized(MSG_UNAUTHENTICATED.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFormat => write!(f, "Request format invalid"),
            ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => ApiError::Conflict(MSG_DUPLICATE_IDENTITY.to_string()),
            StoreError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}
