// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat Completion Passthrough
//!
//! The protected chat route forwards decrypted requests to a
//! [`ChatBackend`] collaborator and encrypts whatever comes back. The
//! upstream language-model providers themselves are out of scope here;
//! `EchoBackend` is the built-in stand-in used for development and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    #[serde(default)]
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub model: String,
    pub message: ChatMessage,
}

/// Upstream completion collaborator
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, req: ChatCompletionRequest)
        -> Result<ChatCompletionResponse, ApiError>;
}

/// Development backend: answers with the last user message
#[derive(Debug, Default, Clone)]
pub struct EchoBackend;

#[async_trait]
impl ChatBackend for EchoBackend {
    async fn complete(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiError> {
        let content = req
            .messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.clone())
            .unwrap_or_default();

        Ok(ChatCompletionResponse {
            model: req.model.unwrap_or_else(|| "echo".to_string()),
            message: ChatMessage {
                role: "assistant".to_string(),
                content,
            },
        })
    }
}
