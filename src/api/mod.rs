// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod chat;
pub mod errors;
pub mod gate;
pub mod handlers;
pub mod http_server;
pub mod transport;

pub use chat::{ChatBackend, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, EchoBackend};
pub use errors::{ApiError, ErrorBody};
pub use gate::{auth_gate, GateConfig};
pub use handlers::{verify_auth, HealthResponse};
pub use http_server::{build_router, start_server, AppState};
pub use transport::SecureTransport;
