// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use sealed_chat_node::api::{start_server, AppState};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Sealed Chat Node...\n");
    println!("📦 Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let api_port = env::var("API_PORT").unwrap_or_else(|_| "8080".to_string());
    let listen_addr = format!("127.0.0.1:{}", api_port);

    // Key decode happens here, once: a missing or malformed key aborts
    // startup instead of surfacing per request
    let state = AppState::from_env().context("encryption key configuration")?;
    println!("✅ Payload encryption configured");

    start_server(state, &listen_addr).await
}
