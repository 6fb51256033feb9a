// ABOUTME: Mealtrics server binary wiring configuration, logging, and the router
// ABOUTME: Serves the REST analysis surface on the configured port
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mealtrics_server::config::ServerConfig;
use mealtrics_server::journal::InMemoryJournal;
use mealtrics_server::logging;
use mealtrics_server::routes::{router, AppState};
use tracing::info;

/// Nutrition goal and analytics service
#[derive(Debug, Parser)]
#[command(name = "mealtrics-server", version, about)]
struct Args {
    /// Override the HTTP port from the environment
    #[arg(long)]
    port: Option<u16>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "mealtrics_server=info,tower_http=info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_filter);

    let mut config = ServerConfig::from_env().context("loading server configuration")?;
    if let Some(port) = args.port {
        config.http_port = port;
    }

    let state = AppState::new(&config, Arc::new(InMemoryJournal::new()));
    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(
        port = config.http_port,
        utc_offset_minutes = config.utc_offset_minutes,
        "mealtrics server listening"
    );

    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
