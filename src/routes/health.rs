// ABOUTME: Health check route for service monitoring
// ABOUTME: Liveness endpoint used by load balancers and deploy tooling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

use axum::routing::get;
use axum::{Json, Router};

use crate::routes::AppState;

/// Routes for health checks
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
