// ABOUTME: HTTP route assembly and shared application state
// ABOUTME: Builds the Axum router over the journal and analysis service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Routes
//!
//! One router for the whole REST surface. Handlers stay thin: extract,
//! validate, call the analysis service, shape the response. Everything
//! user-identity-related is a plain `user_id` query parameter; the auth
//! collaborator that normally supplies it is outside this service.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::journal::MealJournal;
use crate::services::AnalysisService;

/// Analysis endpoints (`/analysis/*`)
pub mod analysis;

/// Meal logging (`/entries`)
pub mod entries;

/// Goal calculation (`/calculate_goals`)
pub mod goals;

/// Liveness (`/health`)
pub mod health;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Meal storage collaborator
    pub journal: Arc<dyn MealJournal>,
    /// Engine assembly for analysis calls
    pub service: Arc<AnalysisService>,
}

impl AppState {
    /// Build state from configuration and a journal implementation
    #[must_use]
    pub fn new(config: &ServerConfig, journal: Arc<dyn MealJournal>) -> Self {
        Self {
            journal,
            service: Arc::new(AnalysisService::new(config)),
        }
    }
}

/// Assemble the full application router
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(goals::routes())
        .merge(entries::routes())
        .merge(analysis::routes())
        .layer(TraceLayer::new_for_http())
        // Browser dashboard and the mobile webview call this API directly
        .layer(CorsLayer::permissive())
        .with_state(state)
}
