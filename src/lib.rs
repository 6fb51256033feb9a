// ABOUTME: Main library entry point for the Mealtrics nutrition analytics service
// ABOUTME: REST surface over the goal, aggregation, pattern, trend, and recommendation engines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

#![deny(unsafe_code)]

//! # Mealtrics Server
//!
//! A thin REST surface over the Mealtrics analytics engines. The engines
//! themselves live in `mealtrics-intelligence` and are pure functions; this
//! crate supplies the ambient machinery around them:
//!
//! - **routes**: Axum handlers for goal calculation, meal logging, and the
//!   analysis endpoints
//! - **journal**: the storage collaborator boundary with an in-memory
//!   implementation
//! - **services**: protocol-agnostic assembly of journal snapshots into
//!   engine calls
//! - **errors**: the unified `AppError` and the service's JSON error
//!   envelope
//! - **config**: environment-only server configuration
//! - **logging**: tracing-subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mealtrics_server::config::ServerConfig;
//! use mealtrics_server::journal::InMemoryJournal;
//! use mealtrics_server::routes::{router, AppState};
//!
//! let config = ServerConfig::default();
//! let state = AppState::new(&config, Arc::new(InMemoryJournal::new()));
//! let app = router(state);
//! # let _ = app;
//! ```

/// Environment-only server configuration
pub mod config;

/// Unified error handling with the JSON error envelope
pub mod errors;

/// Meal journal collaborator boundary and in-memory implementation
pub mod journal;

/// Structured logging initialization
pub mod logging;

/// HTTP routes and shared application state
pub mod routes;

/// Domain service layer between handlers and engines
pub mod services;
