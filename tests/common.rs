// ABOUTME: Shared test utilities and builders for integration tests
// ABOUTME: Quiet logging setup, profile and meal-entry fixtures, router construction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Mealtrics Nutrition Intelligence
#![allow(
    dead_code,
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! Shared test utilities for `mealtrics_server`
//!
//! Common fixtures to reduce duplication across integration tests.

use std::sync::{Arc, Once};

use axum::Router;
use chrono::{DateTime, Utc};
use mealtrics_core::{ActivityLevel, FoodItem, GoalType, MealEntry, MealType, Sex, UserProfile};
use mealtrics_server::config::ServerConfig;
use mealtrics_server::journal::{InMemoryJournal, MealJournal};
use mealtrics_server::routes::{router, AppState};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// The reference profile used by the numeric-contract tests
pub fn reference_profile() -> UserProfile {
    UserProfile {
        weight_kg: 70.0,
        height_cm: 175.0,
        age_years: 30,
        sex: Sex::Male,
        activity_level: ActivityLevel::Moderate,
        goal_type: GoalType::Maintain,
        weekly_rate_kg: 0.0,
    }
}

/// Parse an RFC 3339 timestamp, panicking on typos in test data
pub fn ts(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|_| panic!("bad timestamp in test: {raw}"))
}

/// Meal entry fixture with explicit macros
pub fn entry(
    user_id: Uuid,
    timestamp: &str,
    meal_type: MealType,
    calories: f64,
    protein_g: f64,
    carbohydrates_g: f64,
    fat_g: f64,
) -> MealEntry {
    MealEntry {
        id: Uuid::new_v4(),
        user_id,
        timestamp: ts(timestamp),
        meal_type,
        calories,
        protein_g,
        carbohydrates_g,
        fat_g,
        name: None,
        food_items: Vec::new(),
    }
}

/// Meal entry fixture with named foods (for variety analysis)
pub fn entry_with_foods(
    user_id: Uuid,
    timestamp: &str,
    meal_type: MealType,
    calories: f64,
    foods: &[&str],
) -> MealEntry {
    MealEntry {
        food_items: foods
            .iter()
            .map(|name| FoodItem {
                name: (*name).to_owned(),
                calories: None,
                protein_g: None,
                carbohydrates_g: None,
                fat_g: None,
            })
            .collect(),
        ..entry(user_id, timestamp, meal_type, calories, 0.0, 0.0, 0.0)
    }
}

/// Router over a fresh in-memory journal, returning both
pub fn test_app() -> (Router, Arc<InMemoryJournal>) {
    init_test_logging();
    let journal = Arc::new(InMemoryJournal::new());
    let state = AppState::new(
        &ServerConfig::default(),
        Arc::clone(&journal) as Arc<dyn MealJournal>,
    );
    (router(state), journal)
}

/// Seed a journal with the given entries
pub async fn seed(journal: &InMemoryJournal, entries: Vec<MealEntry>) {
    for entry in entries {
        journal.record(entry).await.unwrap();
    }
}
