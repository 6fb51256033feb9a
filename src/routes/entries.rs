// ABOUTME: Meal logging endpoint feeding the analysis journal
// ABOUTME: POST /entries with per-field validation of macro amounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use mealtrics_core::{FoodItem, MealEntry, MealType};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppJson, AppResult};
use crate::routes::AppState;

/// Identifies the journal the entry belongs to
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    /// Owning user (normally injected by the auth collaborator)
    pub user_id: Uuid,
}

/// Wire shape of a logged meal
#[derive(Debug, Deserialize)]
pub struct LogMealRequest {
    /// Instant the meal was consumed
    pub timestamp: DateTime<Utc>,
    /// Which meal of the day
    pub meal_type: MealType,
    /// Total calories
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein_g: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbohydrates_g: f64,
    /// Fat in grams
    #[serde(default)]
    pub fat_g: f64,
    /// Free-form meal description
    #[serde(default)]
    pub name: Option<String>,
    /// Itemized foods
    #[serde(default)]
    pub food_items: Vec<FoodItem>,
}

/// Confirmation returned for a logged meal
#[derive(Debug, Serialize, Deserialize)]
pub struct LogMealResponse {
    /// Identifier assigned to the entry
    pub id: Uuid,
}

/// Routes for meal logging
pub fn routes() -> Router<AppState> {
    Router::new().route("/entries", post(log_meal))
}

async fn log_meal(
    State(state): State<AppState>,
    Query(user): Query<UserQuery>,
    AppJson(request): AppJson<LogMealRequest>,
) -> AppResult<(StatusCode, Json<LogMealResponse>)> {
    validate_amounts(&request)?;

    let entry = MealEntry {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        timestamp: request.timestamp,
        meal_type: request.meal_type,
        calories: request.calories,
        protein_g: request.protein_g,
        carbohydrates_g: request.carbohydrates_g,
        fat_g: request.fat_g,
        name: request.name,
        food_items: request.food_items,
    };

    let id = state.journal.record(entry).await?;
    info!(user_id = %user.user_id, entry_id = %id, "meal logged");
    Ok((StatusCode::CREATED, Json(LogMealResponse { id })))
}

fn validate_amounts(request: &LogMealRequest) -> AppResult<()> {
    let mut error = AppError::invalid_input("meal entry validation failed");
    let mut failed = false;
    for (field, value) in [
        ("calories", request.calories),
        ("protein_g", request.protein_g),
        ("carbohydrates_g", request.carbohydrates_g),
        ("fat_g", request.fat_g),
    ] {
        if !value.is_finite() || value < 0.0 {
            error = error.with_detail(field, format!("must be non-negative, got {value}"));
            failed = true;
        }
    }
    if failed {
        Err(error)
    } else {
        Ok(())
    }
}
