// ABOUTME: Goal calculation endpoint mapping profile input to calorie and macro targets
// ABOUTME: POST /calculate_goals with the wire field names of the mobile client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use mealtrics_core::{ActivityLevel, GoalTargets, GoalType, Sex, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppJson, AppResult};
use crate::routes::AppState;

/// Wire shape of a goal calculation request
#[derive(Debug, Deserialize)]
pub struct CalculateGoalsRequest {
    /// Body weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Age in whole years
    pub age: u32,
    /// Biological sex category for the BMR constant
    pub gender: Sex,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Goal direction
    pub goal_type: GoalType,
    /// Desired rate of change in kg/week; omit for maintain
    #[serde(default)]
    pub weekly_rate: Option<f64>,
}

/// Wire shape of the computed targets
#[derive(Debug, Serialize, Deserialize)]
pub struct CalculateGoalsResponse {
    /// Daily calories in kcal
    pub calorie_goal: f64,
    /// Daily protein in grams
    pub protein_goal: f64,
    /// Daily carbohydrate in grams
    pub carb_goal: f64,
    /// Daily fat in grams
    pub fat_goal: f64,
}

impl From<GoalTargets> for CalculateGoalsResponse {
    fn from(targets: GoalTargets) -> Self {
        Self {
            calorie_goal: targets.calorie_goal,
            protein_goal: targets.protein_goal_g,
            carb_goal: targets.carb_goal_g,
            fat_goal: targets.fat_goal_g,
        }
    }
}

/// Routes for goal calculation
pub fn routes() -> Router<AppState> {
    Router::new().route("/calculate_goals", post(calculate_goals))
}

async fn calculate_goals(
    State(state): State<AppState>,
    AppJson(request): AppJson<CalculateGoalsRequest>,
) -> AppResult<Json<CalculateGoalsResponse>> {
    let profile = UserProfile {
        weight_kg: request.weight,
        height_cm: request.height,
        age_years: request.age,
        sex: request.gender,
        activity_level: request.activity_level,
        goal_type: request.goal_type,
        weekly_rate_kg: request.weekly_rate.unwrap_or(0.0),
    };

    let targets = state.service.goal_calculator().calculate(&profile)?;
    info!(
        calorie_goal = targets.calorie_goal,
        goal_type = ?profile.goal_type,
        "calculated goal targets"
    );
    Ok(Json(targets.into()))
}
