// ABOUTME: Analysis endpoints for nutrient summaries, behavior, circadian timing, and daily stats
// ABOUTME: GET /analysis/* handlers over a journal snapshot of the requested window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use mealtrics_core::{GoalTargets, GoalType, MealEntry, MealType};
use mealtrics_intelligence::{
    BehaviorSignals, ConsistencyTier, MacroTotals, Recommendation, TrendDirection, TrendResult,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::routes::AppState;

/// Query parameters shared by the window-based analysis endpoints
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// User whose journal to analyze
    pub user_id: Uuid,
    /// Window length in days, ending today in the reference time zone
    #[serde(default = "default_period")]
    pub period: u32,
    /// Goal direction for trend-sensitive recommendations
    #[serde(default)]
    pub goal_type: Option<GoalType>,
}

const fn default_period() -> u32 {
    30
}

/// Query parameters for the single-day endpoint
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    /// User whose journal to analyze
    pub user_id: Uuid,
    /// Local day to summarize; defaults to today in the reference zone
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Trend fields exposed on summary endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Direction classification
    pub direction: TrendDirection,
    /// Slope in kcal per day
    pub slope: f64,
}

impl From<&TrendResult> for TrendSummary {
    fn from(trend: &TrendResult) -> Self {
        Self {
            direction: trend.direction,
            slope: trend.slope,
        }
    }
}

/// Macro totals with the wire names the dashboard uses
#[derive(Debug, Serialize, Deserialize)]
pub struct MacroBreakdown {
    /// Total protein in grams
    pub protein: f64,
    /// Total carbohydrates in grams
    pub carbs: f64,
    /// Total fat in grams
    pub fat: f64,
}

/// Response of `GET /analysis/nutrients`
#[derive(Debug, Serialize, Deserialize)]
pub struct NutrientsResponse {
    /// Calories summed over the window
    pub total_calories: f64,
    /// Calories averaged over every day of the window
    pub average_daily_calories: f64,
    /// Macro totals over the window
    pub macros: MacroBreakdown,
    /// Calorie trend; `null` when fewer than two logged days exist
    pub trend: Option<TrendSummary>,
}

/// Response of `GET /analysis/behavior`
#[derive(Debug, Serialize)]
pub struct BehaviorResponse {
    /// All derived behavioral signals
    #[serde(flatten)]
    pub signals: BehaviorSignals,
    /// Ranked recommendations for the same window
    pub recommendations: Vec<Recommendation>,
}

/// Per-meal-type circadian summary
#[derive(Debug, Serialize, Deserialize)]
pub struct CircadianMeal {
    /// Mean clock time as `HH:MM` local
    pub mean_clock_time: String,
    /// Mean clock time in minutes since local midnight
    pub mean_minutes: f64,
    /// Consistency tier for the meal's timing
    pub consistency: ConsistencyTier,
    /// Entries behind the statistics
    pub sample_count: usize,
}

/// Response of `GET /analysis/circadian`
#[derive(Debug, Serialize, Deserialize)]
pub struct CircadianResponse {
    /// Timing summary per meal type
    pub meal_timing: BTreeMap<MealType, CircadianMeal>,
    /// Entries in the late-night window
    pub late_night_count: u32,
}

/// Response of `GET /analysis/daily`
#[derive(Debug, Serialize, Deserialize)]
pub struct DailyResponse {
    /// The summarized local day
    pub date: NaiveDate,
    /// Totals for the day
    pub totals: MacroTotals,
    /// Per-meal-type subtotals
    pub by_meal_type: BTreeMap<MealType, MacroTotals>,
    /// Targets the day is measured against
    pub target: GoalTargets,
}

/// Routes for the analysis surface
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analysis/nutrients", get(nutrients))
        .route("/analysis/behavior", get(behavior))
        .route("/analysis/circadian", get(circadian))
        .route("/analysis/daily", get(daily))
}

/// Journal snapshot restricted to the requested window
async fn load_window(
    state: &AppState,
    user_id: Uuid,
    period: u32,
) -> AppResult<(Vec<MealEntry>, (NaiveDate, NaiveDate))> {
    if period < 1 {
        return Err(AppError::invalid_input("invalid analysis window")
            .with_detail("period", "must be at least 1 day"));
    }
    let entries = state
        .journal
        .entries_for(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;
    let window = state.service.window(period, Utc::now());
    let windowed = state.service.window_entries(&entries, window);
    Ok((windowed, window))
}

async fn nutrients(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> AppResult<Json<NutrientsResponse>> {
    let (entries, window) = load_window(&state, query.user_id, query.period).await?;
    let daily = state.service.daily_aggregates(&entries, window);

    let mut total = MacroTotals::default();
    for aggregate in &daily {
        total.calories += aggregate.totals.calories;
        total.protein_g += aggregate.totals.protein_g;
        total.carbohydrates_g += aggregate.totals.carbohydrates_g;
        total.fat_g += aggregate.totals.fat_g;
    }
    let days = daily.len().max(1) as f64;

    let trend = state.service.calorie_trend(&daily);
    Ok(Json(NutrientsResponse {
        total_calories: total.calories,
        average_daily_calories: total.calories / days,
        macros: MacroBreakdown {
            protein: total.protein_g,
            carbs: total.carbohydrates_g,
            fat: total.fat_g,
        },
        trend: trend.as_ref().map(TrendSummary::from),
    }))
}

async fn behavior(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> AppResult<Json<BehaviorResponse>> {
    let (entries, window) = load_window(&state, query.user_id, query.period).await?;

    let targets = state.service.default_targets();
    let signals = state.service.behavior(&entries, &targets);
    let daily = state.service.daily_aggregates(&entries, window);
    let trend = state.service.calorie_trend(&daily);
    let recommendations = state.service.recommendations(
        &signals,
        trend.as_ref(),
        query.goal_type.unwrap_or(GoalType::Maintain),
    );

    Ok(Json(BehaviorResponse {
        signals,
        recommendations,
    }))
}

async fn circadian(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> AppResult<Json<CircadianResponse>> {
    let (entries, _) = load_window(&state, query.user_id, query.period).await?;

    let targets = state.service.default_targets();
    let signals = state.service.behavior(&entries, &targets);

    let meal_timing = signals
        .meal_timing
        .iter()
        .map(|(meal_type, stats)| {
            (
                *meal_type,
                CircadianMeal {
                    mean_clock_time: stats.mean_clock_time(),
                    mean_minutes: stats.mean_minutes,
                    consistency: stats.tier,
                    sample_count: stats.sample_count,
                },
            )
        })
        .collect();

    Ok(Json(CircadianResponse {
        meal_timing,
        late_night_count: signals.late_night_count,
    }))
}

async fn daily(
    State(state): State<AppState>,
    Query(query): Query<DailyQuery>,
) -> AppResult<Json<DailyResponse>> {
    let entries = state
        .journal
        .entries_for(query.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;

    let date = query.date.unwrap_or_else(|| {
        Utc::now()
            .with_timezone(&state.service.reference_offset())
            .date_naive()
    });
    let window = (date, date);
    let windowed = state.service.window_entries(&entries, window);
    let aggregates = state.service.daily_aggregates(&windowed, window);

    // Zero-filled aggregation over a one-day range always yields one bucket
    let day = aggregates.into_iter().next().map_or_else(
        || DailyResponse {
            date,
            totals: MacroTotals::default(),
            by_meal_type: BTreeMap::new(),
            target: state.service.default_targets(),
        },
        |aggregate| DailyResponse {
            date,
            totals: aggregate.totals,
            by_meal_type: aggregate.by_meal_type,
            target: state.service.default_targets(),
        },
    );
    Ok(Json(day))
}
