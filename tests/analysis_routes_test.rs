// ABOUTME: Integration tests for the REST surface via in-process requests
// ABOUTME: Envelope shapes, status codes, endpoint payloads, and pipeline determinism
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Days, NaiveTime, TimeZone, Utc};
use common::test_app;
use mealtrics_core::{MealEntry, MealType};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

/// UTC timestamp `n` days before today at the given clock time
fn days_ago(n: u64, time: &str) -> DateTime<Utc> {
    let day = Utc::now().date_naive() - Days::new(n);
    let clock: NaiveTime = time.parse().unwrap();
    Utc.from_utc_datetime(&day.and_time(clock))
}

fn meal(user: Uuid, at: DateTime<Utc>, meal_type: MealType, calories: f64) -> MealEntry {
    MealEntry {
        id: Uuid::new_v4(),
        user_id: user,
        timestamp: at,
        meal_type,
        calories,
        protein_g: calories * 0.05,
        carbohydrates_g: calories * 0.12,
        fat_g: calories * 0.03,
        name: None,
        food_items: Vec::new(),
    }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_raw(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_healthy() {
    let (app, _) = test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn calculate_goals_returns_the_documented_targets() {
    let (app, _) = test_app();
    let (status, body) = post_json(
        &app,
        "/calculate_goals",
        &json!({
            "weight": 70.0,
            "height": 175.0,
            "age": 30,
            "gender": "male",
            "activity_level": "moderate",
            "goal_type": "maintain"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // TDEE 2718.3125 rounds to 2718; 20/50/30 split in whole grams
    assert_eq!(body["calorie_goal"], 2718.0);
    assert_eq!(body["protein_goal"], 136.0);
    assert_eq!(body["carb_goal"], 340.0);
    assert_eq!(body["fat_goal"], 91.0);
}

#[tokio::test]
async fn invalid_biometrics_render_the_error_envelope() {
    let (app, _) = test_app();
    let (status, body) = post_json(
        &app,
        "/calculate_goals",
        &json!({
            "weight": -70.0,
            "height": 175.0,
            "age": 30,
            "gender": "male",
            "activity_level": "moderate",
            "goal_type": "maintain"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "profile validation failed");
    assert!(body["details"]["weight_kg"]
        .as_str()
        .unwrap()
        .contains("must be positive"));
}

#[tokio::test]
async fn malformed_json_types_are_a_400_envelope() {
    let (app, _) = test_app();
    let (status, body) = post_json(
        &app,
        "/calculate_goals",
        &json!({
            "weight": "seventy",
            "height": 175.0,
            "age": 30,
            "gender": "male",
            "activity_level": "moderate",
            "goal_type": "maintain"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
    assert!(body["details"].is_object());
}

#[tokio::test]
async fn infeasible_goal_is_a_400_with_the_rate_named() {
    let (app, _) = test_app();
    let (status, body) = post_json(
        &app,
        "/calculate_goals",
        &json!({
            "weight": 70.0,
            "height": 175.0,
            "age": 30,
            "gender": "male",
            "activity_level": "sedentary",
            "goal_type": "lose",
            "weekly_rate": 1.5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["weekly_rate"]
        .as_str()
        .unwrap()
        .contains("safety floor"));
}

#[tokio::test]
async fn logged_meals_flow_into_the_nutrient_summary() {
    let (app, _) = test_app();
    let user = Uuid::new_v4();

    let at = days_ago(1, "12:30:00").to_rfc3339();
    let (status, body) = post_json(
        &app,
        &format!("/entries?user_id={user}"),
        &json!({
            "timestamp": at,
            "meal_type": "lunch",
            "calories": 640.0,
            "protein_g": 32.0,
            "carbohydrates_g": 70.0,
            "fat_g": 20.0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_str().is_some());

    let (status, body) = get(&app, &format!("/analysis/nutrients?user_id={user}&period=7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_calories"], 640.0);
    assert_eq!(body["macros"]["protein"], 32.0);
    assert_eq!(body["macros"]["carbs"], 70.0);
    assert_eq!(body["macros"]["fat"], 20.0);
    // One logged day cannot carry a trend
    assert!(body["trend"].is_null());
    // 640 kcal over a 7-day window
    let avg = body["average_daily_calories"].as_f64().unwrap();
    assert!((avg - 640.0 / 7.0).abs() < 1e-9);
}

#[tokio::test]
async fn negative_macros_are_rejected_per_field() {
    let (app, _) = test_app();
    let user = Uuid::new_v4();
    let (status, body) = post_json(
        &app,
        &format!("/entries?user_id={user}"),
        &json!({
            "timestamp": "2024-03-04T12:30:00Z",
            "meal_type": "lunch",
            "calories": -5.0,
            "fat_g": -1.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["calories"].as_str().is_some());
    assert!(body["details"]["fat_g"].as_str().is_some());
    assert!(body["details"]["protein_g"].is_null());
}

#[tokio::test]
async fn unknown_user_is_404_with_envelope() {
    let (app, _) = test_app();
    let user = Uuid::new_v4();

    for uri in [
        format!("/analysis/nutrients?user_id={user}"),
        format!("/analysis/behavior?user_id={user}"),
        format!("/analysis/circadian?user_id={user}"),
        format!("/analysis/daily?user_id={user}"),
    ] {
        let (status, body) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "for {uri}");
        assert_eq!(body["error"], "user not found");
    }
}

#[tokio::test]
async fn zero_day_window_is_rejected() {
    let (app, journal) = test_app();
    let user = Uuid::new_v4();
    common::seed(
        &journal,
        vec![meal(user, days_ago(0, "12:00:00"), MealType::Lunch, 600.0)],
    )
    .await;

    let (status, body) = get(&app, &format!("/analysis/nutrients?user_id={user}&period=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["period"], "must be at least 1 day");
}

#[tokio::test]
async fn rising_calorie_week_reports_an_increasing_trend() {
    let (app, journal) = test_app();
    let user = Uuid::new_v4();
    let calories = [1900.0, 1950.0, 2000.0, 2050.0, 2100.0];
    let entries = calories
        .iter()
        .enumerate()
        .map(|(i, kcal)| {
            meal(
                user,
                days_ago((calories.len() - 1 - i) as u64, "12:00:00"),
                MealType::Lunch,
                *kcal,
            )
        })
        .collect();
    common::seed(&journal, entries).await;

    let (status, body) = get(&app, &format!("/analysis/nutrients?user_id={user}&period=7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trend"]["direction"], "increasing");
    let slope = body["trend"]["slope"].as_f64().unwrap();
    assert!((slope - 50.0).abs() < 1e-9);
}

#[tokio::test]
async fn behavior_surface_carries_signals_and_recommendations() {
    let (app, journal) = test_app();
    let user = Uuid::new_v4();
    common::seed(
        &journal,
        vec![
            meal(user, days_ago(2, "08:00:00"), MealType::Breakfast, 420.0),
            meal(user, days_ago(2, "23:15:00"), MealType::Snack, 300.0),
            meal(user, days_ago(1, "08:10:00"), MealType::Breakfast, 410.0),
        ],
    )
    .await;

    let (status, body) = get(&app, &format!("/analysis/behavior?user_id={user}&period=7")).await;
    assert_eq!(status, StatusCode::OK);

    // Flattened BehaviorSignals shape
    assert_eq!(body["late_night_count"], 1);
    assert!(body["meal_timing"]["breakfast"]["tier"].as_str().is_some());
    assert!(body["skipped_meals"]["lunch"].as_u64().is_some());
    assert!(body["snacking"]["late_night"].as_u64().is_some());

    // The late-night snack must surface as the top recommendation
    let recs = body["recommendations"].as_array().unwrap();
    assert!(!recs.is_empty());
    assert_eq!(recs[0]["trigger"], "late_night_eating");
    assert_eq!(recs[0]["priority"], "high");
}

#[tokio::test]
async fn circadian_reports_clock_times_and_tiers() {
    let (app, journal) = test_app();
    let user = Uuid::new_v4();
    common::seed(
        &journal,
        vec![
            meal(user, days_ago(3, "07:30:00"), MealType::Breakfast, 420.0),
            meal(user, days_ago(2, "07:30:00"), MealType::Breakfast, 400.0),
            meal(user, days_ago(1, "07:30:00"), MealType::Breakfast, 410.0),
        ],
    )
    .await;

    let (status, body) = get(&app, &format!("/analysis/circadian?user_id={user}&period=7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meal_timing"]["breakfast"]["mean_clock_time"], "07:30");
    assert_eq!(body["meal_timing"]["breakfast"]["consistency"], "excellent");
    assert_eq!(body["meal_timing"]["breakfast"]["sample_count"], 3);
    assert_eq!(body["late_night_count"], 0);
}

#[tokio::test]
async fn daily_summary_compares_totals_to_targets() {
    let (app, journal) = test_app();
    let user = Uuid::new_v4();
    let day = Utc::now().date_naive() - Days::new(1);
    common::seed(
        &journal,
        vec![
            meal(user, days_ago(1, "08:00:00"), MealType::Breakfast, 400.0),
            meal(user, days_ago(1, "12:30:00"), MealType::Lunch, 650.0),
        ],
    )
    .await;

    let (status, body) = get(
        &app,
        &format!("/analysis/daily?user_id={user}&date={day}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], day.to_string());
    assert_eq!(body["totals"]["calories"], 1050.0);
    assert!(body["by_meal_type"]["breakfast"]["calories"].as_f64().is_some());
    // Default targets: 2000 kcal with the 20/50/30 split
    assert_eq!(body["target"]["calorie_goal"], 2000.0);
    assert_eq!(body["target"]["protein_goal_g"], 100.0);
}

#[tokio::test]
async fn full_pipeline_is_deterministic() {
    let (app, journal) = test_app();
    let user = Uuid::new_v4();
    common::seed(
        &journal,
        vec![
            meal(user, days_ago(4, "08:00:00"), MealType::Breakfast, 420.0),
            meal(user, days_ago(4, "13:00:00"), MealType::Lunch, 640.0),
            meal(user, days_ago(3, "22:30:00"), MealType::Dinner, 900.0),
            meal(user, days_ago(2, "12:45:00"), MealType::Lunch, 700.0),
            meal(user, days_ago(1, "16:00:00"), MealType::Snack, 180.0),
        ],
    )
    .await;

    for uri in [
        format!("/analysis/nutrients?user_id={user}&period=14"),
        format!("/analysis/behavior?user_id={user}&period=14&goal_type=lose"),
        format!("/analysis/circadian?user_id={user}&period=14"),
    ] {
        let (first_status, first) = get_raw(&app, &uri).await;
        let (second_status, second) = get_raw(&app, &uri).await;
        assert_eq!(first_status, StatusCode::OK, "for {uri}");
        assert_eq!(second_status, StatusCode::OK);
        assert_eq!(first, second, "pipeline output differed for {uri}");
    }
}
