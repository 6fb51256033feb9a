// ABOUTME: Meal logging models for nutrition intake analysis
// ABOUTME: MealEntry, MealType, and FoodItem definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of meal
///
/// The `Ord` impl follows the natural order of a day so maps keyed by meal
/// type serialize in a stable, human-sensible order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// Meal types a day is expected to contain (snacks are optional)
    pub const EXPECTED: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];
}

/// Individual food item within a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Food name
    pub name: String,
    /// Calories contributed by this item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates_g: Option<f64>,
    /// Fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
}

/// One logged meal.
///
/// Created by the logging collaborator and immutable once logged; the
/// analysis engines consume it read-only. Macro totals live on the entry
/// itself; `food_items` is an optional itemization used for the variety
/// analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    /// Unique identifier for this entry
    pub id: Uuid,
    /// User who logged the meal
    pub user_id: Uuid,
    /// Instant the meal was consumed (timezone-aware; bucketing converts to
    /// the caller's reference time zone)
    pub timestamp: DateTime<Utc>,
    /// Which meal of the day this was
    pub meal_type: MealType,
    /// Total calories (>= 0)
    pub calories: f64,
    /// Protein in grams (>= 0)
    #[serde(default)]
    pub protein_g: f64,
    /// Carbohydrates in grams (>= 0)
    #[serde(default)]
    pub carbohydrates_g: f64,
    /// Fat in grams (>= 0)
    #[serde(default)]
    pub fat_g: f64,
    /// Free-form meal description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Itemized foods, when the logging client supplied them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub food_items: Vec<FoodItem>,
}

impl MealEntry {
    /// Food identifiers this entry contributes to the variety analysis.
    ///
    /// Itemized foods win over the free-form name; an entry with neither
    /// contributes nothing.
    pub fn food_names(&self) -> impl Iterator<Item = &str> {
        let items: Vec<&str> = if self.food_items.is_empty() {
            self.name.as_deref().into_iter().collect()
        } else {
            self.food_items.iter().map(|f| f.name.as_str()).collect()
        };
        items.into_iter()
    }
}
