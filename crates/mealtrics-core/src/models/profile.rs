// ABOUTME: User biometric profile and goal selection models
// ABOUTME: UserProfile, Sex, ActivityLevel, and GoalType definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

use serde::{Deserialize, Serialize};

/// Biological sex category, used only to pick the BMR formula constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Mifflin-St Jeor constant +5
    Male,
    /// Mifflin-St Jeor constant -161
    Female,
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise and a physical job
    VeryActive,
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR for this activity level
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }
}

/// What the user wants their body mass to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    /// Calorie deficit
    Lose,
    /// Calorie balance
    Maintain,
    /// Calorie surplus
    Gain,
}

/// Biometric profile and goal selection for one user.
///
/// Owned by the caller and consumed read-only by the goal calculator.
/// Validation happens in the calculator, not here: an out-of-range profile
/// is representable, and rejecting it is the engine's reported decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Body weight in kilograms (must be > 0)
    pub weight_kg: f64,
    /// Height in centimeters (must be > 0)
    pub height_cm: f64,
    /// Age in whole years (must be >= 1)
    pub age_years: u32,
    /// Biological sex category for the BMR constant
    pub sex: Sex,
    /// Activity level for the TDEE multiplier
    pub activity_level: ActivityLevel,
    /// Goal direction
    pub goal_type: GoalType,
    /// Desired rate of change in kg/week (>= 0; ignored for `Maintain`)
    #[serde(default)]
    pub weekly_rate_kg: f64,
}
