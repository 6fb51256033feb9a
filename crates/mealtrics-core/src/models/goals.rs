// ABOUTME: Derived daily calorie and macronutrient targets
// ABOUTME: GoalTargets value object produced by the goal calculator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

use serde::{Deserialize, Serialize};

/// Calories per gram of protein and carbohydrate
pub const KCAL_PER_G_PROTEIN_CARB: f64 = 4.0;
/// Calories per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Daily calorie and macronutrient targets derived from a profile.
///
/// Never mutated after creation. Invariant: `protein_goal_g * 4 +
/// carb_goal_g * 4 + fat_goal_g * 9` stays within whole-gram rounding
/// tolerance of `calorie_goal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalTargets {
    /// Daily calorie target in kcal (rounded to a whole number)
    pub calorie_goal: f64,
    /// Daily protein target in grams
    pub protein_goal_g: f64,
    /// Daily carbohydrate target in grams
    pub carb_goal_g: f64,
    /// Daily fat target in grams
    pub fat_goal_g: f64,
}

impl GoalTargets {
    /// Calories implied by the macro targets alone
    #[must_use]
    pub fn macro_kcal(&self) -> f64 {
        self.protein_goal_g * KCAL_PER_G_PROTEIN_CARB
            + self.carb_goal_g * KCAL_PER_G_PROTEIN_CARB
            + self.fat_goal_g * KCAL_PER_G_FAT
    }
}
