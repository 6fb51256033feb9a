// ABOUTME: Analysis engine configuration with documented defaults
// ABOUTME: Macro split, consistency tiers, snack windows, and trend thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Analysis Configuration
//!
//! Every threshold the engines consult is hoisted into these structures.
//! The defaults are the product's documented behavior; deployments override
//! individual values rather than patching rule code. Engines take their
//! config section explicitly; there is deliberately no process-wide config
//! singleton here.

use mealtrics_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Tolerance used when validating that macro percentages sum to 1.0
const MACRO_SPLIT_SUM_TOLERANCE: f64 = 1e-6;

/// How daily calories are divided among macronutrients.
///
/// Percentages are fractions of the calorie goal and must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    /// Fraction of calories from protein
    pub protein_pct: f64,
    /// Fraction of calories from carbohydrate
    pub carb_pct: f64,
    /// Fraction of calories from fat
    pub fat_pct: f64,
}

impl MacroSplit {
    /// Validate that the split is a proper partition of the calorie goal
    ///
    /// # Errors
    /// Returns `InvalidProfile` when a share is negative, non-finite, or the
    /// shares do not sum to 1.0.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [
            ("protein_pct", self.protein_pct),
            ("carb_pct", self.carb_pct),
            ("fat_pct", self.fat_pct),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::invalid_profile(
                    field,
                    format!("must be a non-negative fraction, got {value}"),
                ));
            }
        }
        let sum = self.protein_pct + self.carb_pct + self.fat_pct;
        if (sum - 1.0).abs() > MACRO_SPLIT_SUM_TOLERANCE {
            return Err(EngineError::invalid_profile(
                "macro_split",
                format!("shares must sum to 1.0, got {sum}"),
            ));
        }
        Ok(())
    }
}

impl Default for MacroSplit {
    /// 20% protein / 50% carbohydrate / 30% fat
    fn default() -> Self {
        Self {
            protein_pct: 0.20,
            carb_pct: 0.50,
            fat_pct: 0.30,
        }
    }
}

/// Configuration for the goal calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    /// A calorie goal below `safety_floor_factor * BMR` is reported as
    /// infeasible rather than clamped
    pub safety_floor_factor: f64,
    /// Macro split applied to the calorie goal
    pub macro_split: MacroSplit,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            safety_floor_factor: 1.2,
            macro_split: MacroSplit::default(),
        }
    }
}

/// Configuration for the pattern analyzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Local hour at which eating counts as late-night (also the start of
    /// the late-night snack window)
    pub late_night_cutoff_hour: u32,
    /// Meal-time standard deviation (minutes) at or below which timing is
    /// rated excellent
    pub excellent_max_stddev_minutes: f64,
    /// Meal-time standard deviation (minutes) at or below which timing is
    /// rated good
    pub good_max_stddev_minutes: f64,
    /// How many most-repeated foods to report
    pub top_repeated_foods: usize,
    /// Daily calories below this fraction of the target count as an
    /// under-target day
    pub under_target_fraction: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            late_night_cutoff_hour: 22,
            excellent_max_stddev_minutes: 30.0,
            good_max_stddev_minutes: 60.0,
            top_repeated_foods: 5,
            under_target_fraction: 0.8,
        }
    }
}

/// Configuration for the trend analyzer.
///
/// Units are per-day change of whatever metric the series carries; the
/// defaults are sized for daily calorie logs, where day-to-day noise of a
/// few kcal must not register as a trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Minimum |slope| for a series to count as moving at all
    pub epsilon: f64,
    /// Minimum |slope| for a trend to be classified significant
    pub significance_threshold: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            epsilon: 5.0,
            significance_threshold: 25.0,
        }
    }
}

/// Configuration for the recommendation engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Days-over-target must exceed days-under-target by more than this
    /// margin before portion control is recommended
    pub portion_margin_days: u32,
    /// Average distinct foods per day below this triggers the variety
    /// recommendation
    pub variety_threshold: f64,
    /// Skipped breakfasts above this count trigger the breakfast
    /// recommendation
    pub skipped_breakfast_threshold: u32,
    /// Upper bound on recommendations returned per call
    pub max_recommendations: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            portion_margin_days: 2,
            variety_threshold: 3.0,
            skipped_breakfast_threshold: 3,
            max_recommendations: 8,
        }
    }
}

/// Complete analysis configuration, one section per engine
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Goal calculator section
    pub goals: GoalConfig,
    /// Pattern analyzer section
    pub patterns: PatternConfig,
    /// Trend analyzer section
    pub trends: TrendConfig,
    /// Recommendation engine section
    pub recommendations: RecommendationConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_split_is_valid() {
        MacroSplit::default().validate().unwrap();
    }

    #[test]
    fn split_must_sum_to_one() {
        let split = MacroSplit {
            protein_pct: 0.30,
            carb_pct: 0.50,
            fat_pct: 0.30,
        };
        assert!(matches!(
            split.validate(),
            Err(EngineError::InvalidProfile { field: "macro_split", .. })
        ));
    }

    #[test]
    fn split_rejects_negative_share() {
        let split = MacroSplit {
            protein_pct: -0.10,
            carb_pct: 0.80,
            fat_pct: 0.30,
        };
        assert!(split.validate().is_err());
    }
}
