// ABOUTME: Rule-based recommendation generation from behavioral and trend signals
// ABOUTME: Fixed-priority, deterministic rule evaluation with no side effects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Recommendation Engine
//!
//! Evaluates independent threshold rules over [`BehaviorSignals`] and an
//! optional [`TrendResult`] and returns a ranked recommendation list. The
//! rule order is fixed and documented; equal priorities keep declaration
//! order, so identical inputs always yield an identical list. The engine
//! never mutates its inputs and produces a fresh list per call.

use mealtrics_core::GoalType;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RecommendationConfig;
use crate::patterns::{BehaviorSignals, ConsistencyTier};
use crate::trends::{TrendDirection, TrendMagnitude, TrendResult};

/// How urgent a recommendation is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    /// Address first
    High,
    /// Worth acting on
    Medium,
    /// Nice to have
    Low,
}

/// Which signal triggered a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSignal {
    /// Entries in the late-night window
    LateNightEating,
    /// More over-target than under-target days
    CalorieOverage,
    /// A meal type rated needs-improvement
    IrregularMealTiming,
    /// Variety score under threshold
    LowFoodVariety,
    /// Breakfast skipped too often
    SkippedBreakfast,
    /// Calorie trend rising against a loss goal
    RisingCalorieTrend,
}

/// One textual recommendation with its rationale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Short actionable title
    pub title: String,
    /// Why the rule fired, phrased against the user's own numbers
    pub rationale: String,
    /// Urgency rank
    pub priority: RecommendationPriority,
    /// Signal that triggered the rule
    pub trigger: TriggerSignal,
}

/// Evaluates the recommendation rules
///
/// Rule order (ties keep this order):
/// 1. late-night eating (high)
/// 2. portion control (high)
/// 3. meal schedule regularity (medium)
/// 4. food variety (medium)
/// 5. skipped breakfast (medium)
/// 6. rising calorie trend vs. loss goal (low)
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub const fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// Evaluate all rules and return the ranked recommendation list
    #[must_use]
    pub fn generate(
        &self,
        signals: &BehaviorSignals,
        trend: Option<&TrendResult>,
        goal_type: GoalType,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if signals.late_night_count > 0 {
            recommendations.push(Recommendation {
                title: "Move your last meal earlier".to_owned(),
                rationale: format!(
                    "{} late-night eating occasion(s) this period; finishing dinner at least 3 hours before bed supports sleep and digestion.",
                    signals.late_night_count
                ),
                priority: RecommendationPriority::High,
                trigger: TriggerSignal::LateNightEating,
            });
        }

        let over = signals.days_over_target;
        let under = signals.days_under_target;
        if over > under && over - under > self.config.portion_margin_days {
            recommendations.push(Recommendation {
                title: "Tighten portion sizes".to_owned(),
                rationale: format!(
                    "{over} day(s) over your calorie target against {under} under; smaller plates and slower eating help close the gap."
                ),
                priority: RecommendationPriority::High,
                trigger: TriggerSignal::CalorieOverage,
            });
        }

        let irregular: Vec<String> = signals
            .meal_timing
            .iter()
            .filter(|(_, stats)| stats.tier == ConsistencyTier::NeedsImprovement)
            .map(|(meal_type, _)| format!("{meal_type:?}").to_lowercase())
            .collect();
        if !irregular.is_empty() {
            recommendations.push(Recommendation {
                title: "Settle into a fixed meal schedule".to_owned(),
                rationale: format!(
                    "Meal times vary widely for: {}. Eating at consistent times steadies appetite and energy.",
                    irregular.join(", ")
                ),
                priority: RecommendationPriority::Medium,
                trigger: TriggerSignal::IrregularMealTiming,
            });
        }

        let variety = signals.variety.average_distinct_foods_per_day;
        if variety < self.config.variety_threshold {
            let repeats = signals
                .variety
                .top_repeated_foods
                .first()
                .map_or_else(String::new, |food| {
                    format!(" \"{}\" appears {} time(s).", food.name, food.count)
                });
            recommendations.push(Recommendation {
                title: "Diversify your plate".to_owned(),
                rationale: format!(
                    "You average {variety:.1} distinct foods per day.{repeats} A wider rotation broadens micronutrient coverage."
                ),
                priority: RecommendationPriority::Medium,
                trigger: TriggerSignal::LowFoodVariety,
            });
        }

        let skipped_breakfast = signals
            .skipped_meals
            .get(&mealtrics_core::MealType::Breakfast)
            .copied()
            .unwrap_or(0);
        if skipped_breakfast > self.config.skipped_breakfast_threshold {
            recommendations.push(Recommendation {
                title: "Make breakfast a habit".to_owned(),
                rationale: format!(
                    "Breakfast was skipped on {skipped_breakfast} day(s); a regular morning meal makes later portions easier to control."
                ),
                priority: RecommendationPriority::Medium,
                trigger: TriggerSignal::SkippedBreakfast,
            });
        }

        if let Some(trend) = trend {
            if goal_type == GoalType::Lose
                && trend.direction == TrendDirection::Increasing
                && trend.magnitude == TrendMagnitude::Significant
            {
                recommendations.push(Recommendation {
                    title: "Review your rising intake".to_owned(),
                    rationale: format!(
                        "Daily calories are climbing about {:.0} kcal/day while your goal is weight loss; a weekly check-in on portions can catch the drift early.",
                        trend.slope
                    ),
                    priority: RecommendationPriority::Low,
                    trigger: TriggerSignal::RisingCalorieTrend,
                });
            }
        }

        // Stable sort keeps declaration order within a priority band
        recommendations.sort_by_key(|r| r.priority);
        recommendations.truncate(self.config.max_recommendations);
        debug!(count = recommendations.len(), "generated recommendations");
        recommendations
    }
}
