// ABOUTME: Assembles journal snapshots into aggregates, signals, trends, and recommendations
// ABOUTME: Owns the analysis window arithmetic in the reference time zone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Analysis Service
//!
//! The handlers deal in HTTP shapes; this service deals in engine calls.
//! One instance per process, holding the engine configuration and the
//! reference time zone. Every method is a pure function of its arguments;
//! the service itself has no mutable state, so concurrent requests share it
//! freely behind an `Arc`.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use mealtrics_core::models::{KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN_CARB};
use mealtrics_core::{GoalTargets, GoalType, MealEntry};
use mealtrics_intelligence::{
    Aggregator, AnalysisConfig, BehaviorSignals, GoalCalculator, Granularity, PatternAnalyzer,
    PeriodAggregate, Recommendation, RecommendationEngine, TrendAnalyzer, TrendResult,
};

use crate::config::ServerConfig;

/// Metric label used for the calorie trend series
const CALORIE_METRIC: &str = "daily_calories";

/// Stateless assembly of engine calls for the HTTP layer
#[derive(Debug, Clone)]
pub struct AnalysisService {
    offset: FixedOffset,
    analysis: AnalysisConfig,
    default_targets: GoalTargets,
}

impl AnalysisService {
    /// Build the service from server configuration.
    ///
    /// The default targets apply the configured macro split to the
    /// configured default calorie goal; they stand in for users who log
    /// meals without ever calculating goals (the original app assumed
    /// 2000 kcal in the same situation).
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        let split = config.analysis.goals.macro_split;
        let calorie_goal = config.default_calorie_goal;
        Self {
            offset: config.reference_offset(),
            analysis: config.analysis,
            default_targets: GoalTargets {
                calorie_goal,
                protein_goal_g: (calorie_goal * split.protein_pct / KCAL_PER_G_PROTEIN_CARB)
                    .round(),
                carb_goal_g: (calorie_goal * split.carb_pct / KCAL_PER_G_PROTEIN_CARB).round(),
                fat_goal_g: (calorie_goal * split.fat_pct / KCAL_PER_G_FAT).round(),
            },
        }
    }

    /// The goal calculator configured for this deployment
    #[must_use]
    pub fn goal_calculator(&self) -> GoalCalculator {
        GoalCalculator::new(self.analysis.goals)
    }

    /// Targets assumed for users without calculated goals
    #[must_use]
    pub const fn default_targets(&self) -> GoalTargets {
        self.default_targets
    }

    /// The deployment's reference time zone
    #[must_use]
    pub const fn reference_offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local-day window covering the last `period_days` days ending at `now`
    #[must_use]
    pub fn window(&self, period_days: u32, now: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
        let end = now.with_timezone(&self.offset).date_naive();
        let back = u64::from(period_days.saturating_sub(1));
        let start = end.checked_sub_days(Days::new(back)).unwrap_or(end);
        (start, end)
    }

    /// Entries whose local day falls inside the window
    #[must_use]
    pub fn window_entries(
        &self,
        entries: &[MealEntry],
        window: (NaiveDate, NaiveDate),
    ) -> Vec<MealEntry> {
        entries
            .iter()
            .filter(|e| {
                let day = e.timestamp.with_timezone(&self.offset).date_naive();
                day >= window.0 && day <= window.1
            })
            .cloned()
            .collect()
    }

    /// Zero-filled daily aggregates over the window
    #[must_use]
    pub fn daily_aggregates(
        &self,
        entries: &[MealEntry],
        window: (NaiveDate, NaiveDate),
    ) -> Vec<PeriodAggregate> {
        Aggregator::aggregate(entries, Granularity::Daily, &self.offset, Some(window))
    }

    /// Calorie trend over the days that actually have entries.
    ///
    /// `None` when fewer than two logged days exist: the engines report
    /// `InsufficientData` and this layer surfaces it as "no trend
    /// available", per the summary endpoints' contract.
    #[must_use]
    pub fn calorie_trend(&self, daily: &[PeriodAggregate]) -> Option<TrendResult> {
        let observed: Vec<PeriodAggregate> = daily
            .iter()
            .filter(|a| a.entry_count > 0)
            .cloned()
            .collect();
        let series = Aggregator::daily_calorie_series(&observed);
        TrendAnalyzer::new(self.analysis.trends)
            .analyze(CALORIE_METRIC, &series)
            .ok()
    }

    /// Behavioral signals for the windowed entries
    #[must_use]
    pub fn behavior(&self, entries: &[MealEntry], targets: &GoalTargets) -> BehaviorSignals {
        PatternAnalyzer::new(self.analysis.patterns).analyze(entries, targets, &self.offset)
    }

    /// Ranked recommendations for the signals
    #[must_use]
    pub fn recommendations(
        &self,
        signals: &BehaviorSignals,
        trend: Option<&TrendResult>,
        goal_type: GoalType,
    ) -> Vec<Recommendation> {
        RecommendationEngine::new(self.analysis.recommendations).generate(signals, trend, goal_type)
    }
}
