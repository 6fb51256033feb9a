// ABOUTME: Nutrition analytics engines for goal targets, aggregates, patterns, and trends
// ABOUTME: Five pure engines over immutable inputs; no I/O, no shared state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

#![deny(unsafe_code)]

//! # Mealtrics Intelligence
//!
//! The analytical core of the Mealtrics platform. Five engines, each a pure
//! function of its inputs:
//!
//! 1. [`GoalCalculator`](goals::GoalCalculator): biometric profile to daily
//!    calorie and macro targets
//! 2. [`Aggregator`](aggregation::Aggregator): meal entries to
//!    daily/weekly/monthly aggregates
//! 3. [`PatternAnalyzer`](patterns::PatternAnalyzer): entries and targets
//!    to behavioral signals
//! 4. [`TrendAnalyzer`](trends::TrendAnalyzer): a time series to a
//!    classified linear trend
//! 5. [`RecommendationEngine`](recommendations::RecommendationEngine):
//!    signals to a ranked recommendation list
//!
//! Nothing here performs I/O, blocks, or holds process-wide state, so any
//! number of analyses may run in parallel with no coordination. Every
//! threshold the engines consult lives in [`config`] with documented
//! defaults; there are no magic numbers buried in the rule code.

/// Engine configuration: thresholds, tiers, and the macro split
pub mod config;

/// Daily/weekly/monthly aggregation of meal entries
pub mod aggregation;

/// Calorie and macro target derivation (Mifflin-St Jeor)
pub mod goals;

/// Behavioral signal extraction (timing, skipping, snacking, variety)
pub mod patterns;

/// Rule-based recommendation generation
pub mod recommendations;

/// Least-squares trend fitting and classification
pub mod trends;

pub use aggregation::{Aggregator, Granularity, MacroTotals, PeriodAggregate};
pub use config::{
    AnalysisConfig, GoalConfig, MacroSplit, PatternConfig, RecommendationConfig, TrendConfig,
};
pub use goals::GoalCalculator;
pub use patterns::{
    BehaviorSignals, ConsistencyTier, MealTimingStats, PatternAnalyzer, RepeatedFood, SnackWindow,
    VarietySignals,
};
pub use recommendations::{
    Recommendation, RecommendationEngine, RecommendationPriority, TriggerSignal,
};
pub use trends::{TrendAnalyzer, TrendDirection, TrendMagnitude, TrendResult};
