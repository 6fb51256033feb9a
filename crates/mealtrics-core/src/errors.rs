// ABOUTME: Engine error taxonomy for the nutrition analysis engines
// ABOUTME: Value-level error signals returned to callers instead of silent corrections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Engine Errors
//!
//! Every analysis engine reports precisely which computation failed and why,
//! and never substitutes a "reasonable" value when an invariant is violated.
//! Whether to clamp, retry, or surface a failure to the end user is a caller
//! decision; the engines only report.

use thiserror::Error;

/// Errors produced by the analysis engines.
///
/// These are ordinary values, not faults: an `InfeasibleGoal` for example is
/// the expected outcome of asking for an aggressive weight-loss rate on a
/// small energy budget, and callers are expected to branch on it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A biometric input failed validation
    #[error("invalid profile: {field} {reason}")]
    InvalidProfile {
        /// Name of the offending profile field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The computed calorie target fell below the safety floor
    #[error("infeasible goal: {calorie_goal:.0} kcal/day is below the safety floor of {floor:.0} kcal/day")]
    InfeasibleGoal {
        /// The calorie goal that was computed
        calorie_goal: f64,
        /// The floor it violated
        floor: f64,
    },

    /// A trend was requested on a series too short to fit
    #[error("insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum number of points the computation needs
        required: usize,
        /// Number of points actually supplied
        actual: usize,
    },

    /// Aggregation was requested with a mandatory non-empty contract
    #[error("empty input: at least one meal entry is required")]
    EmptyInput,
}

impl EngineError {
    /// Create an `InvalidProfile` error for the named field
    #[must_use]
    pub fn invalid_profile(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias used by all engines
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_profile_names_the_field() {
        let err = EngineError::invalid_profile("weight_kg", "must be positive");
        assert_eq!(err.to_string(), "invalid profile: weight_kg must be positive");
    }

    #[test]
    fn infeasible_goal_reports_both_sides() {
        let err = EngineError::InfeasibleGoal {
            calorie_goal: 1100.0,
            floor: 1554.3,
        };
        let msg = err.to_string();
        assert!(msg.contains("1100"));
        assert!(msg.contains("1554"));
    }
}
