// ABOUTME: Ordinary least squares trend fitting for nutrition time series
// ABOUTME: Classifies slope into direction and magnitude against configured thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Trend Analyzer
//!
//! Fits a line to an ordered `(date, value)` series by ordinary least
//! squares on `(index, value)` pairs and classifies the slope. The epsilon
//! threshold keeps day-to-day noise in calorie logs from registering as a
//! trend; both thresholds live in [`TrendConfig`], not in the code.

use chrono::NaiveDate;
use mealtrics_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

use crate::config::TrendConfig;

/// Minimum points needed to fit a line
const MIN_POINTS: usize = 2;

/// Which way a metric is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Slope above +epsilon
    Increasing,
    /// Slope below -epsilon
    Decreasing,
    /// Slope within the noise band
    Stable,
}

/// How strongly the metric is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMagnitude {
    /// |slope| at or above the significance threshold
    Significant,
    /// Anything smaller
    Marginal,
}

/// A classified linear trend for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Label of the series the trend was fit on (e.g. `daily_calories`)
    pub metric: String,
    /// Regression slope in metric units per day
    pub slope: f64,
    /// Direction classification
    pub direction: TrendDirection,
    /// Magnitude classification
    pub magnitude: TrendMagnitude,
}

/// Fits and classifies linear trends
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    /// Create an analyzer with the given configuration
    #[must_use]
    pub const fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Fit a trend to the series and classify it.
    ///
    /// # Errors
    /// Returns [`EngineError::InsufficientData`] for fewer than 2 points;
    /// callers decide whether that surfaces as "no trend available".
    pub fn analyze(&self, metric: &str, series: &[(NaiveDate, f64)]) -> EngineResult<TrendResult> {
        if series.len() < MIN_POINTS {
            return Err(EngineError::InsufficientData {
                required: MIN_POINTS,
                actual: series.len(),
            });
        }

        let slope = Self::ols_slope(series);
        let direction = if slope > self.config.epsilon {
            TrendDirection::Increasing
        } else if slope < -self.config.epsilon {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        };
        let magnitude = if slope.abs() >= self.config.significance_threshold {
            TrendMagnitude::Significant
        } else {
            TrendMagnitude::Marginal
        };

        Ok(TrendResult {
            metric: metric.to_owned(),
            slope,
            direction,
            magnitude,
        })
    }

    /// Least-squares slope over `(index, value)` pairs
    fn ols_slope(series: &[(NaiveDate, f64)]) -> f64 {
        let n = series.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = series.iter().map(|(_, v)| v).sum::<f64>() / n;

        let mut covariance = 0.0;
        let mut variance = 0.0;
        for (i, (_, value)) in series.iter().enumerate() {
            let dx = i as f64 - mean_x;
            covariance += dx * (value - mean_y);
            variance += dx * dx;
        }
        // variance > 0 whenever n >= 2
        covariance / variance
    }
}
