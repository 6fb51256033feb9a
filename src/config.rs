// ABOUTME: Environment-driven server configuration
// ABOUTME: Port, reference time zone offset, and analysis threshold overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Server Configuration
//!
//! Environment-only configuration: every knob is a `MEALTRICS_*` variable
//! with a documented default, read once at startup. The analysis thresholds
//! keep their engine defaults unless explicitly overridden.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `MEALTRICS_HTTP_PORT` | `8081` | HTTP listen port |
//! | `MEALTRICS_UTC_OFFSET_MINUTES` | `0` | Reference time zone as minutes east of UTC |
//! | `MEALTRICS_DEFAULT_CALORIE_GOAL` | `2000` | Calorie target assumed when a user has not calculated goals |
//! | `MEALTRICS_LATE_NIGHT_CUTOFF_HOUR` | `22` | Local hour at which eating counts as late-night |
//! | `MEALTRICS_TREND_EPSILON` | `5.0` | Minimum abs(slope) registering as a trend |

use std::env;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};
use mealtrics_intelligence::AnalysisConfig;

use crate::errors::{AppError, AppResult};

const DEFAULT_HTTP_PORT: u16 = 8081;
const DEFAULT_CALORIE_GOAL: f64 = 2000.0;

/// Runtime configuration for the Mealtrics server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Reference time zone, minutes east of UTC; meal entries are bucketed
    /// into local days of this zone
    pub utc_offset_minutes: i32,
    /// Calorie target used for behavior comparisons when the caller has no
    /// calculated goals
    pub default_calorie_goal: f64,
    /// Engine thresholds
    pub analysis: AnalysisConfig,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    /// Returns a `ConfigError` when a variable is set but unparseable or
    /// out of range.
    pub fn from_env() -> AppResult<Self> {
        let mut analysis = AnalysisConfig::default();
        if let Some(hour) = env_parsed::<u32>("MEALTRICS_LATE_NIGHT_CUTOFF_HOUR")? {
            if hour >= 24 {
                return Err(AppError::config(
                    "MEALTRICS_LATE_NIGHT_CUTOFF_HOUR must be 0-23",
                ));
            }
            analysis.patterns.late_night_cutoff_hour = hour;
        }
        if let Some(epsilon) = env_parsed::<f64>("MEALTRICS_TREND_EPSILON")? {
            analysis.trends.epsilon = epsilon;
        }

        let utc_offset_minutes =
            env_parsed::<i32>("MEALTRICS_UTC_OFFSET_MINUTES")?.unwrap_or(0);
        if utc_offset_minutes.abs() >= 24 * 60 {
            return Err(AppError::config(
                "MEALTRICS_UTC_OFFSET_MINUTES must be within one day of UTC",
            ));
        }

        Ok(Self {
            http_port: env_parsed("MEALTRICS_HTTP_PORT")?.unwrap_or(DEFAULT_HTTP_PORT),
            utc_offset_minutes,
            default_calorie_goal: env_parsed("MEALTRICS_DEFAULT_CALORIE_GOAL")?
                .unwrap_or(DEFAULT_CALORIE_GOAL),
            analysis,
        })
    }

    /// The reference time zone as a chrono offset
    #[must_use]
    pub fn reference_offset(&self) -> FixedOffset {
        // Validated at load time; fall back to UTC if mutated out of range
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            utc_offset_minutes: 0,
            default_calorie_goal: DEFAULT_CALORIE_GOAL,
            analysis: AnalysisConfig::default(),
        }
    }
}

/// Read and parse an optional environment variable
fn env_parsed<T: FromStr>(key: &str) -> AppResult<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            AppError::config(format!("{key} is set but could not be parsed: {raw:?}"))
        }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(AppError::config(format!("{key} is not valid unicode")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ServerConfig::default();
        assert_eq!(config.http_port, 8081);
        assert_eq!(config.utc_offset_minutes, 0);
        assert!((config.default_calorie_goal - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reference_offset_matches_minutes() {
        let config = ServerConfig {
            utc_offset_minutes: 120,
            ..ServerConfig::default()
        };
        assert_eq!(config.reference_offset().local_minus_utc(), 120 * 60);
    }
}
