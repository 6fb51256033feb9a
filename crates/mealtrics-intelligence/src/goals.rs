// ABOUTME: Daily calorie and macro target derivation from a biometric profile
// ABOUTME: Mifflin-St Jeor BMR, activity-scaled TDEE, and rate-based goal adjustment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Goal Calculator
//!
//! Converts a [`UserProfile`] into [`GoalTargets`]:
//!
//! 1. BMR via Mifflin-St Jeor: `10*kg + 6.25*cm - 5*years + 5` for male,
//!    `- 161` instead of `+ 5` for female. The constants are a numeric
//!    contract pinned by tests.
//! 2. TDEE = BMR x activity multiplier.
//! 3. Goal adjustment models 1 kg of body mass as 7700 kcal, spread over the
//!    week: daily delta = `7700 * weekly_rate / 7`, added for gain and
//!    subtracted for loss.
//! 4. Macro split per [`MacroSplit`], whole-gram rounding per macro.
//!
//! A goal that lands below the safety floor is reported as
//! [`EngineError::InfeasibleGoal`], never silently clamped; whether to relax
//! the rate or reject the request is the caller's decision.

use crate::config::GoalConfig;
use mealtrics_core::models::{KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN_CARB};
use mealtrics_core::{EngineError, EngineResult, GoalTargets, GoalType, Sex, UserProfile};
use tracing::debug;

/// Energy content modeled for 1 kg of body-mass change
const KCAL_PER_KG: f64 = 7700.0;

/// Derives calorie and macro targets from a biometric profile
#[derive(Debug, Clone, Default)]
pub struct GoalCalculator {
    config: GoalConfig,
}

impl GoalCalculator {
    /// Create a calculator with the given configuration
    #[must_use]
    pub const fn new(config: GoalConfig) -> Self {
        Self { config }
    }

    /// Basal metabolic rate in kcal/day (Mifflin-St Jeor)
    #[must_use]
    pub fn bmr(profile: &UserProfile) -> f64 {
        let sex_constant = match profile.sex {
            Sex::Male => 5.0,
            Sex::Female => -161.0,
        };
        10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age_years)
            + sex_constant
    }

    /// Total daily energy expenditure in kcal/day
    #[must_use]
    pub fn tdee(profile: &UserProfile) -> f64 {
        Self::bmr(profile) * profile.activity_level.multiplier()
    }

    /// Compute daily calorie and macro targets for the profile
    ///
    /// # Errors
    /// - [`EngineError::InvalidProfile`] when a biometric field is out of
    ///   range or the configured macro split is not a valid partition
    /// - [`EngineError::InfeasibleGoal`] when the adjusted calorie goal
    ///   falls below `safety_floor_factor * BMR`
    pub fn calculate(&self, profile: &UserProfile) -> EngineResult<GoalTargets> {
        Self::validate(profile)?;
        self.config.macro_split.validate()?;

        let bmr = Self::bmr(profile);
        let tdee = Self::tdee(profile);

        let daily_delta = match profile.goal_type {
            GoalType::Maintain => 0.0,
            GoalType::Lose => -(KCAL_PER_KG * profile.weekly_rate_kg) / 7.0,
            GoalType::Gain => (KCAL_PER_KG * profile.weekly_rate_kg) / 7.0,
        };

        let calorie_goal = (tdee + daily_delta).round();
        let floor = self.config.safety_floor_factor * bmr;
        if calorie_goal < floor {
            return Err(EngineError::InfeasibleGoal { calorie_goal, floor });
        }

        let split = self.config.macro_split;
        let targets = GoalTargets {
            calorie_goal,
            protein_goal_g: (calorie_goal * split.protein_pct / KCAL_PER_G_PROTEIN_CARB).round(),
            carb_goal_g: (calorie_goal * split.carb_pct / KCAL_PER_G_PROTEIN_CARB).round(),
            fat_goal_g: (calorie_goal * split.fat_pct / KCAL_PER_G_FAT).round(),
        };
        debug!(
            calorie_goal = targets.calorie_goal,
            bmr, tdee, daily_delta, "calculated goal targets"
        );
        Ok(targets)
    }

    fn validate(profile: &UserProfile) -> EngineResult<()> {
        if !profile.weight_kg.is_finite() || profile.weight_kg <= 0.0 {
            return Err(EngineError::invalid_profile(
                "weight_kg",
                format!("must be positive, got {}", profile.weight_kg),
            ));
        }
        if !profile.height_cm.is_finite() || profile.height_cm <= 0.0 {
            return Err(EngineError::invalid_profile(
                "height_cm",
                format!("must be positive, got {}", profile.height_cm),
            ));
        }
        if profile.age_years < 1 {
            return Err(EngineError::invalid_profile("age_years", "must be at least 1"));
        }
        if !profile.weekly_rate_kg.is_finite() || profile.weekly_rate_kg < 0.0 {
            return Err(EngineError::invalid_profile(
                "weekly_rate_kg",
                format!("must be non-negative, got {}", profile.weekly_rate_kg),
            ));
        }
        Ok(())
    }
}
