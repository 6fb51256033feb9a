// ABOUTME: Behavioral signal extraction from meal logs
// ABOUTME: Meal-timing consistency, skipped meals, snacking windows, and food variety
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Pattern Analyzer
//!
//! Derives [`BehaviorSignals`] from a user's meal entries over a period.
//! All clock arithmetic happens in the caller's reference time zone; all
//! sub-computations tolerate empty sub-groups and return explicit zeros or
//! `None` instead of dividing by zero.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, TimeZone, Timelike};
use mealtrics_core::{GoalTargets, MealEntry, MealType};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PatternConfig;

/// Categorical rating of how regular a meal time is across the period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyTier {
    /// Standard deviation within the excellent cutoff
    Excellent,
    /// Standard deviation within the good cutoff
    Good,
    /// Anything looser
    NeedsImprovement,
}

/// Time-of-day window a snack falls into
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SnackWindow {
    /// 06:00 up to 12:00 local
    Morning,
    /// 12:00 up to 18:00 local
    Afternoon,
    /// 18:00 up to the late-night cutoff
    Evening,
    /// From the cutoff until 06:00 local
    LateNight,
}

/// Timing statistics for one meal type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealTimingStats {
    /// Mean clock time in minutes since local midnight
    pub mean_minutes: f64,
    /// Population standard deviation of the clock time, in minutes
    pub stddev_minutes: f64,
    /// Tier derived from the standard deviation
    pub tier: ConsistencyTier,
    /// Number of entries behind the statistics
    pub sample_count: usize,
}

impl MealTimingStats {
    /// Mean clock time rendered as `HH:MM`
    #[must_use]
    pub fn mean_clock_time(&self) -> String {
        let minutes = (self.mean_minutes.round() as i64).rem_euclid(24 * 60);
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

/// A food and how many times it was logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedFood {
    /// Food identifier as logged
    pub name: String,
    /// Times it appeared over the period
    pub count: u32,
}

/// Food-variety signals
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VarietySignals {
    /// Distinct foods per local day, averaged over days with entries
    pub average_distinct_foods_per_day: f64,
    /// Most repeated foods, ties broken by first-seen order
    pub top_repeated_foods: Vec<RepeatedFood>,
}

/// Behavioral signals derived from one user's meal log
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BehaviorSignals {
    /// Timing statistics per meal type (absent types omitted)
    pub meal_timing: BTreeMap<MealType, MealTimingStats>,
    /// Days on which an expected meal type had no entry, per type
    pub skipped_meals: BTreeMap<MealType, u32>,
    /// Snack entries per time-of-day window
    pub snacking: BTreeMap<SnackWindow, u32>,
    /// Entries of any meal type in the late-night window
    pub late_night_count: u32,
    /// Food-variety signals
    pub variety: VarietySignals,
    /// Mean hours between successive meals, ignoring gaps of a day or more
    pub average_meal_gap_hours: Option<f64>,
    /// Days whose calories exceeded the target
    pub days_over_target: u32,
    /// Days whose calories fell below the under-target fraction
    pub days_under_target: u32,
    /// Average daily calories on Saturdays and Sundays
    pub weekend_average_calories: Option<f64>,
    /// Average daily calories on weekdays
    pub weekday_average_calories: Option<f64>,
}

/// Entry fields pre-resolved into the reference time zone
struct LocalEntry {
    day: NaiveDate,
    minute_of_day: u32,
    meal_type: MealType,
    calories: f64,
}

/// Derives behavioral signals from meal entries
#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    config: PatternConfig,
}

impl PatternAnalyzer {
    /// Create an analyzer with the given configuration
    #[must_use]
    pub const fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    /// Analyze one user's entries against their targets.
    ///
    /// Empty input is not an error: the result is all zeros and `None`s.
    #[must_use]
    pub fn analyze<Tz: TimeZone>(
        &self,
        entries: &[MealEntry],
        targets: &GoalTargets,
        tz: &Tz,
    ) -> BehaviorSignals {
        if entries.is_empty() {
            return BehaviorSignals::default();
        }

        let local: Vec<LocalEntry> = entries
            .iter()
            .map(|e| {
                let at = e.timestamp.with_timezone(tz);
                LocalEntry {
                    day: at.date_naive(),
                    minute_of_day: at.hour() * 60 + at.minute(),
                    meal_type: e.meal_type,
                    calories: e.calories,
                }
            })
            .collect();

        let daily_calories = Self::daily_calories(&local);
        let (days_over, days_under) = self.count_target_days(&daily_calories, targets);
        let (weekend_avg, weekday_avg) = Self::weekend_split(&daily_calories);

        let signals = BehaviorSignals {
            meal_timing: self.analyze_meal_timing(&local),
            skipped_meals: Self::count_skipped_meals(&local),
            snacking: self.snack_distribution(&local),
            late_night_count: self.count_late_night(&local),
            variety: self.analyze_variety(entries, &local),
            average_meal_gap_hours: Self::average_meal_gap(entries),
            days_over_target: days_over,
            days_under_target: days_under,
            weekend_average_calories: weekend_avg,
            weekday_average_calories: weekday_avg,
        };
        debug!(
            entries = entries.len(),
            late_night = signals.late_night_count,
            days_over = signals.days_over_target,
            "derived behavior signals"
        );
        signals
    }

    fn analyze_meal_timing(&self, local: &[LocalEntry]) -> BTreeMap<MealType, MealTimingStats> {
        let mut minutes_by_type: BTreeMap<MealType, Vec<f64>> = BTreeMap::new();
        for entry in local {
            minutes_by_type
                .entry(entry.meal_type)
                .or_default()
                .push(f64::from(entry.minute_of_day));
        }

        minutes_by_type
            .into_iter()
            .map(|(meal_type, minutes)| {
                let mean = minutes.iter().sum::<f64>() / minutes.len() as f64;
                let variance = minutes.iter().map(|m| (m - mean).powi(2)).sum::<f64>()
                    / minutes.len() as f64;
                let stddev = variance.sqrt();
                let tier = if stddev <= self.config.excellent_max_stddev_minutes {
                    ConsistencyTier::Excellent
                } else if stddev <= self.config.good_max_stddev_minutes {
                    ConsistencyTier::Good
                } else {
                    ConsistencyTier::NeedsImprovement
                };
                (
                    meal_type,
                    MealTimingStats {
                        mean_minutes: mean,
                        stddev_minutes: stddev,
                        tier,
                        sample_count: minutes.len(),
                    },
                )
            })
            .collect()
    }

    fn count_skipped_meals(local: &[LocalEntry]) -> BTreeMap<MealType, u32> {
        let mut per_day: BTreeMap<NaiveDate, HashSet<MealType>> = BTreeMap::new();
        for entry in local {
            per_day.entry(entry.day).or_default().insert(entry.meal_type);
        }

        let mut skipped: BTreeMap<MealType, u32> =
            MealType::EXPECTED.iter().map(|t| (*t, 0)).collect();
        let (Some(first), Some(last)) = (
            per_day.keys().next().copied(),
            per_day.keys().next_back().copied(),
        ) else {
            return skipped;
        };

        let mut day = first;
        while day <= last {
            let logged = per_day.get(&day);
            for meal_type in MealType::EXPECTED {
                if !logged.is_some_and(|set| set.contains(&meal_type)) {
                    if let Some(count) = skipped.get_mut(&meal_type) {
                        *count += 1;
                    }
                }
            }
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }
        skipped
    }

    fn window_for(&self, minute_of_day: u32) -> SnackWindow {
        let hour = minute_of_day / 60;
        let cutoff = self.config.late_night_cutoff_hour;
        if hour >= cutoff || hour < 6 {
            SnackWindow::LateNight
        } else if hour < 12 {
            SnackWindow::Morning
        } else if hour < 18 {
            SnackWindow::Afternoon
        } else {
            SnackWindow::Evening
        }
    }

    fn snack_distribution(&self, local: &[LocalEntry]) -> BTreeMap<SnackWindow, u32> {
        let mut windows: BTreeMap<SnackWindow, u32> = BTreeMap::new();
        for entry in local {
            if entry.meal_type == MealType::Snack {
                *windows.entry(self.window_for(entry.minute_of_day)).or_insert(0) += 1;
            }
        }
        windows
    }

    fn count_late_night(&self, local: &[LocalEntry]) -> u32 {
        local
            .iter()
            .filter(|e| self.window_for(e.minute_of_day) == SnackWindow::LateNight)
            .count() as u32
    }

    fn analyze_variety(&self, entries: &[MealEntry], local: &[LocalEntry]) -> VarietySignals {
        let mut foods_by_day: BTreeMap<NaiveDate, HashSet<&str>> = BTreeMap::new();
        // name -> (first-seen index, count)
        let mut repeats: HashMap<&str, (usize, u32)> = HashMap::new();
        let mut seen = 0_usize;

        for (entry, at) in entries.iter().zip(local) {
            for name in entry.food_names() {
                foods_by_day.entry(at.day).or_default().insert(name);
                let slot = repeats.entry(name).or_insert_with(|| {
                    let idx = seen;
                    seen += 1;
                    (idx, 0)
                });
                slot.1 += 1;
            }
        }

        let average = if foods_by_day.is_empty() {
            0.0
        } else {
            foods_by_day.values().map(HashSet::len).sum::<usize>() as f64
                / foods_by_day.len() as f64
        };

        let mut ranked: Vec<(&str, (usize, u32))> = repeats.into_iter().collect();
        ranked.sort_by(|(_, (a_first, a_count)), (_, (b_first, b_count))| {
            b_count.cmp(a_count).then(a_first.cmp(b_first))
        });
        let top_repeated_foods = ranked
            .into_iter()
            .take(self.config.top_repeated_foods)
            .map(|(name, (_, count))| RepeatedFood {
                name: name.to_owned(),
                count,
            })
            .collect();

        VarietySignals {
            average_distinct_foods_per_day: average,
            top_repeated_foods,
        }
    }

    fn average_meal_gap(entries: &[MealEntry]) -> Option<f64> {
        let mut stamps: Vec<_> = entries.iter().map(|e| e.timestamp).collect();
        stamps.sort_unstable();

        let gaps: Vec<f64> = stamps
            .windows(2)
            .filter_map(|pair| {
                let hours = (pair[1] - pair[0]).num_seconds() as f64 / 3600.0;
                (hours < 24.0).then_some(hours)
            })
            .collect();

        if gaps.is_empty() {
            None
        } else {
            Some(gaps.iter().sum::<f64>() / gaps.len() as f64)
        }
    }

    fn daily_calories(local: &[LocalEntry]) -> BTreeMap<NaiveDate, f64> {
        let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for entry in local {
            *daily.entry(entry.day).or_insert(0.0) += entry.calories;
        }
        daily
    }

    fn count_target_days(
        &self,
        daily: &BTreeMap<NaiveDate, f64>,
        targets: &GoalTargets,
    ) -> (u32, u32) {
        let under_line = targets.calorie_goal * self.config.under_target_fraction;
        let over = daily.values().filter(|cal| **cal > targets.calorie_goal).count() as u32;
        let under = daily.values().filter(|cal| **cal < under_line).count() as u32;
        (over, under)
    }

    fn weekend_split(daily: &BTreeMap<NaiveDate, f64>) -> (Option<f64>, Option<f64>) {
        let mut weekend = Vec::new();
        let mut weekday = Vec::new();
        for (day, calories) in daily {
            if matches!(day.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun) {
                weekend.push(*calories);
            } else {
                weekday.push(*calories);
            }
        }

        let mean = |values: &[f64]| {
            if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
        };
        (mean(&weekend), mean(&weekday))
    }
}
