// ABOUTME: Buckets meal entries into daily, weekly, and monthly aggregates
// ABOUTME: Attribution uses the local calendar day in the caller's reference time zone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Aggregation
//!
//! Folds a collection of [`MealEntry`] values into per-period totals.
//! Entries are attributed to the calendar day (or ISO week, or month) of
//! consumption in the supplied reference time zone, not the UTC day;
//! circadian analysis downstream depends on local time.
//!
//! The fold is a plain sum per bucket followed by a sort on the bucket key,
//! so it is associative and commutative over entries: callers may supply
//! entries in any order and get identical output.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate, TimeZone};
use mealtrics_core::{EngineError, EngineResult, MealEntry, MealType};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Period granularity for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One bucket per local calendar day
    Daily,
    /// One bucket per ISO week (Monday-based)
    Weekly,
    /// One bucket per calendar month
    Monthly,
}

/// Summed calories and macros
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroTotals {
    /// Total calories in kcal
    pub calories: f64,
    /// Total protein in grams
    pub protein_g: f64,
    /// Total carbohydrates in grams
    pub carbohydrates_g: f64,
    /// Total fat in grams
    pub fat_g: f64,
}

impl MacroTotals {
    fn accumulate(&mut self, entry: &MealEntry) {
        self.calories += entry.calories;
        self.protein_g += entry.protein_g;
        self.carbohydrates_g += entry.carbohydrates_g;
        self.fat_g += entry.fat_g;
    }

    fn divided_by(self, divisor: f64) -> Self {
        Self {
            calories: self.calories / divisor,
            protein_g: self.protein_g / divisor,
            carbohydrates_g: self.carbohydrates_g / divisor,
            fat_g: self.fat_g / divisor,
        }
    }
}

/// Nutrition totals for one period bucket.
///
/// Recomputed on demand from the entries; never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAggregate {
    /// First local day of the period (inclusive)
    pub start: NaiveDate,
    /// Last local day of the period (inclusive)
    pub end: NaiveDate,
    /// Summed calories and macros for the period
    pub totals: MacroTotals,
    /// Per-meal-type subtotals (absent meal types omitted)
    pub by_meal_type: BTreeMap<MealType, MacroTotals>,
    /// Number of entries attributed to the period
    pub entry_count: usize,
}

impl PeriodAggregate {
    fn empty(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            totals: MacroTotals::default(),
            by_meal_type: BTreeMap::new(),
            entry_count: 0,
        }
    }

    /// Number of local days the period spans
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Totals averaged over the days of the period
    #[must_use]
    pub fn daily_average(&self) -> MacroTotals {
        // days() >= 1 for any well-formed period
        self.totals.divided_by(self.days() as f64)
    }
}

/// Buckets meal entries into ordered period aggregates
pub struct Aggregator;

impl Aggregator {
    /// Aggregate entries at the given granularity.
    ///
    /// Entry timestamps are converted to `tz` before bucketing. When
    /// `range` is supplied, every bucket intersecting the range is emitted
    /// (zero-filled if needed) and entries outside it are ignored; without a
    /// range, only buckets with at least one entry are emitted. Empty input
    /// yields an empty vector; "no meals today" is not an error.
    #[must_use]
    pub fn aggregate<Tz: TimeZone>(
        entries: &[MealEntry],
        granularity: Granularity,
        tz: &Tz,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Vec<PeriodAggregate> {
        let mut buckets: BTreeMap<NaiveDate, PeriodAggregate> = BTreeMap::new();

        if let Some((from, to)) = range {
            let mut start = Self::bucket_start(from, granularity);
            while start <= to {
                let end = Self::bucket_end(start, granularity);
                buckets.insert(start, PeriodAggregate::empty(start, end));
                start = Self::next_bucket(start, granularity);
            }
        }

        for entry in entries {
            let local_day = entry.timestamp.with_timezone(tz).date_naive();
            if let Some((from, to)) = range {
                if local_day < from || local_day > to {
                    continue;
                }
            }
            let start = Self::bucket_start(local_day, granularity);
            let bucket = buckets.entry(start).or_insert_with(|| {
                PeriodAggregate::empty(start, Self::bucket_end(start, granularity))
            });
            bucket.totals.accumulate(entry);
            bucket
                .by_meal_type
                .entry(entry.meal_type)
                .or_default()
                .accumulate(entry);
            bucket.entry_count += 1;
        }

        trace!(
            entries = entries.len(),
            buckets = buckets.len(),
            ?granularity,
            "aggregated meal entries"
        );
        buckets.into_values().collect()
    }

    /// Like [`Self::aggregate`], for callers with a mandatory non-empty
    /// contract.
    ///
    /// # Errors
    /// Returns [`EngineError::EmptyInput`] when `entries` is empty.
    pub fn aggregate_required<Tz: TimeZone>(
        entries: &[MealEntry],
        granularity: Granularity,
        tz: &Tz,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> EngineResult<Vec<PeriodAggregate>> {
        if entries.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        Ok(Self::aggregate(entries, granularity, tz, range))
    }

    /// Daily calorie series suitable for the trend analyzer
    #[must_use]
    pub fn daily_calorie_series(daily: &[PeriodAggregate]) -> Vec<(NaiveDate, f64)> {
        daily.iter().map(|a| (a.start, a.totals.calories)).collect()
    }

    fn bucket_start(day: NaiveDate, granularity: Granularity) -> NaiveDate {
        match granularity {
            Granularity::Daily => day,
            Granularity::Weekly => {
                let back = u64::from(day.weekday().num_days_from_monday());
                day.checked_sub_days(Days::new(back)).unwrap_or(day)
            }
            Granularity::Monthly => day.with_day(1).unwrap_or(day),
        }
    }

    fn bucket_end(start: NaiveDate, granularity: Granularity) -> NaiveDate {
        match granularity {
            Granularity::Daily => start,
            Granularity::Weekly => start.checked_add_days(Days::new(6)).unwrap_or(start),
            Granularity::Monthly => Self::next_bucket(start, granularity)
                .checked_sub_days(Days::new(1))
                .unwrap_or(start),
        }
    }

    fn next_bucket(start: NaiveDate, granularity: Granularity) -> NaiveDate {
        match granularity {
            Granularity::Daily => start.checked_add_days(Days::new(1)).unwrap_or(start),
            Granularity::Weekly => start.checked_add_days(Days::new(7)).unwrap_or(start),
            Granularity::Monthly => start.checked_add_months(Months::new(1)).unwrap_or(start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn weekly_bucket_starts_on_monday() {
        // 2024-03-07 is a Thursday
        let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let start = Aggregator::bucket_start(day, Granularity::Weekly);
        assert_eq!(start.weekday(), Weekday::Mon);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(
            Aggregator::bucket_end(start, Granularity::Weekly),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
    }

    #[test]
    fn monthly_bucket_covers_whole_month() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let start = Aggregator::bucket_start(day, Granularity::Monthly);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        // 2024 is a leap year
        assert_eq!(
            Aggregator::bucket_end(start, Granularity::Monthly),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
