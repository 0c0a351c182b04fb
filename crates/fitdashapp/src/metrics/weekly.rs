//! Weekly time series.
//!
//! Weeks start on **Sunday**. A workout dated Saturday 2024-05-18 belongs to the week
//! starting Sunday 2024-05-12; one dated Sunday 2024-05-19 starts the next week.
//! Records carry calendar days, not instants, so no timezone is involved in bucketing.

use crate::model::Workout;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    pub minutes: u64,
    pub calories: u64,
    pub sessions: usize,
}

/// The Sunday on or before `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    // Only fails below NaiveDate::MIN, which no workout date reaches
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// One bucket per week that has at least one workout, oldest week first.
pub fn weekly_series(workouts: &[Workout]) -> Vec<WeekBucket> {
    let mut buckets: BTreeMap<NaiveDate, WeekBucket> = BTreeMap::new();

    for workout in workouts {
        let week_start = week_start_of(workout.date);
        let bucket = buckets.entry(week_start).or_insert(WeekBucket {
            week_start,
            minutes: 0,
            calories: 0,
            sessions: 0,
        });
        bucket.minutes += u64::from(workout.duration_minutes);
        bucket.calories += u64::from(workout.calories);
        bucket.sessions += 1;
    }

    buckets.into_values().collect()
}

/// The last `n` weeks of an ascending series.
pub fn recent_weeks(series: &[WeekBucket], n: usize) -> &[WeekBucket] {
    &series[series.len().saturating_sub(n)..]
}
