//! # Derived Metrics
//!
//! Everything the dashboard shows that is not stored: totals, the weekly series,
//! the category mix, the hydration streak, and a few per-record summaries.
//!
//! All functions here are pure. They read a published [`Snapshot`] (already sorted)
//! and never write to it, so they can run as often as needed, from any thread,
//! without locking. Empty collections give zero/empty results rather than errors.
//!
//! - [`totals`]: workout count, minutes, calories
//! - [`weekly`]: Sunday-aligned week buckets, see [`weekly::week_start_of`]
//! - [`categories`]: workouts per category and their shares
//! - [`hydration`]: consecutive most-recent days at or above the water threshold
//! - [`wellness`]: latest entry and average sleep
//! - [`goals`]: completion percentage and remaining amount per goal

use crate::model::{Category, Snapshot};
use serde::Serialize;
use std::collections::BTreeMap;

pub mod categories;
pub mod goals;
pub mod hydration;
pub mod totals;
pub mod weekly;
pub mod wellness;

pub use categories::{category_histogram, category_shares, CategoryHistogram};
pub use goals::{goal_progress, GoalProgress};
pub use hydration::{hydration_streak, hydration_streak_with_threshold, HYDRATION_THRESHOLD_LITERS};
pub use totals::{totals, Totals};
pub use weekly::{recent_weeks, week_start_of, weekly_series, WeekBucket};
pub use wellness::{wellness_summary, WellnessSummary};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsOptions {
    pub hydration_threshold_liters: f64,
}

impl Default for MetricsOptions {
    fn default() -> Self {
        Self {
            hydration_threshold_liters: HYDRATION_THRESHOLD_LITERS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub totals: Totals,
    pub weekly_series: Vec<WeekBucket>,
    pub categories: CategoryHistogram,
    pub category_shares: BTreeMap<Category, u32>,
    pub hydration_streak: usize,
    pub wellness: WellnessSummary,
    pub goals: Vec<GoalProgress>,
}

impl DerivedMetrics {
    pub fn compute(snapshot: &Snapshot) -> Self {
        Self::compute_with(snapshot, &MetricsOptions::default())
    }

    pub fn compute_with(snapshot: &Snapshot, options: &MetricsOptions) -> Self {
        let categories = category_histogram(&snapshot.workouts);
        Self {
            totals: totals(&snapshot.workouts),
            weekly_series: weekly_series(&snapshot.workouts),
            category_shares: category_shares(&categories),
            categories,
            hydration_streak: hydration_streak_with_threshold(
                &snapshot.wellness,
                options.hydration_threshold_liters,
            ),
            wellness: wellness_summary(&snapshot.wellness),
            goals: snapshot.goals.iter().map(goal_progress).collect(),
        }
    }

    pub fn recent_weeks(&self, n: usize) -> &[WeekBucket] {
        recent_weeks(&self.weekly_series, n)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_empty_snapshot_gives_zero_metrics() {
        let metrics = DerivedMetrics::compute(&Snapshot::empty(Utc::now()));
        assert_eq!(metrics.totals, Totals::default());
        assert!(metrics.weekly_series.is_empty());
        assert!(metrics.categories.is_empty());
        assert_eq!(metrics.hydration_streak, 0);
        assert!(metrics.goals.is_empty());
    }

    #[test]
    fn test_compute_is_consistent_with_parts() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let mut snapshot = Snapshot::empty(Utc::now());
        snapshot.workouts = vec![
            fixtures::workout(d, Category::Strength, 40, 300),
            fixtures::workout(d, Category::Cardio, 25, 260),
        ];

        let metrics = DerivedMetrics::compute(&snapshot);
        assert_eq!(metrics.totals.minutes, 65);
        assert_eq!(metrics.weekly_series.len(), 1);
        assert_eq!(metrics.weekly_series[0].sessions, 2);
        assert_eq!(metrics.categories[&Category::Cardio], 1);
        assert_eq!(metrics.category_shares[&Category::Strength], 50);
        assert_eq!(metrics.recent_weeks(4).len(), 1);
    }
}
