use crate::model::{Category, Workout};
use std::collections::BTreeMap;

pub type CategoryHistogram = BTreeMap<Category, usize>;

pub fn category_histogram(workouts: &[Workout]) -> CategoryHistogram {
    let mut counts = CategoryHistogram::new();
    for workout in workouts {
        *counts.entry(workout.category).or_insert(0) += 1;
    }
    counts
}

/// Each category's share of all workouts, as a rounded percentage.
pub fn category_shares(histogram: &CategoryHistogram) -> BTreeMap<Category, u32> {
    let total: usize = histogram.values().sum();
    if total == 0 {
        return BTreeMap::new();
    }
    histogram
        .iter()
        .map(|(category, count)| {
            let percent = (*count as f64 / total as f64 * 100.0).round() as u32;
            (*category, percent)
        })
        .collect()
}
