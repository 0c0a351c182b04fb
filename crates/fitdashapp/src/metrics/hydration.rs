use crate::model::WellnessEntry;

pub const HYDRATION_THRESHOLD_LITERS: f64 = 2.0;

/// Consecutive entries, most recent first, with at least 2 liters of water.
///
/// `entries` must already be newest first, as they are in a published snapshot.
pub fn hydration_streak(entries: &[WellnessEntry]) -> usize {
    hydration_streak_with_threshold(entries, HYDRATION_THRESHOLD_LITERS)
}

pub fn hydration_streak_with_threshold(entries: &[WellnessEntry], threshold_liters: f64) -> usize {
    entries
        .iter()
        .take_while(|entry| entry.water_liters >= threshold_liters)
        .count()
}
