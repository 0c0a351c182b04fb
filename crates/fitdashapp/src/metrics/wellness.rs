use crate::model::WellnessEntry;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessSummary {
    pub latest: Option<WellnessEntry>,
    pub average_sleep_hours: f64,
    pub entries: usize,
}

/// `entries` newest first; the head is the latest entry.
pub fn wellness_summary(entries: &[WellnessEntry]) -> WellnessSummary {
    if entries.is_empty() {
        return WellnessSummary::default();
    }
    let total_sleep: f64 = entries.iter().map(|e| e.sleep_hours).sum();
    WellnessSummary {
        latest: entries.first().cloned(),
        average_sleep_hours: total_sleep / entries.len() as f64,
        entries: entries.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mood;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn entry(day: u32, sleep_hours: f64) -> WellnessEntry {
        WellnessEntry {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            sleep_hours,
            water_liters: 2.0,
            mood: Mood::Low,
            energy_level: 4,
        }
    }

    #[test]
    fn test_average_sleep_and_latest() {
        let list = vec![entry(3, 8.0), entry(2, 6.0), entry(1, 7.0)];
        let summary = wellness_summary(&list);
        assert_eq!(summary.average_sleep_hours, 7.0);
        assert_eq!(summary.latest.as_ref().map(|e| e.date), Some(list[0].date));
        assert_eq!(summary.entries, 3);
    }

    #[test]
    fn test_empty_summary() {
        let summary = wellness_summary(&[]);
        assert_eq!(summary.average_sleep_hours, 0.0);
        assert!(summary.latest.is_none());
    }
}
