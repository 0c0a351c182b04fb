use crate::model::{Goal, GoalUnit};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub id: Uuid,
    pub title: String,
    pub unit: GoalUnit,
    pub current_value: f64,
    pub target_value: f64,
    pub target_date: NaiveDate,
    /// Rounded, clamped to 0..=100.
    pub percent: u32,
    /// Never negative.
    pub remaining: f64,
    pub is_complete: bool,
}

pub fn goal_progress(goal: &Goal) -> GoalProgress {
    let ratio = if goal.target_value > 0.0 {
        goal.current_value / goal.target_value
    } else {
        0.0
    };
    let percent = (ratio * 100.0).round().clamp(0.0, 100.0) as u32;

    GoalProgress {
        id: goal.id,
        title: goal.title.clone(),
        unit: goal.unit,
        current_value: goal.current_value,
        target_value: goal.target_value,
        target_date: goal.target_date,
        percent,
        remaining: (goal.target_value - goal.current_value).max(0.0),
        is_complete: goal.current_value >= goal.target_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn goal(current: f64, target: f64) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            title: "Ride 300 minutes".to_string(),
            unit: GoalUnit::Minutes,
            target_value: target,
            current_value: current,
            target_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_partial_progress() {
        let p = goal_progress(&goal(90.0, 300.0));
        assert_eq!(p.percent, 30);
        assert_eq!(p.remaining, 210.0);
        assert!(!p.is_complete);
    }

    #[test]
    fn test_over_target_clamps_to_hundred() {
        let p = goal_progress(&goal(450.0, 300.0));
        assert_eq!(p.percent, 100);
        assert_eq!(p.remaining, 0.0);
        assert!(p.is_complete);
    }

    #[test]
    fn test_negative_progress_clamps_to_zero() {
        let p = goal_progress(&goal(-20.0, 300.0));
        assert_eq!(p.percent, 0);
        assert_eq!(p.remaining, 320.0);
    }
}
