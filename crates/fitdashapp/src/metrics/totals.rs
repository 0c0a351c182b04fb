use crate::model::Workout;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub workouts: usize,
    pub minutes: u64,
    pub calories: u64,
}

pub fn totals(workouts: &[Workout]) -> Totals {
    workouts.iter().fold(Totals::default(), |acc, w| Totals {
        workouts: acc.workouts + 1,
        minutes: acc.minutes + u64::from(w.duration_minutes),
        calories: acc.calories + u64::from(w.calories),
    })
}
