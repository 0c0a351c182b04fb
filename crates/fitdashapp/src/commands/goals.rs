use crate::commands::Outcome;
use crate::error::Result;
use crate::model::{NewGoal, Snapshot};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub fn add(
    draft: &mut Snapshot,
    new: &NewGoal,
    id: Uuid,
    created_at: DateTime<Utc>,
) -> Result<Outcome> {
    new.validate()?;
    draft.goals.push(new.clone().into_goal(id, created_at));
    Ok(Outcome::Created { id })
}

/// Stores `value` as-is. Over-target and negative values are accepted here;
/// range checks belong to whoever collects the value.
pub fn update_progress(draft: &mut Snapshot, id: &Uuid, value: f64) -> Outcome {
    match draft.goals.iter_mut().find(|g| g.id == *id) {
        Some(goal) => {
            goal.current_value = value;
            Outcome::ProgressSet { id: *id, value }
        }
        None => Outcome::NotFound { id: *id },
    }
}

pub fn remove(draft: &mut Snapshot, id: &Uuid) -> Outcome {
    let before = draft.goals.len();
    draft.goals.retain(|g| g.id != *id);
    if draft.goals.len() == before {
        Outcome::NotFound { id: *id }
    } else {
        Outcome::Removed { id: *id }
    }
}
