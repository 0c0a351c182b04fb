use crate::commands::Outcome;
use crate::model::Snapshot;

pub fn run(draft: &mut Snapshot) -> Outcome {
    draft.workouts.clear();
    draft.wellness.clear();
    draft.goals.clear();
    Outcome::Reset
}
