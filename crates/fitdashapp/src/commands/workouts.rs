use crate::commands::Outcome;
use crate::error::Result;
use crate::model::{NewWorkout, Snapshot};
use uuid::Uuid;

/// New workouts go to the head of the list and start out completed.
pub fn add(draft: &mut Snapshot, new: &NewWorkout, id: Uuid) -> Result<Outcome> {
    new.validate()?;
    draft.workouts.insert(0, new.clone().into_workout(id));
    Ok(Outcome::Created { id })
}

pub fn toggle_completion(draft: &mut Snapshot, id: &Uuid) -> Outcome {
    match draft.workouts.iter_mut().find(|w| w.id == *id) {
        Some(workout) => {
            workout.completed = !workout.completed;
            Outcome::Toggled {
                id: *id,
                completed: workout.completed,
            }
        }
        None => Outcome::NotFound { id: *id },
    }
}

pub fn remove(draft: &mut Snapshot, id: &Uuid) -> Outcome {
    let before = draft.workouts.len();
    draft.workouts.retain(|w| w.id != *id);
    if draft.workouts.len() == before {
        Outcome::NotFound { id: *id }
    } else {
        Outcome::Removed { id: *id }
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::fixtures::*;
    use crate::commands::{apply, Mutation, MutationEnv, Outcome};
    use crate::ids::SequentialIds;
    use crate::model::{Category, Snapshot};

    #[test]
    fn add_defaults_to_completed() {
        let ids = SequentialIds::new();
        let env = MutationEnv::new(at(2024, 5, 1, 9), &ids);
        let snapshot = Snapshot::empty(at(2024, 5, 1, 8));

        let t = apply(
            &snapshot,
            &Mutation::AddWorkout(workout("Row", day(2024, 5, 1), Category::Cardio, 25)),
            &env,
        )
        .unwrap();

        let next = t.snapshot.unwrap();
        assert_eq!(next.workouts.len(), 1);
        assert!(next.workouts[0].completed);
        assert_eq!(t.outcome.id(), Some(next.workouts[0].id));
    }

    #[test]
    fn new_workout_sits_ahead_of_same_day_records() {
        let ids = SequentialIds::new();
        let env = MutationEnv::new(at(2024, 5, 1, 9), &ids);
        let snapshot = Snapshot::empty(at(2024, 5, 1, 8));

        let first = apply(
            &snapshot,
            &Mutation::AddWorkout(workout("Morning", day(2024, 5, 1), Category::Cardio, 25)),
            &env,
        )
        .unwrap()
        .snapshot
        .unwrap();
        let second = apply(
            &first,
            &Mutation::AddWorkout(workout("Evening", day(2024, 5, 1), Category::Strength, 40)),
            &env,
        )
        .unwrap()
        .snapshot
        .unwrap();

        assert_eq!(second.workouts[0].name, "Evening");
        assert_eq!(second.workouts[1].name, "Morning");
    }

    #[test]
    fn toggle_flips_completed_twice() {
        let ids = SequentialIds::new();
        let env = MutationEnv::new(at(2024, 5, 1, 9), &ids);
        let snapshot = Snapshot::empty(at(2024, 5, 1, 8));

        let added = apply(
            &snapshot,
            &Mutation::AddWorkout(workout("Swim", day(2024, 5, 2), Category::Cardio, 30)),
            &env,
        )
        .unwrap();
        let id = added.outcome.id().unwrap();
        let snapshot = added.snapshot.unwrap();

        let toggled = apply(&snapshot, &Mutation::ToggleWorkout(id), &env).unwrap();
        assert_eq!(
            toggled.outcome,
            Outcome::Toggled {
                id,
                completed: false
            }
        );
        let snapshot = toggled.snapshot.unwrap();
        assert!(!snapshot.workouts[0].completed);

        let back = apply(&snapshot, &Mutation::ToggleWorkout(id), &env)
            .unwrap()
            .snapshot
            .unwrap();
        assert!(back.workouts[0].completed);
    }

    #[test]
    fn add_then_remove_restores_workouts() {
        let ids = SequentialIds::new();
        let env = MutationEnv::new(at(2024, 5, 1, 9), &ids);
        let mut snapshot = Snapshot::empty(at(2024, 5, 1, 8));
        for (name, d) in [("A", 3), ("B", 5), ("C", 1)] {
            snapshot = apply(
                &snapshot,
                &Mutation::AddWorkout(workout(name, day(2024, 5, d), Category::Other, 10)),
                &env,
            )
            .unwrap()
            .snapshot
            .unwrap();
        }
        let original = snapshot.workouts.clone();

        let added = apply(
            &snapshot,
            &Mutation::AddWorkout(workout("D", day(2024, 5, 4), Category::Sports, 60)),
            &env,
        )
        .unwrap();
        let id = added.outcome.id().unwrap();
        let removed = apply(&added.snapshot.unwrap(), &Mutation::RemoveWorkout(id), &env)
            .unwrap()
            .snapshot
            .unwrap();

        assert_eq!(removed.workouts, original);
    }
}
