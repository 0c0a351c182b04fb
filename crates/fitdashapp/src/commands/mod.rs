//! # Command Layer
//!
//! Every change to the dataset is a **pure transform** `Snapshot × Mutation → Snapshot`.
//! Nothing here touches storage or knows who is watching; the store feeds the current
//! snapshot in and decides what to do with the result.
//!
//! ## Role and Responsibilities
//!
//! - Validate creation drafts
//! - Apply the change to a fresh working copy (never to the caller's snapshot)
//! - Normalize the working copy: dedupe wellness dates, sort, stamp
//! - Report what happened as an [`Outcome`]
//!
//! ## What Commands Do NOT Do
//!
//! - **Persistence**: writing the document is the store's job
//! - **Publication**: notifying subscribers is the store's job
//! - **Clock and id access**: both arrive through [`MutationEnv`], so transforms are
//!   deterministic under test
//!
//! ## No-ops
//!
//! Toggle, remove and progress updates that name an unknown id produce
//! [`Outcome::NotFound`] and **no** new snapshot. The store treats that as "nothing
//! happened": no write, no publish, no new timestamp.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Tests call [`apply`] directly
//! with a fixed clock and [`crate::ids::SequentialIds`]; no store is needed.
//!
//! ## Command Modules
//!
//! - [`workouts`]: add, toggle completion, remove
//! - [`wellness`]: upsert by date
//! - [`goals`]: add, update progress, remove
//! - [`reset`]: discard everything

use crate::error::Result;
use crate::ids::IdSource;
use crate::model::{NewGoal, NewWellnessEntry, NewWorkout, Snapshot};
use crate::store::Persistence;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

pub mod goals;
pub mod reset;
pub mod wellness;
pub mod workouts;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddWorkout(NewWorkout),
    ToggleWorkout(Uuid),
    RemoveWorkout(Uuid),
    UpsertWellness(NewWellnessEntry),
    AddGoal(NewGoal),
    UpdateGoalProgress { id: Uuid, value: f64 },
    RemoveGoal(Uuid),
    Reset,
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddWorkout(_) => "add_workout",
            Mutation::ToggleWorkout(_) => "toggle_workout",
            Mutation::RemoveWorkout(_) => "remove_workout",
            Mutation::UpsertWellness(_) => "upsert_wellness",
            Mutation::AddGoal(_) => "add_goal",
            Mutation::UpdateGoalProgress { .. } => "update_goal_progress",
            Mutation::RemoveGoal(_) => "remove_goal",
            Mutation::Reset => "reset",
        }
    }
}

/// What a mutation did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Created { id: Uuid },
    Toggled { id: Uuid, completed: bool },
    Upserted { id: Uuid, replaced: Option<Uuid> },
    ProgressSet { id: Uuid, value: f64 },
    Removed { id: Uuid },
    Reset,
    NotFound { id: Uuid },
}

impl Outcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, Outcome::NotFound { .. })
    }

    /// The id of the record the mutation created or touched.
    pub fn id(&self) -> Option<Uuid> {
        match self {
            Outcome::Created { id }
            | Outcome::Toggled { id, .. }
            | Outcome::Upserted { id, .. }
            | Outcome::ProgressSet { id, .. }
            | Outcome::Removed { id }
            | Outcome::NotFound { id } => Some(*id),
            Outcome::Reset => None,
        }
    }
}

/// Side inputs a transform needs: the current time and a source of fresh ids.
pub struct MutationEnv<'a> {
    pub now: DateTime<Utc>,
    pub ids: &'a dyn IdSource,
}

impl<'a> MutationEnv<'a> {
    pub fn new(now: DateTime<Utc>, ids: &'a dyn IdSource) -> Self {
        Self { now, ids }
    }
}

#[derive(Debug, Clone)]
pub struct Transition {
    /// `None` when the mutation was a no-op.
    pub snapshot: Option<Snapshot>,
    pub outcome: Outcome,
}

/// Applies `mutation` to a copy of `current`. The input is never modified.
pub fn apply(current: &Snapshot, mutation: &Mutation, env: &MutationEnv) -> Result<Transition> {
    let mut draft = current.clone();

    let outcome = match mutation {
        Mutation::AddWorkout(new) => workouts::add(&mut draft, new, env.ids.next_id())?,
        Mutation::ToggleWorkout(id) => workouts::toggle_completion(&mut draft, id),
        Mutation::RemoveWorkout(id) => workouts::remove(&mut draft, id),
        Mutation::UpsertWellness(new) => wellness::upsert(&mut draft, new, env.ids.next_id())?,
        Mutation::AddGoal(new) => goals::add(&mut draft, new, env.ids.next_id(), env.now)?,
        Mutation::UpdateGoalProgress { id, value } => goals::update_progress(&mut draft, id, *value),
        Mutation::RemoveGoal(id) => goals::remove(&mut draft, id),
        Mutation::Reset => reset::run(&mut draft),
    };

    if outcome.is_noop() {
        return Ok(Transition {
            snapshot: None,
            outcome,
        });
    }

    let stamp = next_stamp(current.last_updated, env.now);
    Ok(Transition {
        snapshot: Some(normalize(draft, stamp)),
        outcome,
    })
}

/// Brings a snapshot into publishable shape.
///
/// - wellness: first entry wins for each date
/// - workouts and wellness: newest date first
/// - goals: soonest target date first
///
/// Sorts are stable, so records sharing a date keep their working-list order.
pub fn normalize(mut snapshot: Snapshot, stamp: DateTime<Utc>) -> Snapshot {
    let mut seen = HashSet::new();
    snapshot.wellness.retain(|entry| seen.insert(entry.date));

    snapshot.workouts.sort_by(|a, b| b.date.cmp(&a.date));
    snapshot.wellness.sort_by(|a, b| b.date.cmp(&a.date));
    snapshot.goals.sort_by(|a, b| a.target_date.cmp(&b.target_date));
    snapshot.last_updated = stamp;
    snapshot
}

/// A stamp strictly newer than `previous`, normally just `now`.
pub fn next_stamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured result handed to UI clients by [`crate::api::FitdashApi`].
///
/// `outcome` is `None` when the request never reached the store, e.g. an id
/// prefix that matched nothing.
#[derive(Debug, Clone, Serialize)]
pub struct CmdResult {
    pub outcome: Option<Outcome>,
    pub persistence: Persistence,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn new(outcome: Option<Outcome>, persistence: Persistence) -> Self {
        Self {
            outcome,
            persistence,
            messages: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{Category, GoalUnit, Intensity, Mood, NewGoal, NewWellnessEntry, NewWorkout};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    pub fn workout(name: &str, date: NaiveDate, category: Category, minutes: u32) -> NewWorkout {
        NewWorkout {
            name: name.to_string(),
            date,
            category,
            intensity: Intensity::Moderate,
            duration_minutes: minutes,
            calories: minutes * 8,
            notes: None,
        }
    }

    pub fn wellness(date: NaiveDate, water_liters: f64) -> NewWellnessEntry {
        NewWellnessEntry {
            date,
            sleep_hours: 7.5,
            water_liters,
            mood: Mood::Balanced,
            energy_level: 6,
        }
    }

    pub fn goal(title: &str, target_date: NaiveDate) -> NewGoal {
        NewGoal {
            title: title.to_string(),
            unit: GoalUnit::Workouts,
            target_value: 8.0,
            target_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::ids::SequentialIds;
    use crate::model::Category;

    fn assert_invariants(snapshot: &Snapshot) {
        assert!(snapshot
            .workouts
            .windows(2)
            .all(|w| w[0].date >= w[1].date));
        assert!(snapshot
            .wellness
            .windows(2)
            .all(|w| w[0].date > w[1].date));
        assert!(snapshot
            .goals
            .windows(2)
            .all(|w| w[0].target_date <= w[1].target_date));
    }

    #[test]
    fn test_every_mutation_leaves_sorted_snapshot() {
        let ids = SequentialIds::new();
        let mut snapshot = Snapshot::empty(at(2024, 5, 1, 8));
        let mutations = vec![
            Mutation::AddWorkout(workout("Run", day(2024, 5, 3), Category::Cardio, 30)),
            Mutation::AddWorkout(workout("Lift", day(2024, 5, 7), Category::Strength, 50)),
            Mutation::AddWorkout(workout("Yoga", day(2024, 5, 1), Category::Mobility, 20)),
            Mutation::UpsertWellness(wellness(day(2024, 5, 2), 2.5)),
            Mutation::UpsertWellness(wellness(day(2024, 5, 6), 1.0)),
            Mutation::UpsertWellness(wellness(day(2024, 5, 2), 3.0)),
            Mutation::AddGoal(goal("Later", day(2024, 7, 1))),
            Mutation::AddGoal(goal("Sooner", day(2024, 6, 1))),
            Mutation::ToggleWorkout(Uuid::from_u128(1)),
            Mutation::RemoveWorkout(Uuid::from_u128(2)),
        ];

        for (hour, mutation) in mutations.iter().enumerate() {
            let env = MutationEnv::new(at(2024, 5, 1, 9 + hour as u32), &ids);
            let transition = apply(&snapshot, mutation, &env).unwrap();
            snapshot = transition.snapshot.expect("mutation should apply");
            assert_invariants(&snapshot);
        }

        assert_eq!(snapshot.workouts.len(), 2);
        assert_eq!(snapshot.wellness.len(), 2);
        assert_eq!(snapshot.goals[0].title, "Sooner");
    }

    #[test]
    fn test_apply_does_not_touch_input() {
        let ids = SequentialIds::new();
        let snapshot = Snapshot::empty(at(2024, 5, 1, 8));
        let before = snapshot.clone();
        let env = MutationEnv::new(at(2024, 5, 1, 9), &ids);

        apply(
            &snapshot,
            &Mutation::AddWorkout(workout("Run", day(2024, 5, 3), Category::Cardio, 30)),
            &env,
        )
        .unwrap();

        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_missing_id_produces_no_snapshot() {
        let ids = SequentialIds::new();
        let snapshot = Snapshot::empty(at(2024, 5, 1, 8));
        let env = MutationEnv::new(at(2024, 5, 1, 9), &ids);
        let missing = Uuid::from_u128(99);

        for mutation in [
            Mutation::ToggleWorkout(missing),
            Mutation::RemoveWorkout(missing),
            Mutation::UpdateGoalProgress {
                id: missing,
                value: 3.0,
            },
            Mutation::RemoveGoal(missing),
        ] {
            let transition = apply(&snapshot, &mutation, &env).unwrap();
            assert!(transition.snapshot.is_none());
            assert_eq!(transition.outcome, Outcome::NotFound { id: missing });
        }
    }

    #[test]
    fn test_invalid_draft_is_rejected() {
        let ids = SequentialIds::new();
        let snapshot = Snapshot::empty(at(2024, 5, 1, 8));
        let env = MutationEnv::new(at(2024, 5, 1, 9), &ids);

        let result = apply(
            &snapshot,
            &Mutation::AddWorkout(workout("Run", day(2024, 5, 3), Category::Cardio, 0)),
            &env,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_stamp_is_strictly_newer_even_with_stale_clock() {
        let previous = at(2024, 5, 1, 10);
        let stamp = next_stamp(previous, at(2024, 5, 1, 9));
        assert!(stamp > previous);
        assert_eq!(next_stamp(previous, at(2024, 5, 1, 11)), at(2024, 5, 1, 11));
    }

    #[test]
    fn test_normalize_dedupes_wellness_keeping_first() {
        let ids = SequentialIds::new();
        let mut snapshot = Snapshot::empty(at(2024, 5, 1, 8));
        snapshot
            .wellness
            .push(wellness(day(2024, 5, 2), 3.0).into_entry(ids.next_id()));
        snapshot
            .wellness
            .push(wellness(day(2024, 5, 2), 1.0).into_entry(ids.next_id()));

        let normalized = normalize(snapshot, at(2024, 5, 1, 9));
        assert_eq!(normalized.wellness.len(), 1);
        assert_eq!(normalized.wellness[0].water_liters, 3.0);
        assert_eq!(normalized.last_updated, at(2024, 5, 1, 9));
    }
}
