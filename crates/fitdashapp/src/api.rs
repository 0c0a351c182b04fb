//! # API Facade
//!
//! The API layer is a **thin facade** over the snapshot store. It serves as the single
//! entry point for UI clients, regardless of which UI is in use.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Normalizes inputs**: turns user-typed ids (full UUID or short prefix) into UUIDs
//! - **Dispatches** to the store's mutation methods
//! - **Returns structured types** (`Result<CmdResult>`) with human-readable messages
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O**: no stdout, stderr, or formatting beyond message text
//!
//! ## Id Selectors
//!
//! Records are identified by UUID, which is unpleasant to type. Selectors accept:
//! - a full UUID (`0d9c3a2e-6f6b-4f4e-9d55-3f3c1b7e2a10`), passed through as-is
//! - a prefix of at least [`MIN_PREFIX_LEN`] hex characters (`0d9c3a2e`), matched
//!   against the ids currently in the snapshot
//!
//! A prefix matching several records is an error. A selector matching nothing is a
//! no-op with a warning, the same as a full UUID the store does not know.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `FitdashApi<FsBackend>`
//! - Testing: `FitdashApi<MemBackend>`

use crate::commands::{CmdMessage, CmdResult, Outcome};
use crate::error::{FitdashError, Result};
use crate::metrics::{DerivedMetrics, MetricsOptions};
use crate::model::{NewGoal, NewWellnessEntry, NewWorkout, Snapshot};
use crate::store::{Applied, Persistence, SnapshotStore, StorageBackend};
use std::sync::Arc;
use uuid::Uuid;

pub const MIN_PREFIX_LEN: usize = 4;

/// Length of the id shown in listings.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..SHORT_ID_LEN].to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Workout,
    Goal,
}

impl RecordKind {
    fn label(self) -> &'static str {
        match self {
            RecordKind::Workout => "workout",
            RecordKind::Goal => "goal",
        }
    }
}

/// The main API facade for fitdash operations.
pub struct FitdashApi<B: StorageBackend> {
    store: SnapshotStore<B>,
    metrics: MetricsOptions,
}

impl<B: StorageBackend> FitdashApi<B> {
    pub fn new(store: SnapshotStore<B>, metrics: MetricsOptions) -> Self {
        Self { store, metrics }
    }

    pub fn store(&self) -> &SnapshotStore<B> {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    pub fn metrics(&self) -> DerivedMetrics {
        self.store.metrics_with(&self.metrics)
    }

    pub fn add_workout(&self, workout: NewWorkout) -> Result<CmdResult> {
        let name = workout.name.trim().to_string();
        let applied = self.store.add_workout(workout)?;
        let id = applied.outcome.id();
        let mut result = into_result(applied);
        if let Some(id) = id {
            result.add_message(CmdMessage::success(format!(
                "Workout logged ({}): {}",
                short_id(&id),
                name
            )));
        }
        Ok(finish(result))
    }

    pub fn toggle_workout(&self, selector: &str) -> Result<CmdResult> {
        let Some(id) = self.resolve(RecordKind::Workout, selector)? else {
            return Ok(unmatched(RecordKind::Workout, selector));
        };
        let mut result = into_result(self.store.toggle_workout(id)?);
        if let Some(Outcome::Toggled { completed, .. }) = &result.outcome {
            let state = if *completed { "completed" } else { "not completed" };
            result.add_message(CmdMessage::success(format!(
                "Workout {} marked {}",
                short_id(&id),
                state
            )));
        }
        Ok(finish(result))
    }

    pub fn remove_workout(&self, selector: &str) -> Result<CmdResult> {
        let Some(id) = self.resolve(RecordKind::Workout, selector)? else {
            return Ok(unmatched(RecordKind::Workout, selector));
        };
        let mut result = into_result(self.store.remove_workout(id)?);
        if let Some(Outcome::Removed { .. }) = &result.outcome {
            result.add_message(CmdMessage::success(format!(
                "Workout removed: {}",
                short_id(&id)
            )));
        }
        Ok(finish(result))
    }

    pub fn log_wellness(&self, entry: NewWellnessEntry) -> Result<CmdResult> {
        let date = entry.date;
        let mut result = into_result(self.store.upsert_wellness(entry)?);
        match &result.outcome {
            Some(Outcome::Upserted {
                replaced: Some(_), ..
            }) => result.add_message(CmdMessage::success(format!(
                "Wellness entry for {date} replaced"
            ))),
            Some(Outcome::Upserted { .. }) => result.add_message(CmdMessage::success(format!(
                "Wellness entry for {date} logged"
            ))),
            _ => {}
        }
        Ok(finish(result))
    }

    pub fn add_goal(&self, goal: NewGoal) -> Result<CmdResult> {
        let title = goal.title.trim().to_string();
        let applied = self.store.add_goal(goal)?;
        let id = applied.outcome.id();
        let mut result = into_result(applied);
        if let Some(id) = id {
            result.add_message(CmdMessage::success(format!(
                "Goal added ({}): {}",
                short_id(&id),
                title
            )));
        }
        Ok(finish(result))
    }

    pub fn update_goal_progress(&self, selector: &str, value: f64) -> Result<CmdResult> {
        let Some(id) = self.resolve(RecordKind::Goal, selector)? else {
            return Ok(unmatched(RecordKind::Goal, selector));
        };
        let mut result = into_result(self.store.update_goal_progress(id, value)?);
        if let Some(Outcome::ProgressSet { .. }) = &result.outcome {
            result.add_message(CmdMessage::success(format!(
                "Goal {} progress set to {}",
                short_id(&id),
                value
            )));
        }
        Ok(finish(result))
    }

    pub fn remove_goal(&self, selector: &str) -> Result<CmdResult> {
        let Some(id) = self.resolve(RecordKind::Goal, selector)? else {
            return Ok(unmatched(RecordKind::Goal, selector));
        };
        let mut result = into_result(self.store.remove_goal(id)?);
        if let Some(Outcome::Removed { .. }) = &result.outcome {
            result.add_message(CmdMessage::success(format!(
                "Goal removed: {}",
                short_id(&id)
            )));
        }
        Ok(finish(result))
    }

    pub fn reset(&self) -> Result<CmdResult> {
        let mut result = into_result(self.store.reset()?);
        result.add_message(CmdMessage::success("All workouts, wellness entries and goals cleared"));
        Ok(finish(result))
    }

    /// `Ok(None)` when the selector is well-formed but matches nothing.
    fn resolve(&self, kind: RecordKind, selector: &str) -> Result<Option<Uuid>> {
        let selector = selector.trim();
        if let Ok(id) = Uuid::parse_str(selector) {
            return Ok(Some(id));
        }

        let prefix = selector.replace('-', "").to_ascii_lowercase();
        if prefix.len() < MIN_PREFIX_LEN || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FitdashError::Api(format!(
                "'{selector}' is not a {} id (use at least {MIN_PREFIX_LEN} hex characters)",
                kind.label()
            )));
        }

        let snapshot = self.store.snapshot();
        let candidates: Vec<Uuid> = match kind {
            RecordKind::Workout => snapshot.workouts.iter().map(|w| w.id).collect(),
            RecordKind::Goal => snapshot.goals.iter().map(|g| g.id).collect(),
        };
        let matches: Vec<Uuid> = candidates
            .into_iter()
            .filter(|id| id.simple().to_string().starts_with(&prefix))
            .collect();

        match matches.as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            _ => Err(FitdashError::Api(format!(
                "'{selector}' matches {} {}s; use a longer prefix",
                matches.len(),
                kind.label()
            ))),
        }
    }
}

fn into_result(applied: Applied) -> CmdResult {
    let mut result = CmdResult::new(Some(applied.outcome), applied.persistence);
    if let Some(Outcome::NotFound { id }) = &result.outcome {
        let message = format!("Nothing changed: no record with id {id}");
        result.add_message(CmdMessage::warning(message));
    }
    result
}

/// Appends a warning when the change only lives in memory.
fn finish(mut result: CmdResult) -> CmdResult {
    if let Persistence::Failed { reason } = &result.persistence {
        let message = format!("Change kept in memory only, saving failed: {reason}");
        result.add_message(CmdMessage::warning(message));
    }
    result
}

fn unmatched(kind: RecordKind, selector: &str) -> CmdResult {
    let mut result = CmdResult::new(None, Persistence::Skipped);
    result.add_message(CmdMessage::warning(format!(
        "Nothing changed: no {} matches '{}'",
        kind.label(),
        selector.trim()
    )));
    result
}
