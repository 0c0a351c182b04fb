use super::backend::StorageBackend;
use super::{Persistence, WritePolicy};
use crate::commands::{self, Mutation, MutationEnv, Outcome};
use crate::error::{FitdashError, Result};
use crate::ids::{IdSource, RandomIds};
use crate::metrics::{DerivedMetrics, MetricsOptions};
use crate::model::{NewGoal, NewWellnessEntry, NewWorkout, Snapshot};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

type Listener = Box<dyn Fn(&Arc<Snapshot>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct StoreOptions {
    pub write_policy: WritePolicy,
    pub ids: Box<dyn IdSource>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            write_policy: WritePolicy::default(),
            ids: Box::new(RandomIds),
        }
    }
}

/// Result of a mutation that went through the store.
#[derive(Debug, Clone)]
pub struct Applied {
    pub outcome: Outcome,
    pub persistence: Persistence,
    /// The snapshot current after the mutation (unchanged for no-ops).
    pub snapshot: Arc<Snapshot>,
}

struct State {
    current: Arc<Snapshot>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

/// Owner of the canonical snapshot.
///
/// Mutations run one at a time under an internal mutex; readers get cheap
/// `Arc<Snapshot>` handles that never change underneath them.
pub struct SnapshotStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    ids: Box<dyn IdSource>,
    write_policy: WritePolicy,
    state: Mutex<State>,
}

impl<B: StorageBackend> SnapshotStore<B> {
    pub fn load(backend: B) -> Self {
        Self::load_with(backend, StoreOptions::default())
    }

    /// Reads whatever the backend holds and makes it the current snapshot.
    /// Never fails: unreadable or malformed data becomes an empty snapshot.
    pub fn load_with(backend: B, options: StoreOptions) -> Self {
        let persisted = read_persisted(&backend);
        let stamp = commands::next_stamp(persisted.last_updated, Utc::now());
        let current = commands::normalize(persisted, stamp);

        tracing::info!(
            workouts = current.workouts.len(),
            wellness = current.wellness.len(),
            goals = current.goals.len(),
            location = %backend.location().display(),
            "snapshot loaded"
        );

        Self {
            backend,
            ids: options.ids,
            write_policy: options.write_policy,
            state: Mutex::new(State {
                current: Arc::new(current),
                listeners: Vec::new(),
                next_subscription: 0,
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        match self.state.lock() {
            Ok(state) => Arc::clone(&state.current),
            // The current Arc is only ever swapped whole, so it is intact
            Err(poisoned) => Arc::clone(&poisoned.into_inner().current),
        }
    }

    pub fn metrics(&self) -> DerivedMetrics {
        DerivedMetrics::compute(&self.snapshot())
    }

    pub fn metrics_with(&self, options: &MetricsOptions) -> DerivedMetrics {
        DerivedMetrics::compute_with(&self.snapshot(), options)
    }

    /// Registers `listener` to receive every snapshot published from now on.
    ///
    /// Listeners run while the store is locked and must not call mutation
    /// methods on the same store.
    pub fn subscribe<F>(&self, listener: F) -> Result<SubscriptionId>
    where
        F: Fn(&Arc<Snapshot>) + Send + Sync + 'static,
    {
        let mut state = self.lock()?;
        let id = SubscriptionId(state.next_subscription);
        state.next_subscription += 1;
        state.listeners.push((id, Box::new(listener)));
        Ok(id)
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool> {
        let mut state = self.lock()?;
        let before = state.listeners.len();
        state.listeners.retain(|(sub, _)| *sub != id);
        Ok(state.listeners.len() != before)
    }

    /// Runs one read-modify-persist-publish cycle.
    pub fn apply(&self, mutation: &Mutation) -> Result<Applied> {
        let mut state = self.lock()?;

        let env = MutationEnv::new(Utc::now(), self.ids.as_ref());
        let transition = commands::apply(&state.current, mutation, &env)?;

        let Some(next) = transition.snapshot else {
            tracing::debug!(mutation = mutation.name(), outcome = ?transition.outcome, "no-op mutation");
            return Ok(Applied {
                outcome: transition.outcome,
                persistence: Persistence::Skipped,
                snapshot: Arc::clone(&state.current),
            });
        };

        let persistence = self.persist(&next);
        if let Persistence::Failed { reason } = &persistence {
            match self.write_policy {
                WritePolicy::Strict => {
                    tracing::warn!(mutation = mutation.name(), %reason, "snapshot write failed, mutation rejected");
                    return Err(FitdashError::Persist(reason.clone()));
                }
                WritePolicy::BestEffort => {
                    tracing::warn!(mutation = mutation.name(), %reason, "snapshot write failed, keeping in-memory snapshot");
                }
            }
        }

        let next = Arc::new(next);
        state.current = Arc::clone(&next);
        for (_, listener) in &state.listeners {
            listener(&next);
        }

        tracing::debug!(mutation = mutation.name(), outcome = ?transition.outcome, "snapshot published");
        Ok(Applied {
            outcome: transition.outcome,
            persistence,
            snapshot: next,
        })
    }

    pub fn add_workout(&self, workout: NewWorkout) -> Result<Applied> {
        self.apply(&Mutation::AddWorkout(workout))
    }

    pub fn toggle_workout(&self, id: Uuid) -> Result<Applied> {
        self.apply(&Mutation::ToggleWorkout(id))
    }

    pub fn remove_workout(&self, id: Uuid) -> Result<Applied> {
        self.apply(&Mutation::RemoveWorkout(id))
    }

    pub fn upsert_wellness(&self, entry: NewWellnessEntry) -> Result<Applied> {
        self.apply(&Mutation::UpsertWellness(entry))
    }

    pub fn add_goal(&self, goal: NewGoal) -> Result<Applied> {
        self.apply(&Mutation::AddGoal(goal))
    }

    pub fn update_goal_progress(&self, id: Uuid, value: f64) -> Result<Applied> {
        self.apply(&Mutation::UpdateGoalProgress { id, value })
    }

    pub fn remove_goal(&self, id: Uuid) -> Result<Applied> {
        self.apply(&Mutation::RemoveGoal(id))
    }

    pub fn reset(&self) -> Result<Applied> {
        self.apply(&Mutation::Reset)
    }

    fn persist(&self, snapshot: &Snapshot) -> Persistence {
        let written = serde_json::to_string_pretty(snapshot)
            .map_err(FitdashError::Serialization)
            .and_then(|document| self.backend.write_snapshot(&document));
        match written {
            Ok(()) => Persistence::Written,
            Err(e) => Persistence::Failed {
                reason: e.to_string(),
            },
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| FitdashError::Store("snapshot store lock poisoned".to_string()))
    }
}

fn read_persisted<B: StorageBackend>(backend: &B) -> Snapshot {
    match backend.read_snapshot() {
        Ok(Some(document)) => match serde_json::from_str::<Snapshot>(&document) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "stored snapshot is malformed, starting empty");
                Snapshot::default()
            }
        },
        Ok(None) => Snapshot::default(),
        Err(e) => {
            tracing::warn!(error = %e, "stored snapshot is unreadable, starting empty");
            Snapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{day, goal, wellness, workout};
    use crate::ids::SequentialIds;
    use crate::model::Category;
    use crate::store::mem_backend::MemBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn sequential(backend: MemBackend, write_policy: WritePolicy) -> SnapshotStore<MemBackend> {
        SnapshotStore::load_with(
            backend,
            StoreOptions {
                write_policy,
                ids: Box::new(SequentialIds::new()),
            },
        )
    }

    #[test]
    fn test_load_from_empty_backend() {
        let store = SnapshotStore::load(MemBackend::new());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_load_corrupt_payload_gives_empty_snapshot() {
        let store = SnapshotStore::load(MemBackend::with_document("{ not json"));
        let snapshot = store.snapshot();
        assert!(snapshot.is_empty());
        assert!(snapshot.last_updated > chrono::DateTime::<Utc>::default());
    }

    #[test]
    fn test_load_unreadable_backend_gives_empty_snapshot() {
        let backend = MemBackend::with_document("{}");
        backend.set_simulate_read_error(true);
        let store = SnapshotStore::load(backend);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_load_sorts_persisted_records() {
        let document = r#"{
            "workouts": [
                {"id":"00000000-0000-0000-0000-000000000001","name":"Old","date":"2024-05-01",
                 "category":"cardio","intensity":"light","durationMinutes":20,"calories":150,"completed":true},
                {"id":"00000000-0000-0000-0000-000000000002","name":"New","date":"2024-05-09",
                 "category":"strength","intensity":"intense","durationMinutes":50,"calories":380,"completed":false}
            ],
            "goals": [
                {"id":"00000000-0000-0000-0000-000000000003","title":"Late","unit":"minutes","targetValue":600,
                 "currentValue":30,"targetDate":"2024-08-01","createdAt":"2024-05-01T10:00:00Z"},
                {"id":"00000000-0000-0000-0000-000000000004","title":"Soon","unit":"workouts","targetValue":8,
                 "currentValue":2,"targetDate":"2024-06-01","createdAt":"2024-05-01T10:00:00Z"}
            ],
            "lastUpdated": "2024-05-09T18:00:00Z"
        }"#;

        let store = SnapshotStore::load(MemBackend::with_document(document));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.workouts[0].name, "New");
        assert_eq!(snapshot.goals[0].title, "Soon");
        assert!(snapshot.wellness.is_empty());
    }

    #[test]
    fn test_mutation_persists_document() {
        let store = sequential(MemBackend::new(), WritePolicy::BestEffort);
        let applied = store
            .add_workout(workout("Run", day(2024, 5, 3), Category::Cardio, 30))
            .unwrap();

        assert_eq!(applied.persistence, Persistence::Written);
        let document = store.backend().document().unwrap();
        let persisted: Snapshot = serde_json::from_str(&document).unwrap();
        assert_eq!(persisted, *store.snapshot());
    }

    #[test]
    fn test_best_effort_write_failure_still_publishes() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let store = sequential(backend, WritePolicy::BestEffort);

        let applied = store
            .add_workout(workout("Run", day(2024, 5, 3), Category::Cardio, 30))
            .unwrap();

        assert!(matches!(applied.persistence, Persistence::Failed { .. }));
        assert_eq!(store.snapshot().workouts.len(), 1);
        assert!(store.backend().document().is_none());
    }

    #[test]
    fn test_strict_write_failure_keeps_previous_snapshot() {
        let store = sequential(MemBackend::new(), WritePolicy::Strict);
        store
            .add_workout(workout("Run", day(2024, 5, 3), Category::Cardio, 30))
            .unwrap();
        let before = store.snapshot();

        store.backend().set_simulate_write_error(true);
        let result = store.add_workout(workout("Lift", day(2024, 5, 4), Category::Strength, 45));

        assert!(matches!(result, Err(FitdashError::Persist(_))));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_missing_id_publishes_nothing() {
        let store = sequential(MemBackend::new(), WritePolicy::BestEffort);
        let before = store.snapshot();

        let applied = store.toggle_workout(Uuid::from_u128(42)).unwrap();

        assert_eq!(applied.persistence, Persistence::Skipped);
        assert!(applied.outcome.is_noop());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn test_subscribers_see_each_publish() {
        let store = sequential(MemBackend::new(), WritePolicy::BestEffort);
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_by_listener = Arc::clone(&seen);
        let subscription = store
            .subscribe(move |snapshot| {
                assert!(snapshot.workouts.len() <= 2);
                seen_by_listener.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        store
            .add_workout(workout("Run", day(2024, 5, 3), Category::Cardio, 30))
            .unwrap();
        store.remove_goal(Uuid::from_u128(77)).unwrap();
        store
            .add_workout(workout("Lift", day(2024, 5, 4), Category::Strength, 45))
            .unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        assert!(store.unsubscribe(subscription).unwrap());
        store.reset().unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert!(!store.unsubscribe(subscription).unwrap());
    }

    #[test]
    fn test_reset_is_newer_and_empty() {
        let store = sequential(MemBackend::new(), WritePolicy::BestEffort);
        store
            .upsert_wellness(wellness(day(2024, 5, 3), 2.5))
            .unwrap();
        store.add_goal(goal("Goal", day(2024, 6, 1))).unwrap();
        let before = store.snapshot().last_updated;

        let applied = store.reset().unwrap();

        assert!(applied.snapshot.is_empty());
        assert!(applied.snapshot.last_updated > before);
        let persisted: Snapshot =
            serde_json::from_str(&store.backend().document().unwrap()).unwrap();
        assert!(persisted.is_empty());
    }

    #[test]
    fn test_concurrent_mutations_are_serialized() {
        let store = Arc::new(SnapshotStore::load(MemBackend::new()));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..25u32 {
                        store
                            .add_workout(workout(
                                &format!("t{t}-{i}"),
                                day(2024, 5, 1 + (i % 28)),
                                Category::Other,
                                10,
                            ))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.snapshot().workouts.len(), 100);
        assert_eq!(store.backend().write_count(), 100);
        let persisted: Snapshot =
            serde_json::from_str(&store.backend().document().unwrap()).unwrap();
        assert_eq!(persisted.workouts.len(), 100);
        assert_eq!(store.metrics().totals.minutes, 1000);
    }
}
