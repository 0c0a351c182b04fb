//! # Storage Layer
//!
//! Fitdash keeps its entire state in **one document**: the serialized [`Snapshot`].
//! There are no per-record files and no partial writes; every successful mutation
//! rewrites the whole document.
//!
//! ## Split of Responsibilities
//!
//! - [`backend::StorageBackend`]: the "how" of storage. Reads and writes one opaque
//!   string under one fixed key. Knows nothing about workouts or goals.
//! - [`snapshot_store::SnapshotStore`]: the "what". Owns the canonical snapshot, runs
//!   each mutation through the command layer, persists, and publishes.
//!
//! ## Mutation Cycle
//!
//! ```text
//! lock ─▶ clone current ─▶ commands::apply ─▶ normalize ─▶ write ─▶ swap Arc ─▶ notify ─▶ unlock
//! ```
//!
//! The whole cycle runs under a single mutex, so two cycles never interleave and the
//! persisted document always matches some published snapshot.
//!
//! ## Failure Handling
//!
//! - **Load**: a missing document, an unreadable backend, or JSON that does not parse
//!   all degrade to an empty snapshot. Loading never fails.
//! - **Write**: governed by [`WritePolicy`]. With [`WritePolicy::BestEffort`] the new
//!   snapshot is still published and the failure is reported as
//!   [`Persistence::Failed`]. With [`WritePolicy::Strict`] the mutation returns
//!   [`crate::error::FitdashError::Persist`] and the previous snapshot stays current.
//! - **No-op**: a mutation naming an unknown id writes nothing and publishes nothing
//!   ([`Persistence::Skipped`]).
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: `snapshot.json` in a data directory, atomic replace.
//! - [`mem_backend::MemBackend`]: for tests, with switches to simulate read and
//!   write failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! └── snapshot.json
//! ```

use serde::{Deserialize, Serialize};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod snapshot_store;

pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
pub use snapshot_store::{Applied, SnapshotStore, StoreOptions, SubscriptionId};

/// The fixed key the snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "snapshot.json";

/// What the store does when the backend refuses a write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Publish anyway; the in-memory snapshot is the truth for this session.
    #[default]
    BestEffort,
    /// Fail the mutation and keep the previous snapshot.
    Strict,
}

/// Whether a mutation's snapshot reached the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Persistence {
    Written,
    Failed { reason: String },
    Skipped,
}

impl Persistence {
    pub fn is_written(&self) -> bool {
        matches!(self, Persistence::Written)
    }
}
