//! # Fitdash Architecture
//!
//! Fitdash is a **UI-agnostic fitness log**. It keeps workouts, daily wellness entries and
//! goals in a single snapshot, and derives the dashboard figures (totals, weekly series,
//! category mix, hydration streak, goal progress) from whatever snapshot is current.
//!
//! The `fitdash` binary is one client. Nothing in this crate assumes a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (fitdash crate)                                        │
//! │  - Parses arguments, renders output, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Resolves id selectors, attaches messages                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Snapshot Store (store/)                                    │
//! │  - Owns the current snapshot, serializes mutations          │
//! │  - Persists through a StorageBackend, notifies subscribers  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs) and Metrics (metrics/)            │
//! │  - Pure functions: snapshot in, snapshot or figures out     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots Are Values
//!
//! A mutation never edits the published snapshot. It builds the next one, normalizes it
//! (wellness deduplicated per date, every list sorted newest first), persists it, and only
//! then swaps it in. Readers holding an `Arc<Snapshot>` keep a consistent view for as long
//! as they like.
//!
//! Derived metrics are never stored. [`metrics::DerivedMetrics::compute`] is a pure function
//! of a snapshot, so any two calls on the same snapshot agree.
//!
//! ## Testing Strategy
//!
//! 1. **Commands and metrics**: unit tests next to the code, on plain values.
//! 2. **Store**: tests against `MemBackend`, which can simulate read and write failures.
//! 3. **Filesystem**: integration tests in `tests/` against `FsBackend` in a temp dir.
//! 4. **CLI**: end-to-end tests in the `fitdash` crate.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for UI clients
//! - [`commands`]: Mutations and the snapshot transition function
//! - [`metrics`]: Derivation engine
//! - [`store`]: Snapshot store and storage backends
//! - [`model`]: Records and the snapshot document
//! - [`ids`]: Identifier generation
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod metrics;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
