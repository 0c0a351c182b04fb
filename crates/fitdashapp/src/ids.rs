//! Identifier generation for new records.
//!
//! The only contract is uniqueness over the lifetime of a dataset, so the default
//! source is a random v4 UUID. Tests swap in [`SequentialIds`] to get stable ids.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub trait IdSource: Send + Sync {
    fn next_id(&self) -> Uuid;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Hands out `00000000-0000-0000-0000-000000000001`, `...02`, and so on.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> Uuid {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(u128::from(n))
    }
}
