use super::backend::StorageBackend;
use super::SNAPSHOT_KEY;
use crate::error::{FitdashError, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory storage backend for testing.
///
/// Uses a `Mutex` rather than `RefCell` so a store built on it can be shared
/// across threads, the same as one built on `FsBackend`.
#[derive(Default)]
pub struct MemBackend {
    document: Mutex<Option<String>>,
    writes: AtomicUsize,
    simulate_write_error: AtomicBool,
    simulate_read_error: AtomicBool,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `document` already stored, e.g. a corrupt payload.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
            ..Default::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    /// The currently stored document.
    pub fn document(&self) -> Option<String> {
        match self.document.lock() {
            Ok(doc) => doc.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl StorageBackend for MemBackend {
    fn read_snapshot(&self) -> Result<Option<String>> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(FitdashError::Store("Simulated read error".to_string()));
        }
        Ok(self.document())
    }

    fn write_snapshot(&self, document: &str) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(FitdashError::Store("Simulated write error".to_string()));
        }
        let mut stored = self
            .document
            .lock()
            .map_err(|_| FitdashError::Store("memory backend lock poisoned".to_string()))?;
        *stored = Some(document.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(format!("memory://{}", SNAPSHOT_KEY))
    }
}
