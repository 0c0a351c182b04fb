use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw snapshot I/O.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// `SnapshotStore` handles the "what" (mutations, normalization, publication).
/// The document is opaque here: backends never parse it.
pub trait StorageBackend {
    /// Read the stored document.
    /// Returns Ok(None) if nothing has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_snapshot(&self) -> Result<Option<String>>;

    /// Replace the stored document.
    /// MUST be atomic (e.g. write to tmp then rename): readers see the old
    /// document or the new one, never a mix.
    fn write_snapshot(&self, document: &str) -> Result<()>;

    /// Where the document lives, for display.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
