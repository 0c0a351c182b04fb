use super::backend::StorageBackend;
use super::SNAPSHOT_KEY;
use crate::error::{FitdashError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_KEY)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FitdashError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_snapshot(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.snapshot_path()) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FitdashError::Io(e)),
        }
    }

    fn write_snapshot(&self, document: &str) -> Result<()> {
        self.ensure_dir()?;

        // Atomic write
        let tmp_file = self.root.join(format!(".snapshot-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, document).map_err(FitdashError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, self.snapshot_path()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(FitdashError::Io(e));
        }

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.snapshot_path()
    }
}
