use crate::api::FitdashApi;
use crate::ids::{IdSource, RandomIds, SequentialIds};
use crate::metrics::MetricsOptions;
use crate::store::{FsBackend, SnapshotStore, StoreOptions, WritePolicy};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub api: FitdashApi<FsBackend>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_policy(WritePolicy::BestEffort)
    }

    pub fn with_policy(write_policy: WritePolicy) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let api = open_api(&root, write_policy, Box::new(SequentialIds::new()));
        Self {
            _temp_dir: temp_dir,
            api,
            root,
        }
    }

    /// A second API over the same directory, as a fresh process would see it.
    pub fn reopen(&self) -> FitdashApi<FsBackend> {
        open_api(&self.root, WritePolicy::BestEffort, Box::new(RandomIds))
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(crate::store::SNAPSHOT_KEY)
    }
}

fn open_api(
    root: &std::path::Path,
    write_policy: WritePolicy,
    ids: Box<dyn IdSource>,
) -> FitdashApi<FsBackend> {
    let store = SnapshotStore::load_with(FsBackend::new(root), StoreOptions { write_policy, ids });
    FitdashApi::new(store, MetricsOptions::default())
}
