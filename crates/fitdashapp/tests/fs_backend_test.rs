use fitdashapp::store::backend::StorageBackend;
use fitdashapp::store::fs_backend::FsBackend;
use fitdashapp::store::SNAPSHOT_KEY;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path());
    (dir, backend)
}

#[test]
fn test_fs_backend_missing_snapshot_reads_none() {
    let (_dir, backend) = setup();
    assert_eq!(backend.read_snapshot().unwrap(), None);
}

#[test]
fn test_fs_backend_write_then_read() {
    let (_dir, backend) = setup();

    backend.write_snapshot("{\"workouts\":[]}").unwrap();
    assert_eq!(
        backend.read_snapshot().unwrap(),
        Some("{\"workouts\":[]}".to_string())
    );

    backend.write_snapshot("{}").unwrap();
    assert_eq!(backend.read_snapshot().unwrap(), Some("{}".to_string()));
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (dir, backend) = setup();

    backend.write_snapshot("{}").unwrap();

    let expected_path = dir.path().join(SNAPSHOT_KEY);
    assert!(expected_path.exists());
    assert_eq!(backend.location(), expected_path);

    // No temp files are left behind
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_creates_missing_root() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let backend = FsBackend::new(&nested);

    backend.write_snapshot("{}").unwrap();
    assert!(nested.join(SNAPSHOT_KEY).exists());
}
