//! Tests for the config file watcher.

use super::*;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast;

#[test]
fn watcher_new_with_nonexistent_path_succeeds() {
    let watcher = ConfigWatcher::new(PathBuf::from("/tmp/nonexistent_arview_test.toml"));
    assert!(watcher.is_ok());
}

#[test]
fn watcher_rejects_path_without_file_name() {
    assert!(ConfigWatcher::new(PathBuf::from("/")).is_err());
}

#[tokio::test]
async fn burst_of_writes_yields_one_signal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "# v0").unwrap();

    let watcher = ConfigWatcher::new(path.clone()).unwrap();
    let (tx, mut rx) = broadcast::channel(16);
    let handle = tokio::spawn(async move { watcher.watch(tx).await });

    tokio::time::sleep(Duration::from_millis(200)).await;
    for i in 1..=3 {
        std::fs::write(&path, format!("# v{i}")).unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
    }

    let first = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
    assert!(matches!(first, Ok(Ok(()))));
    let second = tokio::time::timeout(DEBOUNCE + Duration::from_millis(300), rx.recv()).await;
    assert!(second.is_err());

    handle.abort();
}
