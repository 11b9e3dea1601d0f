//! Autosave Task
//!
//! Background task that periodically writes a snapshot of the store to the
//! data file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::persistence;
use crate::store::EntryStore;

/// Spawns a background task that saves `store` to `path` every
/// `interval_secs` seconds.
///
/// A failed save is logged and retried on the next tick. The returned handle
/// is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let store: Arc<dyn EntryStore> = Arc::new(LocalStore::spawn());
/// let autosave = spawn_autosave_task(store.clone(), "dictionary.json".into(), 30);
/// // Later, during shutdown:
/// autosave.abort();
/// ```
pub fn spawn_autosave_task(
    store: Arc<dyn EntryStore>,
    path: PathBuf,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting autosave task every {} seconds to {}",
            interval.as_secs(),
            path.display()
        );

        loop {
            tokio::time::sleep(interval).await;

            match persistence::save_from(store.as_ref(), &path).await {
                Ok(count) => debug!("Autosave: wrote {} entries", count),
                Err(e) => error!("Autosave failed: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;

    #[tokio::test]
    async fn test_autosave_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        let store: Arc<dyn EntryStore> = Arc::new(LocalStore::spawn());
        store
            .upsert("apple".to_string(), "a fruit".to_string())
            .await
            .unwrap();

        let handle = spawn_autosave_task(store.clone(), path.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        handle.abort();

        let entries = persistence::load(&path).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "apple");
    }

    #[tokio::test]
    async fn test_autosave_task_can_be_aborted() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn EntryStore> = Arc::new(LocalStore::spawn());

        let handle = spawn_autosave_task(store, dir.path().join("dictionary.json"), 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
