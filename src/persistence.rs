//! Persistence Module
//!
//! Loads and saves the dictionary as a JSON document of the form
//! `{"entries": {"<word>": {"definition": "<definition>"}}}`.
//! Everything goes through `EntryStore` operations; the file is never
//! consulted while the store is running.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::store::{Entry, EntryStore, Snapshot};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    entries: BTreeMap<String, StoredDefinition>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredDefinition {
    definition: String,
}

/// Reads entries from `path`. A missing file yields no entries.
pub async fn load(path: &Path) -> Result<Vec<Entry>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No data file at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(StoreError::Persistence(format!(
                "reading {}: {}",
                path.display(),
                e
            )))
        }
    };

    let document: Document = serde_json::from_str(&raw)
        .map_err(|e| StoreError::Persistence(format!("parsing {}: {}", path.display(), e)))?;

    Ok(document
        .entries
        .into_iter()
        .map(|(word, stored)| Entry::new(word, stored.definition))
        .collect())
}

/// Writes `snapshot` to `path` through a temporary file and a rename.
pub async fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let document = Document {
        entries: snapshot
            .entries
            .values()
            .map(|entry| {
                (
                    entry.word.clone(),
                    StoredDefinition {
                        definition: entry.definition.clone(),
                    },
                )
            })
            .collect(),
    };

    let body = serde_json::to_string_pretty(&document)
        .map_err(|e| StoreError::Persistence(format!("encoding document: {}", e)))?;

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, body)
        .await
        .map_err(|e| StoreError::Persistence(format!("writing {}: {}", tmp.display(), e)))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::Persistence(format!("replacing {}: {}", path.display(), e)))?;

    Ok(())
}

/// Upserts `entries` into `store`, returning how many were applied.
pub async fn hydrate(store: &dyn EntryStore, entries: Vec<Entry>) -> Result<usize> {
    let count = entries.len();
    for entry in entries {
        store.upsert(entry.word, entry.definition).await?;
    }
    Ok(count)
}

/// Loads `path` into `store`.
pub async fn load_into(store: &dyn EntryStore, path: &Path) -> Result<usize> {
    let entries = load(path).await?;
    let count = hydrate(store, entries).await?;
    info!("Loaded {} entries from {}", count, path.display());
    Ok(count)
}

/// Saves a fresh snapshot of `store` to `path`, returning the entry count.
pub async fn save_from(store: &dyn EntryStore, path: &Path) -> Result<usize> {
    let snapshot = store.enumerate().await?;
    save(path, &snapshot).await?;
    debug!("Saved {} entries to {}", snapshot.len(), path.display());
    Ok(snapshot.len())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
