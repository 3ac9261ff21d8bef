use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::warn;

use super::{Collection, RecordStore};

/// Record store backed by a single JSON file mapping collection keys to
/// record arrays. The file is read once on open and written through on every
/// save; I/O failures are logged and the in-memory state keeps serving.
pub struct JsonFileStore {
    path: PathBuf,
    cache: Mutex<HashMap<String, Vec<Value>>>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = match read_collections(&path) {
            Ok(collections) => collections,
            Err(err) => {
                warn!(
                    "Starting with empty collections, could not read {}: {:#}",
                    path.display(),
                    err
                );
                HashMap::new()
            }
        };
        Self {
            path,
            cache: Mutex::new(cache),
        }
    }

    fn flush(&self, cache: &HashMap<String, Vec<Value>>) {
        if let Err(err) = write_collections(&self.path, cache) {
            warn!("Failed to persist {}: {:#}", self.path.display(), err);
        }
    }
}

fn read_collections(path: &Path) -> Result<HashMap<String, Vec<Value>>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("malformed store file {}", path.display()))
}

fn write_collections(path: &Path, collections: &HashMap<String, Vec<Value>>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let contents =
        serde_json::to_string_pretty(collections).context("failed to encode collections")?;
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn save(&self, collection: Collection, records: Vec<Value>) {
        let mut cache = self.cache.lock();
        cache.insert(collection.key().to_string(), records);
        self.flush(&cache);
    }

    async fn load(&self, collection: Collection) -> Vec<Value> {
        self.cache
            .lock()
            .get(collection.key())
            .cloned()
            .unwrap_or_default()
    }

    async fn clear(&self) {
        let mut cache = self.cache.lock();
        for collection in Collection::ALL {
            cache.remove(collection.key());
        }
        self.flush(&cache);
    }
}
