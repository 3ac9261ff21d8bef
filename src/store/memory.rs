use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::{Collection, RecordStore};

/// Volatile record store; collections live only for the process lifetime.
#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<&'static str, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn save(&self, collection: Collection, records: Vec<Value>) {
        self.collections.insert(collection.key(), records);
    }

    async fn load(&self, collection: Collection) -> Vec<Value> {
        self.collections
            .get(collection.key())
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    async fn clear(&self) {
        self.collections.clear();
    }
}
