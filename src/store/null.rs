use async_trait::async_trait;
use serde_json::Value;

use super::{Collection, RecordStore};

/// Store used when no storage context is available: every save is a no-op
/// and every load is empty.
pub struct NullStore;

#[async_trait]
impl RecordStore for NullStore {
    async fn save(&self, _collection: Collection, _records: Vec<Value>) {}

    async fn load(&self, _collection: Collection) -> Vec<Value> {
        Vec::new()
    }

    async fn clear(&self) {}

    fn is_available(&self) -> bool {
        false
    }
}
