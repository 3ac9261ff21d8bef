use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::models::{NewRoiRecord, RoiRecord};

mod json_file;
mod memory;
mod null;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use null::NullStore;

/// The fixed collection names of the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    RoiData,
    SalesData,
    CostData,
    RevenueData,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::RoiData,
        Collection::SalesData,
        Collection::CostData,
        Collection::RevenueData,
    ];

    /// Storage key of the collection.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::RoiData => "roi_data",
            Collection::SalesData => "sales_data",
            Collection::CostData => "cost_data",
            Collection::RevenueData => "revenue_data",
        }
    }
}

/// Key-value record storage. Failures degrade to no-op saves and empty
/// loads, logged inside the implementation; callers never see a storage
/// error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Overwrites the whole collection.
    async fn save(&self, collection: Collection, records: Vec<Value>);

    /// Empty when the collection is absent or the store is unavailable.
    async fn load(&self, collection: Collection) -> Vec<Value>;

    /// Removes every known collection.
    async fn clear(&self);

    fn is_available(&self) -> bool {
        true
    }
}

/// Typed view of the ROI collection. A malformed stored collection degrades
/// to an empty list.
pub async fn load_roi_records(store: &dyn RecordStore) -> Vec<RoiRecord> {
    let raw = store.load(Collection::RoiData).await;
    match serde_json::from_value(Value::Array(raw)) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "Discarding malformed {} collection: {}",
                Collection::RoiData.key(),
                err
            );
            Vec::new()
        }
    }
}

pub async fn save_roi_records(store: &dyn RecordStore, records: &[RoiRecord]) {
    let raw = records
        .iter()
        .filter_map(|record| serde_json::to_value(record).ok())
        .collect();
    store.save(Collection::RoiData, raw).await;
}

/// Assigns the id and creation timestamp, appends to the stored collection
/// and returns the stored record.
pub async fn append_roi_record(store: &dyn RecordStore, new: NewRoiRecord) -> RoiRecord {
    let record = RoiRecord::from_new(new);
    let mut records = load_roi_records(store).await;
    records.push(record.clone());
    save_roi_records(store, &records).await;
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_record(date: &str, tool: &str) -> NewRoiRecord {
        NewRoiRecord {
            date: date.parse::<NaiveDate>().unwrap(),
            costs: 100.0,
            revenue: 250.0,
            automation_tool: tool.to_string(),
            leads_generated: 4,
        }
    }

    #[tokio::test]
    async fn test_append_assigns_id_and_persists() {
        let store = MemoryStore::new();

        let first = append_roi_record(&store, new_record("2024-01-01", "Zapier")).await;
        let second = append_roi_record(&store, new_record("2024-01-02", "Make")).await;
        assert!(first.id.starts_with("roi_"));
        assert_ne!(first.id, second.id);

        let records = load_roi_records(&store).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].automation_tool, "Zapier");
        assert_eq!(records[1].automation_tool, "Make");
    }

    #[tokio::test]
    async fn test_malformed_collection_degrades_to_empty() {
        let store = MemoryStore::new();
        store
            .save(
                Collection::RoiData,
                vec![serde_json::json!({"id": "roi_x", "date": "not a date"})],
            )
            .await;

        assert!(load_roi_records(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_wipes_every_collection() {
        let store = MemoryStore::new();
        for collection in Collection::ALL {
            store
                .save(collection, vec![serde_json::json!({"x": 1})])
                .await;
        }

        store.clear().await;

        for collection in Collection::ALL {
            assert!(store.load(collection).await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_null_store_is_unavailable_and_empty() {
        let store = NullStore;
        assert!(!store.is_available());

        store
            .save(Collection::RoiData, vec![serde_json::json!({"x": 1})])
            .await;
        assert!(store.load(Collection::RoiData).await.is_empty());
    }
}
