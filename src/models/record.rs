use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// One logged cost/revenue/leads entry for an automation tool. Immutable once
// created; the only destroy operation is the bulk clear-all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiRecord {
    pub id: String,
    pub date: NaiveDate,
    pub costs: f64,
    pub revenue: f64,
    pub automation_tool: String,
    pub leads_generated: u32,
    pub created_at: DateTime<Utc>,
}

/// Client payload for creating a record; id and creation timestamp are
/// assigned server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoiRecord {
    pub date: NaiveDate,
    pub costs: f64,
    pub revenue: f64,
    pub automation_tool: String,
    pub leads_generated: u32,
}

impl RoiRecord {
    pub fn from_new(new: NewRoiRecord) -> Self {
        Self {
            id: format!("roi_{}", Uuid::new_v4()),
            date: new.date,
            costs: new.costs,
            revenue: new.revenue,
            automation_tool: new.automation_tool,
            leads_generated: new.leads_generated,
            created_at: Utc::now(),
        }
    }
}
