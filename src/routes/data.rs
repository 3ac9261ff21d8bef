use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::RoiRecord;
use crate::state::AppState;
use crate::store;

pub fn router() -> Router<AppState> {
    Router::new().route("/export", get(export_data))
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
    format: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportPayload<'a> {
    exported_at: DateTime<Utc>,
    total_records: usize,
    data: &'a [RoiRecord],
}

/// GET /api/data/export?format=json|csv
///
/// Dumps the stored ROI collection as a download attachment. Rejected when
/// the store is unavailable; unknown formats fall back to json.
async fn export_data(
    Query(query): Query<ExportQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.is_available() {
        return Err(AppError::StorageUnavailable);
    }

    let format = query.format.as_deref().unwrap_or("json");
    let records = store::load_roi_records(state.store.as_ref()).await;
    let exported_at = Utc::now();

    info!(
        "GET /api/data/export - format={}, {} records",
        format,
        records.len()
    );

    let (content_type, extension, body) = match format {
        "csv" => ("text/csv", "csv", records_to_csv(&records)?),
        _ => {
            let payload = ExportPayload {
                exported_at,
                total_records: records.len(),
                data: &records,
            };
            let body = serde_json::to_vec_pretty(&payload)
                .map_err(|err| AppError::Internal(format!("Failed to encode export: {}", err)))?;
            ("application/json", "json", body)
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    let disposition = format!(
        "attachment; filename=\"roi-data-{}.{}\"",
        exported_at.to_rfc3339(),
        extension
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|err| AppError::Internal(format!("Invalid export filename: {}", err)))?,
    );

    Ok((headers, body))
}

fn records_to_csv(records: &[RoiRecord]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record([
            "ID",
            "Date",
            "Costs",
            "Revenue",
            "Automation Tool",
            "Leads Generated",
            "Created At",
        ])
        .map_err(|err| AppError::Internal(format!("Failed to write CSV header: {}", err)))?;

    for record in records {
        let date = record.date.to_string();
        let costs = record.costs.to_string();
        let revenue = record.revenue.to_string();
        let leads = record.leads_generated.to_string();
        let created_at = record.created_at.to_rfc3339();
        writer
            .write_record([
                record.id.as_str(),
                date.as_str(),
                costs.as_str(),
                revenue.as_str(),
                record.automation_tool.as_str(),
                leads.as_str(),
                created_at.as_str(),
            ])
            .map_err(|err| AppError::Internal(format!("Failed to write CSV row: {}", err)))?;
    }

    writer
        .into_inner()
        .map_err(|err| AppError::Internal(format!("Failed to finish CSV: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_csv_export_has_header_and_one_line_per_record() {
        let records = vec![RoiRecord {
            id: "roi_1".to_string(),
            date: "2024-01-01".parse().unwrap(),
            costs: 100.0,
            revenue: 300.0,
            automation_tool: "Zapier".to_string(),
            leads_generated: 10,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
        }];

        let csv = String::from_utf8(records_to_csv(&records).unwrap()).unwrap();
        let lines: Vec<&str> = csv.trim_end().lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "ID,Date,Costs,Revenue,Automation Tool,Leads Generated,Created At"
        );
        assert!(lines[1].starts_with("roi_1,2024-01-01,100,300,Zapier,10,"));
    }

    #[test]
    fn test_csv_export_of_empty_collection_is_header_only() {
        let csv = String::from_utf8(records_to_csv(&[]).unwrap()).unwrap();
        assert_eq!(
            csv.trim_end(),
            "ID,Date,Costs,Revenue,Automation Tool,Leads Generated,Created At"
        );
    }
}
