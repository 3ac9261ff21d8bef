use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::{RoiReport, TimeFilter};
use crate::services::roi_calculator;
use crate::state::AppState;
use crate::store;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate_roi))
        .route("/report", get(get_report))
}

#[derive(Debug, Deserialize)]
struct ReportQuery {
    period: Option<String>,
}

/// POST /api/roi/calculate
///
/// One-shot report over submitted totals; stored records are not involved.
/// Rejects missing, non-numeric or negative costs/revenue; an unknown
/// period falls back to 30d.
async fn calculate_roi(Json(body): Json<Value>) -> Result<Json<RoiReport>, AppError> {
    let costs = require_non_negative_number(&body, "costs")?;
    let revenue = require_non_negative_number(&body, "revenue")?;

    let period = body
        .get("period")
        .and_then(Value::as_str)
        .and_then(TimeFilter::from_str_opt)
        .unwrap_or_default();

    let leads_generated = body
        .get("leadsGenerated")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    info!(
        "POST /api/roi/calculate - costs={}, revenue={}, period={}",
        costs, revenue, period
    );

    let roi_percentage = roi_calculator::roi_percentage(costs, revenue);

    let report = RoiReport {
        total_roi: roi_calculator::roi(costs, revenue),
        roi_percentage,
        // The submitted revenue doubles as the daily rate for the one-shot case.
        payback_period: roi_calculator::payback_period(costs, revenue),
        total_costs: costs,
        total_revenue: revenue,
        net_profit: revenue - costs,
        cost_per_acquisition: if leads_generated > 0.0 {
            roi_calculator::cost_per_acquisition(costs, leads_generated)
        } else {
            0.0
        },
        revenue_growth_rate: if roi_percentage > 0.0 {
            roi_percentage / 100.0
        } else {
            0.0
        },
        period,
        generated_at: Utc::now(),
    };

    Ok(Json(report))
}

fn require_non_negative_number(body: &Value, field: &str) -> Result<f64, AppError> {
    let value = body
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| AppError::Validation(format!("{} must be a number", field)))?;
    if value < 0.0 {
        return Err(AppError::Validation(format!(
            "{} must be non-negative",
            field
        )));
    }
    Ok(value)
}

/// GET /api/roi/report?period=30d
///
/// Full report over the stored ROI collection.
async fn get_report(
    Query(query): Query<ReportQuery>,
    State(state): State<AppState>,
) -> Json<RoiReport> {
    let period = query
        .period
        .as_deref()
        .and_then(TimeFilter::from_str_opt)
        .unwrap_or_default();

    info!("GET /api/roi/report - period={}", period);

    let records = store::load_roi_records(state.store.as_ref()).await;
    Json(roi_calculator::generate_roi_report(&records, period))
}
