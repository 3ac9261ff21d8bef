use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::{OptimizationRecommendation, RoiRecord};
use crate::services::efficiency;
use crate::services::recommendation_engine;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate_recommendations))
}

/// POST /api/recommendations/generate
///
/// Runs the rule table over the submitted records. When no records are
/// given, the efficiency side falls back to the submitted raw totals;
/// bottleneck detection always works off the records.
async fn generate_recommendations(
    Json(body): Json<Value>,
) -> Result<Json<Vec<OptimizationRecommendation>>, AppError> {
    let roi_data = body
        .get("roiData")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::Validation("roiData must be an array".to_string()))?;

    let records: Vec<RoiRecord> = serde_json::from_value(Value::Array(roi_data.clone()))
        .map_err(|err| AppError::Validation(format!("roiData entries are malformed: {}", err)))?;

    let costs = number_or_zero(&body, "costs");
    let revenue = number_or_zero(&body, "revenue");
    let leads = number_or_zero(&body, "leadsGenerated");

    info!(
        "POST /api/recommendations/generate - {} records, costs={}, revenue={}",
        records.len(),
        costs,
        revenue
    );

    let summary = if records.is_empty() {
        efficiency::analyze_efficiency_totals(costs, revenue, leads)
    } else {
        efficiency::analyze_efficiency(&records)
    };
    let bottlenecks = efficiency::identify_bottlenecks(&records);

    let recommendations =
        recommendation_engine::recommendations_from_analysis(&summary, &bottlenecks);

    info!("Generated {} recommendations", recommendations.len());

    Ok(Json(recommendations))
}

fn number_or_zero(body: &Value, field: &str) -> f64 {
    body.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}
