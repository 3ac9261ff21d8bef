use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{ChartDataPoint, ChartMetric, TimeFilter, ToolAggregate};
use crate::services::chart_data;
use crate::state::AppState;
use crate::store;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/timeseries", get(get_time_series))
        .route("/tools", get(get_tool_aggregates))
}

#[derive(Debug, Deserialize)]
struct TimeSeriesQuery {
    period: Option<String>,
    metric: Option<String>,
}

/// GET /api/charts/timeseries?period=30d&metric=revenue
async fn get_time_series(
    Query(query): Query<TimeSeriesQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ChartDataPoint>>, AppError> {
    let period = query
        .period
        .as_deref()
        .and_then(TimeFilter::from_str_opt)
        .unwrap_or_default();

    let metric = match query.metric.as_deref() {
        None => ChartMetric::default(),
        Some(name) => ChartMetric::from_str_opt(name).ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid metric: '{}'. Must be one of: revenue, costs, roi",
                name
            ))
        })?,
    };

    info!(
        "GET /api/charts/timeseries - period={}, metric={:?}",
        period, metric
    );

    let records = store::load_roi_records(state.store.as_ref()).await;
    Ok(Json(chart_data::prepare_time_series(&records, period, metric)))
}

/// GET /api/charts/tools
async fn get_tool_aggregates(State(state): State<AppState>) -> Json<Vec<ToolAggregate>> {
    info!("GET /api/charts/tools");
    let records = store::load_roi_records(state.store.as_ref()).await;
    Json(chart_data::aggregate_by_tool(&records))
}
