use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::{NewRoiRecord, RoiRecord};
use crate::state::AppState;
use crate::store;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_records).post(create_record).delete(clear_records),
    )
}

async fn list_records(State(state): State<AppState>) -> Json<Vec<RoiRecord>> {
    let records = store::load_roi_records(state.store.as_ref()).await;
    info!("GET /api/records - {} records", records.len());
    Json(records)
}

async fn create_record(
    State(state): State<AppState>,
    Json(new): Json<NewRoiRecord>,
) -> Result<Json<RoiRecord>, AppError> {
    info!(
        "POST /api/records - tool={}, date={}",
        new.automation_tool, new.date
    );

    validate_new_record(&new)?;

    let record = store::append_roi_record(state.store.as_ref(), new).await;
    Ok(Json(record))
}

fn validate_new_record(new: &NewRoiRecord) -> Result<(), AppError> {
    if !new.costs.is_finite() || new.costs < 0.0 {
        return Err(AppError::Validation(
            "costs must be a non-negative number".to_string(),
        ));
    }
    if !new.revenue.is_finite() || new.revenue < 0.0 {
        return Err(AppError::Validation(
            "revenue must be a non-negative number".to_string(),
        ));
    }
    if new.automation_tool.trim().is_empty() {
        return Err(AppError::Validation(
            "automationTool must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// The only destroy operation: wipes every stored collection.
async fn clear_records(State(state): State<AppState>) -> &'static str {
    info!("DELETE /api/records - clearing all collections");
    state.store.clear().await;
    "OK"
}
