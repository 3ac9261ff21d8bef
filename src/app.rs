use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{charts, data, health, recommendations, records, roi};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/records", records::router())
        .nest("/api/roi", roi::router())
        .nest("/api/recommendations", recommendations::router())
        .nest("/api/charts", charts::router())
        .nest("/api/data", data::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
