use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, AppState, RiskParams};
use crate::api::models::RiskResponse;
use crate::domain::PlayerMetrics;
use crate::services::analysis::evaluate;

pub async fn get_risk(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(params): Query<RiskParams>,
) -> impl IntoResponse {
    let rated_only = params
        .rated_only
        .unwrap_or(state.service.config().fetch.rated_only);

    match state.service.analyze(&username, rated_only).await {
        Ok(analysis) => Json(RiskResponse::from(analysis)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Score a caller-supplied metrics document; nothing is fetched or recorded
pub async fn score_metrics(
    State(state): State<Arc<AppState>>,
    Json(metrics): Json<PlayerMetrics>,
) -> impl IntoResponse {
    match evaluate(&metrics, &state.service.config().risk) {
        Ok(analysis) => Json(RiskResponse::from(analysis)).into_response(),
        Err(e) => error_response(&anyhow::Error::from(e)),
    }
}
