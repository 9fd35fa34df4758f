use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, AppState, HistoryParams};
use crate::api::models::{ClearedResponse, HistoryResponse};

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> impl IntoResponse {
    let limit = params
        .limit
        .unwrap_or(state.service.config().history.max_entries);

    match state.service.history(limit) {
        Ok(items) => Json(HistoryResponse {
            total: items.len(),
            items,
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn delete_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.service.clear_history() {
        Ok(removed) => Json(ClearedResponse { removed }).into_response(),
        Err(e) => error_response(&e),
    }
}
