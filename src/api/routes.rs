use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    history::{delete_history, get_history},
    risk::{get_risk, score_metrics},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/risk/:username", get(get_risk))
        .route("/api/score", post(score_metrics))
        .route("/api/history", get(get_history).delete(delete_history))
        .with_state(state)
}
