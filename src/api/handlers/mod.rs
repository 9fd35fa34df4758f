use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::error;
use serde::Deserialize;

use crate::api::models::ErrorResponse;
use crate::errors::{RiskError, UpstreamError};
use crate::services::analysis::AnalysisService;

pub mod history;
pub mod risk;

pub struct AppState {
    pub service: AnalysisService,
}

#[derive(Deserialize)]
pub struct RiskParams {
    pub rated_only: Option<bool>,
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

/// Map an application error onto an HTTP response
pub fn error_response(err: &anyhow::Error) -> Response {
    if let Some(risk_error) = err.downcast_ref::<RiskError>() {
        return risk_error_response(risk_error, err);
    }
    if let Some(upstream) = err.downcast_ref::<UpstreamError>() {
        return upstream_error_response(upstream, err);
    }

    error!("Request failed: {:#}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(err.to_string()))).into_response()
}

fn risk_error_response(risk_error: &RiskError, err: &anyhow::Error) -> Response {
    match risk_error {
        RiskError::InvalidInput(report) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: risk_error.to_string(),
                issues: report.issues.clone(),
            }),
        )
            .into_response(),
        RiskError::InvalidUsername(_) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(risk_error.to_string()))).into_response()
        }
        RiskError::Upstream(upstream) => upstream_error_response(upstream, err),
        RiskError::InvalidConfig(_) | RiskError::ScoreOutOfRange(_) => {
            error!("Request failed: {:#}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(risk_error.to_string())))
                .into_response()
        }
    }
}

fn upstream_error_response(upstream: &UpstreamError, err: &anyhow::Error) -> Response {
    let status = match upstream {
        UpstreamError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
        _ => {
            error!("Upstream failure: {:#}", err);
            StatusCode::BAD_GATEWAY
        }
    };
    (status, Json(ErrorResponse::new(upstream.to_string()))).into_response()
}
