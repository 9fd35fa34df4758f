use serde::Serialize;

use crate::database::HistoryEntry;
use crate::domain::{RiskScoreResult, ValidationIssue};
use crate::risk::RiskLevel;
use crate::services::analysis::Analysis;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskLevelInfo {
    pub level: RiskLevel,
    pub label: &'static str,
    pub color: &'static str,
}

impl From<RiskLevel> for RiskLevelInfo {
    fn from(level: RiskLevel) -> Self {
        Self {
            level,
            label: level.label(),
            color: level.color(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResponse {
    #[serde(flatten)]
    pub result: RiskScoreResult,
    pub risk_level: RiskLevelInfo,
}

impl From<Analysis> for RiskResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            result: analysis.result,
            risk_level: analysis.level.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub items: Vec<HistoryEntry>,
    pub total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearedResponse {
    pub removed: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            issues: Vec::new(),
        }
    }
}
