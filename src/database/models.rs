use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{RiskScoreResult, TimeClass};
use crate::risk::RiskLevel;

/// Persisted projection of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub username: String,
    pub score: u32,
    pub format: Option<TimeClass>,
    pub risk_level: RiskLevel,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn from_result(result: &RiskScoreResult, risk_level: RiskLevel) -> Self {
        Self {
            username: result.username.clone(),
            score: result.max_score.value,
            format: result.max_score.format,
            risk_level,
            timestamp: result.timestamp,
        }
    }
}
