use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::TimeClass;

/// Why a signal produced no score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalReason {
    NoAccuracyData,
    BelowThreshold,
}

impl SignalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalReason::NoAccuracyData => "no_accuracy_data",
            SignalReason::BelowThreshold => "below_threshold",
        }
    }
}

/// Why a player has no headline score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoScoreReason {
    NoRatedGames,
}

impl NoScoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoScoreReason::NoRatedGames => "no_rated_games",
        }
    }
}

/// Audit record for one weighted signal of a format
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorBreakdown {
    /// Input value as a percentage (win rate or high-accuracy share)
    pub raw_value: f64,
    pub sample_size: u32,
    /// Sub-score before the confidence weight
    pub base_score: f64,
    pub confidence: f64,
    /// `base_score * confidence`
    pub score: f64,
    /// Fixed aggregation weight of this signal
    pub weight: f64,
    /// `weight * score`
    pub contribution: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<SignalReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    pub overall_winrate: FactorBreakdown,
    pub recent_winrate: FactorBreakdown,
    pub high_accuracy: FactorBreakdown,
    pub weighted_sum: f64,
    pub account_age_multiplier: f64,
    pub before_cap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRiskResult {
    pub format: TimeClass,
    /// Capped score, 0-100
    pub score: f64,
    pub factors: RiskFactors,
}

/// Headline score of a player: the riskiest eligible format, or the
/// no-data sentinel when no format qualified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineScore {
    pub value: u32,
    pub format: Option<TimeClass>,
    pub factors: Option<RiskFactors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<NoScoreReason>,
}

impl HeadlineScore {
    pub fn no_rated_games() -> Self {
        Self {
            value: 0,
            format: None,
            factors: None,
            reason: Some(NoScoreReason::NoRatedGames),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.reason.is_some()
    }
}

/// Output of the risk engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScoreResult {
    pub max_score: HeadlineScore,
    pub other_formats: Vec<FormatRiskResult>,
    /// Account-age multiplier that was applied
    pub account_age_score: f64,
    pub account_age_days: u32,
    pub username: String,
    pub timestamp: DateTime<Utc>,
}
