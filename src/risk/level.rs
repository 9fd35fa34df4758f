use serde::{Deserialize, Serialize};

use crate::config::settings::RiskTiers;
use crate::errors::RiskError;

const MAX_SCORE: u32 = 100;

/// Qualitative tier of a final 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Classify with the default tier boundaries
    pub fn from_score(score: u32) -> Result<Self, RiskError> {
        Self::from_score_with_tiers(score, &RiskTiers::default())
    }

    /// Classify with custom tier boundaries (inclusive upper bounds)
    pub fn from_score_with_tiers(score: u32, tiers: &RiskTiers) -> Result<Self, RiskError> {
        if score > MAX_SCORE {
            return Err(RiskError::ScoreOutOfRange(score));
        }

        let level = if score <= tiers.low {
            RiskLevel::Low
        } else if score <= tiers.moderate {
            RiskLevel::Moderate
        } else if score <= tiers.high {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        };
        Ok(level)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::VeryHigh => "VERY_HIGH",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LOW" => Some(RiskLevel::Low),
            "MODERATE" => Some(RiskLevel::Moderate),
            "HIGH" => Some(RiskLevel::High),
            "VERY_HIGH" => Some(RiskLevel::VeryHigh),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::VeryHigh => "Very High Risk",
        }
    }

    /// Display colour as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#4CAF50",
            RiskLevel::Moderate => "#FFC107",
            RiskLevel::High => "#FF9800",
            RiskLevel::VeryHigh => "#F44336",
        }
    }
}
