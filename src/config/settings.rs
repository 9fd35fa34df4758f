use serde::{Deserialize, Serialize};

use crate::errors::RiskError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Aggregation weights of the three signals. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FormatWeights {
    pub overall_winrate: f64,
    pub recent_winrate: f64,
    pub high_accuracy: f64,
}

impl Default for FormatWeights {
    fn default() -> Self {
        Self {
            overall_winrate: 0.35,
            recent_winrate: 0.35,
            high_accuracy: 0.30,
        }
    }
}

impl FormatWeights {
    pub fn sum(&self) -> f64 {
        self.overall_winrate + self.recent_winrate + self.high_accuracy
    }
}

/// Piecewise curve for win rates (fractions, 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct WinRateCurve {
    /// Win rate at or below which there is no signal
    pub baseline: f64,
    /// Width of each ramp segment above the baseline
    pub band: f64,
    pub base_score: f64,
    pub extended_score: f64,
}

impl Default for WinRateCurve {
    fn default() -> Self {
        Self {
            baseline: 0.5,
            band: 0.1,
            base_score: 50.0,
            extended_score: 100.0,
        }
    }
}

/// Piecewise curve for the share of high-accuracy games (percent, 0-100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct AccuracyCurve {
    pub moderate_suspicion_threshold: f64,
    pub high_suspicion_threshold: f64,
    pub step_threshold: f64,
    pub step_width: f64,
    pub step_bonus: f64,
    pub moderate_max_score: f64,
    pub high_max_score: f64,
}

impl Default for AccuracyCurve {
    fn default() -> Self {
        Self {
            moderate_suspicion_threshold: 10.0,
            high_suspicion_threshold: 20.0,
            step_threshold: 30.0,
            step_width: 5.0,
            step_bonus: 50.0,
            moderate_max_score: 50.0,
            high_max_score: 100.0,
        }
    }
}

/// Rating-dependent accuracy a single game needs to count as "high accuracy"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct HighAccuracyRule {
    pub rating_threshold: u32,
    pub below_threshold_accuracy: f64,
    pub above_threshold_accuracy: f64,
}

impl Default for HighAccuracyRule {
    fn default() -> Self {
        Self {
            rating_threshold: 1500,
            below_threshold_accuracy: 80.0,
            above_threshold_accuracy: 90.0,
        }
    }
}

impl HighAccuracyRule {
    pub fn required_accuracy(&self, rating: u32) -> f64 {
        if rating < self.rating_threshold {
            self.below_threshold_accuracy
        } else {
            self.above_threshold_accuracy
        }
    }
}

/// Inclusive upper bounds of the LOW, MODERATE and HIGH tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct RiskTiers {
    pub low: u32,
    pub moderate: u32,
    pub high: u32,
}

impl Default for RiskTiers {
    fn default() -> Self {
        Self {
            low: 30,
            moderate: 50,
            high: 70,
        }
    }
}

/// Everything the scoring engine reads. Injected per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct RiskSettings {
    /// K in `n / (n + K)`
    pub confidence_k: f64,
    /// Recent games a format needs to be eligible
    pub min_games: u32,
    pub account_age_cutoff_days: u32,
    pub account_age_multiplier: f64,
    pub score_cap: f64,
    pub weights: FormatWeights,
    pub win_rate: WinRateCurve,
    pub accuracy: AccuracyCurve,
    pub high_accuracy: HighAccuracyRule,
    pub tiers: RiskTiers,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            confidence_k: 20.0,
            min_games: 5,
            account_age_cutoff_days: 60,
            account_age_multiplier: 1.5,
            score_cap: 100.0,
            weights: FormatWeights::default(),
            win_rate: WinRateCurve::default(),
            accuracy: AccuracyCurve::default(),
            high_accuracy: HighAccuracyRule::default(),
            tiers: RiskTiers::default(),
        }
    }
}

impl RiskSettings {
    pub fn validate(&self) -> Result<(), RiskError> {
        if !(self.confidence_k.is_finite() && self.confidence_k > 0.0) {
            return invalid(format!("confidenceK must be positive (got {})", self.confidence_k));
        }

        for (name, value) in [
            ("overallWinrate", self.weights.overall_winrate),
            ("recentWinrate", self.weights.recent_winrate),
            ("highAccuracy", self.weights.high_accuracy),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("weights.{} must be non-negative (got {})", name, value));
            }
        }
        if (self.weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return invalid(format!("weights must sum to 1.0 (got {})", self.weights.sum()));
        }

        if !(self.account_age_multiplier.is_finite() && self.account_age_multiplier > 0.0) {
            return invalid(format!(
                "accountAgeMultiplier must be positive (got {})",
                self.account_age_multiplier
            ));
        }
        if !(self.score_cap > 0.0 && self.score_cap <= 100.0) {
            return invalid(format!("scoreCap must be in (0, 100] (got {})", self.score_cap));
        }

        if !(self.win_rate.band > 0.0) {
            return invalid(format!("winRate.band must be positive (got {})", self.win_rate.band));
        }

        let curve = &self.accuracy;
        if !(curve.moderate_suspicion_threshold < curve.high_suspicion_threshold
            && curve.high_suspicion_threshold < curve.step_threshold)
        {
            return invalid("accuracy thresholds must be strictly increasing".to_string());
        }
        if !(curve.step_width > 0.0) {
            return invalid(format!("accuracy.stepWidth must be positive (got {})", curve.step_width));
        }

        let tiers = &self.tiers;
        if !(tiers.low < tiers.moderate && tiers.moderate < tiers.high && tiers.high < 100) {
            return invalid(format!(
                "tiers must satisfy low < moderate < high < 100 (got {}, {}, {})",
                tiers.low, tiers.moderate, tiers.high
            ));
        }

        Ok(())
    }
}

fn invalid(message: String) -> Result<(), RiskError> {
    Err(RiskError::InvalidConfig(message))
}

/// Settings of the chess.com collaborator
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub api_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub backoff_max_ms: u64,
    pub cache_ttl_secs: u64,
    /// Most recent games kept per format
    pub recent_games_limit: usize,
    /// Monthly archives read, newest first
    pub archive_months: usize,
    pub rated_only: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.chess.com/pub".to_string(),
            user_agent: "ChessRisk/0.1 (+https://github.com/chess-risk)".to_string(),
            timeout_secs: 10,
            max_retries: 3,
            backoff_base_ms: 500,
            backoff_max_ms: 8_000,
            cache_ttl_secs: 300,
            recent_games_limit: 50,
            archive_months: 2,
            rated_only: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistorySettings {
    pub database_path: String,
    pub max_entries: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "chess_risk_history.db".to_string()),
            max_entries: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub risk: RiskSettings,
    pub fetch: FetchSettings,
    pub history: HistorySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            risk: RiskSettings::default(),
            fetch: FetchSettings::default(),
            history: HistorySettings::default(),
        }
    }

    pub fn with_risk(mut self, risk: RiskSettings) -> Self {
        self.risk = risk;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        RiskSettings::default().validate().unwrap();
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((FormatWeights::default().sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_required_accuracy_by_rating() {
        let rule = HighAccuracyRule::default();
        assert_eq!(rule.required_accuracy(1499), 80.0);
        assert_eq!(rule.required_accuracy(1500), 90.0);
        assert_eq!(rule.required_accuracy(2700), 90.0);
    }

    #[test]
    fn test_reject_weights_not_summing_to_one() {
        let mut settings = RiskSettings::default();
        settings.weights.high_accuracy = 0.5;
        assert!(matches!(settings.validate(), Err(RiskError::InvalidConfig(_))));
    }

    #[test]
    fn test_reject_non_positive_k() {
        let mut settings = RiskSettings::default();
        settings.confidence_k = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_reject_unordered_tiers() {
        let mut settings = RiskSettings::default();
        settings.tiers.moderate = 80;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: RiskSettings =
            serde_json::from_str(r#"{"minGames": 10, "tiers": {"high": 75}}"#).unwrap();
        assert_eq!(settings.min_games, 10);
        assert_eq!(settings.tiers.high, 75);
        assert_eq!(settings.tiers.low, 30);
        assert_eq!(settings.confidence_k, 20.0);
    }

    #[test]
    fn test_reject_unknown_fields() {
        let result = serde_json::from_str::<RiskSettings>(r#"{"minGame": 10}"#);
        assert!(result.is_err());
    }
}
