use log::debug;

use super::aggregate::{account_age_multiplier, evaluate_format};
use super::confidence::ConfidenceWeights;
use crate::config::settings::RiskSettings;
use crate::domain::{
    ensure_valid, FormatRiskResult, FormatStats, HeadlineScore, PlayerMetrics, RiskScoreResult,
    TimeClass,
};
use crate::errors::RiskError;

/// Score a player whose metrics are already trusted.
///
/// Deterministic and side-effect free: the same input always yields the
/// same result, timestamp included (it is copied from the metrics).
pub fn calculate_risk_score(metrics: &PlayerMetrics, settings: &RiskSettings) -> RiskScoreResult {
    let mut weights = ConfidenceWeights::new(settings.confidence_k);
    let eligible = eligible_formats(metrics, settings);

    let mut results: Vec<FormatRiskResult> = eligible
        .into_iter()
        .map(|(format, stats)| {
            evaluate_format(format, stats, metrics.account_age, settings, &mut weights)
        })
        .collect();

    // Stable: equal scores keep format order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut remaining = results.into_iter();
    let max_score = match remaining.next() {
        Some(top) => {
            debug!(
                "Headline format for {} is {} ({:.2})",
                metrics.username, top.format, top.score
            );
            HeadlineScore {
                value: round_score(top.score, settings),
                format: Some(top.format),
                factors: Some(top.factors),
                reason: None,
            }
        }
        None => {
            debug!("No eligible formats for {}", metrics.username);
            HeadlineScore::no_rated_games()
        }
    };

    RiskScoreResult {
        max_score,
        other_formats: remaining.collect(),
        account_age_score: account_age_multiplier(metrics.account_age, settings),
        account_age_days: metrics.account_age,
        username: metrics.username.clone(),
        timestamp: metrics.timestamp,
    }
}

/// Validate configuration and metrics, then score.
pub fn score_player(
    metrics: &PlayerMetrics,
    settings: &RiskSettings,
) -> Result<RiskScoreResult, RiskError> {
    settings.validate()?;
    ensure_valid(metrics)?;
    Ok(calculate_risk_score(metrics, settings))
}

fn eligible_formats<'a>(
    metrics: &'a PlayerMetrics,
    settings: &RiskSettings,
) -> Vec<(TimeClass, &'a FormatStats)> {
    metrics
        .formats
        .iter()
        .filter(|(format, stats)| {
            let eligible = stats.recent_games.total >= settings.min_games;
            if !eligible {
                debug!(
                    "Skipping {} for {}: {} recent games (< {})",
                    format, metrics.username, stats.recent_games.total, settings.min_games
                );
            }
            eligible
        })
        .map(|(format, stats)| (*format, stats))
        .collect()
}

fn round_score(score: f64, settings: &RiskSettings) -> u32 {
    score.round().clamp(0.0, settings.score_cap.round()) as u32
}
