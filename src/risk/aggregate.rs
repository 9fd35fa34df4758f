use super::confidence::ConfidenceWeights;
use super::signals::{accuracy_score, win_rate_score, SignalScore};
use crate::config::settings::RiskSettings;
use crate::domain::{FactorBreakdown, FormatRiskResult, FormatStats, RiskFactors, TimeClass};

/// Flat step: young accounts (inclusive cutoff) get the multiplier
pub fn account_age_multiplier(account_age_days: u32, settings: &RiskSettings) -> f64 {
    if account_age_days <= settings.account_age_cutoff_days {
        settings.account_age_multiplier
    } else {
        1.0
    }
}

/// Combine the three signals of one format into a capped 0-100 score
pub fn evaluate_format(
    format: TimeClass,
    stats: &FormatStats,
    account_age_days: u32,
    settings: &RiskSettings,
    weights: &mut ConfidenceWeights,
) -> FormatRiskResult {
    let overall = win_rate_score(
        stats.overall_winrate / 100.0,
        stats.games_counts.total,
        &settings.win_rate,
        weights,
    );
    let recent = win_rate_score(
        stats.recent_games.winrate / 100.0,
        stats.recent_games.total,
        &settings.win_rate,
        weights,
    );
    let accuracy = accuracy_score(
        stats.accuracy.high_accuracy_percentage,
        stats.accuracy.games_with_accuracy,
        &settings.accuracy,
        weights,
    );

    let overall_winrate = breakdown(
        stats.overall_winrate,
        stats.games_counts.total,
        overall,
        settings.weights.overall_winrate,
    );
    let recent_winrate = breakdown(
        stats.recent_games.winrate,
        stats.recent_games.total,
        recent,
        settings.weights.recent_winrate,
    );
    let high_accuracy = breakdown(
        stats.accuracy.high_accuracy_percentage,
        stats.accuracy.games_with_accuracy,
        accuracy,
        settings.weights.high_accuracy,
    );

    let weighted_sum =
        overall_winrate.contribution + recent_winrate.contribution + high_accuracy.contribution;
    let multiplier = account_age_multiplier(account_age_days, settings);
    let before_cap = weighted_sum * multiplier;

    FormatRiskResult {
        format,
        score: before_cap.min(settings.score_cap),
        factors: RiskFactors {
            overall_winrate,
            recent_winrate,
            high_accuracy,
            weighted_sum,
            account_age_multiplier: multiplier,
            before_cap,
        },
    }
}

fn breakdown(raw_value: f64, sample_size: u32, signal: SignalScore, weight: f64) -> FactorBreakdown {
    FactorBreakdown {
        raw_value,
        sample_size,
        base_score: signal.base_score,
        confidence: signal.confidence,
        score: signal.score,
        weight,
        contribution: weight * signal.score,
        reason: signal.reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccuracyStats, GamesCounts, RecentGames, SignalReason};

    fn stats(overall: f64, overall_games: u32, recent: f64, recent_games: u32) -> FormatStats {
        let overall_wins = (overall / 100.0 * overall_games as f64).round() as u32;
        let recent_wins = (recent / 100.0 * recent_games as f64).round() as u32;
        FormatStats {
            current_rating: 1600,
            overall_winrate: overall,
            games_counts: GamesCounts {
                total: overall_games,
                wins: overall_wins,
                losses: overall_games - overall_wins,
                draws: 0,
            },
            recent_games: RecentGames {
                total: recent_games,
                wins: recent_wins,
                losses: recent_games - recent_wins,
                draws: 0,
                winrate: recent,
            },
            accuracy: AccuracyStats::default(),
        }
    }

    fn evaluate(stats: &FormatStats, age: u32) -> FormatRiskResult {
        let settings = RiskSettings::default();
        let mut weights = ConfidenceWeights::new(settings.confidence_k);
        evaluate_format(TimeClass::Blitz, stats, age, &settings, &mut weights)
    }

    #[test]
    fn test_account_age_boundary_is_inclusive() {
        let settings = RiskSettings::default();
        assert_eq!(account_age_multiplier(0, &settings), 1.5);
        assert_eq!(account_age_multiplier(59, &settings), 1.5);
        assert_eq!(account_age_multiplier(60, &settings), 1.5);
        assert_eq!(account_age_multiplier(61, &settings), 1.0);
        assert_eq!(account_age_multiplier(3650, &settings), 1.0);
    }

    #[test]
    fn test_cap_applied_after_multiplier() {
        let result = evaluate(&stats(80.0, 20, 80.0, 20), 30);

        assert!((result.factors.weighted_sum - 70.0).abs() < 1e-9);
        assert_eq!(result.factors.account_age_multiplier, 1.5);
        assert!((result.factors.before_cap - 105.0).abs() < 1e-9);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.factors.high_accuracy.reason, Some(SignalReason::NoAccuracyData));
    }

    #[test]
    fn test_old_account_not_multiplied() {
        let result = evaluate(&stats(80.0, 20, 80.0, 20), 400);
        assert!((result.score - 70.0).abs() < 1e-9);
        assert_eq!(result.factors.account_age_multiplier, 1.0);
    }

    #[test]
    fn test_contributions_use_fixed_weights() {
        let result = evaluate(&stats(65.0, 60, 55.0, 20), 400);
        let factors = &result.factors;

        assert_eq!(factors.overall_winrate.weight, 0.35);
        assert_eq!(factors.high_accuracy.weight, 0.30);
        // 75 * 0.75 * 0.35 + 25 * 0.5 * 0.35
        let expected = 75.0 * 0.75 * 0.35 + 25.0 * 0.5 * 0.35;
        assert!((factors.weighted_sum - expected).abs() < 1e-9);
        assert!((result.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_accuracy_signal_contributes() {
        let mut format_stats = stats(50.0, 100, 50.0, 20);
        format_stats.accuracy = AccuracyStats {
            games_with_accuracy: 20,
            high_accuracy_games: 6,
            high_accuracy_percentage: 30.0,
        };
        let result = evaluate(&format_stats, 400);

        assert!((result.factors.high_accuracy.contribution - 15.0).abs() < 1e-9);
        assert!((result.score - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_stays_within_bounds() {
        for overall in [0.0, 40.0, 55.0, 70.0, 90.0, 100.0] {
            for recent in [0.0, 60.0, 100.0] {
                for games in [0, 5, 50, 5000] {
                    for age in [1, 60, 61, 2000] {
                        let result = evaluate(&stats(overall, games, recent, games), age);
                        assert!((0.0..=100.0).contains(&result.score), "{}", result.score);
                    }
                }
            }
        }
    }
}
