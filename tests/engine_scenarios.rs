use chess_risk::config::RiskSettings;
use chess_risk::domain::{
    validate_metrics, AccuracyStats, FormatStats, GamesCounts, HeadlineScore, NoScoreReason,
    PlayerMetrics, RecentGames, TimeClass,
};
use chess_risk::errors::RiskError;
use chess_risk::risk::{
    account_age_multiplier, calculate_risk_score, confidence_weight, score_player, win_rate_score,
    ConfidenceWeights, RiskLevel,
};
use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;

fn format_stats(overall: f64, overall_games: u32, recent: f64, recent_games: u32) -> FormatStats {
    let overall_wins = (overall / 100.0 * overall_games as f64).round() as u32;
    let recent_wins = (recent / 100.0 * recent_games as f64).round() as u32;
    FormatStats {
        current_rating: 1350,
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

fn player(formats: Vec<(TimeClass, FormatStats)>, account_age: u32) -> PlayerMetrics {
    PlayerMetrics {
        account_age,
        formats: formats.into_iter().collect::<BTreeMap<_, _>>(),
        username: "scenario".to_string(),
        timestamp: Utc.with_ymd_and_hms(2024, 2, 29, 18, 30, 0).unwrap(),
    }
}

#[test]
fn young_account_with_high_win_rates_is_capped_at_100() {
    let metrics = player(vec![(TimeClass::Blitz, format_stats(80.0, 20, 80.0, 20))], 30);

    let result = score_player(&metrics, &RiskSettings::default()).unwrap();
    let factors = result.max_score.factors.as_ref().unwrap();

    assert!((factors.overall_winrate.base_score - 200.0).abs() < 1e-9);
    assert_eq!(factors.overall_winrate.confidence, 0.5);
    assert!((factors.overall_winrate.score - 100.0).abs() < 1e-9);
    assert!((factors.recent_winrate.score - 100.0).abs() < 1e-9);
    assert_eq!(factors.high_accuracy.score, 0.0);
    assert!((factors.weighted_sum - 70.0).abs() < 1e-9);
    assert!((factors.before_cap - 105.0).abs() < 1e-9);

    assert_eq!(result.max_score.value, 100);
    assert_eq!(result.account_age_score, 1.5);
    assert_eq!(result.account_age_days, 30);
    assert_eq!(RiskLevel::from_score(result.max_score.value).unwrap(), RiskLevel::VeryHigh);
}

#[test]
fn all_formats_below_min_games_yield_sentinel() {
    let metrics = player(
        vec![
            (TimeClass::Bullet, format_stats(95.0, 500, 100.0, 3)),
            (TimeClass::Blitz, format_stats(90.0, 300, 100.0, 3)),
            (TimeClass::Rapid, format_stats(85.0, 100, 100.0, 3)),
        ],
        5,
    );

    let result = calculate_risk_score(&metrics, &RiskSettings::default());

    assert_eq!(result.max_score, HeadlineScore::no_rated_games());
    assert_eq!(result.max_score.value, 0);
    assert_eq!(result.max_score.format, None);
    assert_eq!(result.max_score.reason, Some(NoScoreReason::NoRatedGames));
    assert!(result.other_formats.is_empty());
}

#[test]
fn scoring_is_idempotent() {
    let metrics = player(
        vec![
            (TimeClass::Bullet, format_stats(58.0, 900, 62.0, 50)),
            (TimeClass::Blitz, format_stats(66.0, 140, 71.0, 35)),
            (TimeClass::Rapid, format_stats(51.0, 40, 49.0, 12)),
        ],
        75,
    );
    let settings = RiskSettings::default();

    let first = calculate_risk_score(&metrics, &settings);
    let second = calculate_risk_score(&metrics, &settings);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn other_formats_are_ordered_and_exclude_headline() {
    let metrics = player(
        vec![
            (TimeClass::Bullet, format_stats(58.0, 900, 62.0, 50)),
            (TimeClass::Blitz, format_stats(66.0, 140, 71.0, 35)),
            (TimeClass::Rapid, format_stats(51.0, 40, 49.0, 12)),
        ],
        400,
    );

    let result = calculate_risk_score(&metrics, &RiskSettings::default());

    assert_eq!(result.max_score.format, Some(TimeClass::Blitz));
    assert_eq!(result.other_formats.len(), 2);
    assert!(result.other_formats.iter().all(|r| r.format != TimeClass::Blitz));
    assert!(result.other_formats[0].score >= result.other_formats[1].score);
}

#[test]
fn win_rate_at_or_below_baseline_never_scores() {
    let settings = RiskSettings::default();
    for step in 0..=50 {
        let rate = step as f64 / 100.0;
        for games in [0, 1, 5, 20, 1000] {
            let mut weights = ConfidenceWeights::new(settings.confidence_k);
            assert_eq!(win_rate_score(rate, games, &settings.win_rate, &mut weights).score, 0.0);
        }
    }
}

#[test]
fn confidence_weight_is_monotonic_and_bounded() {
    assert_eq!(confidence_weight(0, 20.0), 0.0);
    let mut previous = 0.0;
    for n in 1..2000 {
        let weight = confidence_weight(n, 20.0);
        assert!(weight > previous);
        assert!(weight < 1.0);
        previous = weight;
    }
    assert!(confidence_weight(1_000_000, 20.0) > 0.9999);
}

#[test]
fn account_age_boundary_is_inclusive_at_sixty_days() {
    let settings = RiskSettings::default();
    assert_eq!(account_age_multiplier(59, &settings), 1.5);
    assert_eq!(account_age_multiplier(60, &settings), 1.5);
    assert_eq!(account_age_multiplier(61, &settings), 1.0);
}

#[test]
fn scores_stay_within_bounds_for_valid_input() {
    let settings = RiskSettings::default();
    for overall in [0.0, 50.0, 61.0, 75.0, 100.0] {
        for recent in [0.0, 55.0, 100.0] {
            for games in [5, 20, 400] {
                for age in [0, 60, 61, 3000] {
                    let metrics = player(vec![(TimeClass::Rapid, format_stats(overall, games, recent, games))], age);
                    let result = calculate_risk_score(&metrics, &settings);
                    assert!(result.max_score.value <= 100);
                    assert!(RiskLevel::from_score(result.max_score.value).is_ok());
                }
            }
        }
    }
}

#[test]
fn classifier_tier_boundaries() {
    let expected = [
        (30, RiskLevel::Low),
        (31, RiskLevel::Moderate),
        (50, RiskLevel::Moderate),
        (51, RiskLevel::High),
        (70, RiskLevel::High),
        (71, RiskLevel::VeryHigh),
    ];
    for (score, level) in expected {
        assert_eq!(RiskLevel::from_score(score).unwrap(), level);
    }
}

#[test]
fn malformed_metrics_are_rejected_with_every_issue() {
    let mut broken = format_stats(60.0, 50, 60.0, 10);
    broken.games_counts.wins = 49;
    broken.accuracy = AccuracyStats {
        games_with_accuracy: 2,
        high_accuracy_games: 3,
        high_accuracy_percentage: 150.0,
    };
    let mut metrics = player(vec![(TimeClass::Blitz, broken)], 10);
    metrics.username = String::new();

    let report = validate_metrics(&metrics);
    assert!(!report.is_valid());
    assert!(report.issues.len() >= 4, "{report}");

    match score_player(&metrics, &RiskSettings::default()) {
        Err(RiskError::InvalidInput(found)) => assert_eq!(found, report),
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn partial_config_changes_only_named_values() {
    let settings: RiskSettings = serde_json::from_str(r#"{"minGames": 3}"#).unwrap();
    assert_eq!(settings.min_games, 3);
    assert_eq!(settings.confidence_k, 20.0);

    let metrics = player(vec![(TimeClass::Blitz, format_stats(70.0, 40, 100.0, 3))], 400);
    let result = calculate_risk_score(&metrics, &settings);
    assert_eq!(result.max_score.format, Some(TimeClass::Blitz));
}
