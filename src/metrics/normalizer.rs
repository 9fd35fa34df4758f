use crate::config::settings::HighAccuracyRule;
use crate::domain::{
    AccuracyStats, FormatStats, GameOutcome, GameRecord, GamesCounts, LifetimeRecord, RecentGames,
    TimeClass,
};

/// Win rate as a percentage, 0 when no games were played
pub fn win_rate(wins: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    wins as f64 / total as f64 * 100.0
}

/// Keep the newest `limit` games of one format.
///
/// `games` must be ordered newest first.
pub fn select_recent(
    games: &[GameRecord],
    time_class: TimeClass,
    rated_only: bool,
    limit: usize,
) -> Vec<GameRecord> {
    games
        .iter()
        .filter(|game| game.time_class == time_class)
        .filter(|game| !rated_only || game.rated)
        .take(limit)
        .cloned()
        .collect()
}

/// Build the stats of one format from its lifetime counters and an
/// already-filtered recent sample
pub fn normalize_format(
    lifetime: &LifetimeRecord,
    current_rating: u32,
    recent: &[GameRecord],
    rule: &HighAccuracyRule,
) -> FormatStats {
    let total = lifetime.total();

    FormatStats {
        current_rating,
        overall_winrate: win_rate(lifetime.wins, total),
        games_counts: GamesCounts {
            total,
            wins: lifetime.wins,
            losses: lifetime.losses,
            draws: lifetime.draws,
        },
        recent_games: summarize_recent(recent),
        accuracy: summarize_accuracy(recent, rule),
    }
}

fn summarize_recent(recent: &[GameRecord]) -> RecentGames {
    let mut summary = RecentGames::default();
    for game in recent {
        match game.result {
            GameOutcome::Win => summary.wins += 1,
            GameOutcome::Loss => summary.losses += 1,
            GameOutcome::Draw => summary.draws += 1,
        }
    }
    summary.total = summary.wins + summary.losses + summary.draws;
    summary.winrate = win_rate(summary.wins, summary.total);
    summary
}

fn summarize_accuracy(recent: &[GameRecord], rule: &HighAccuracyRule) -> AccuracyStats {
    let mut stats = AccuracyStats::default();

    for game in recent {
        let Some(accuracy) = game.accuracy.filter(|value| value.is_finite()) else {
            continue;
        };
        stats.games_with_accuracy += 1;
        if is_high_accuracy(accuracy, game.player_rating, rule) {
            stats.high_accuracy_games += 1;
        }
    }

    stats.high_accuracy_percentage = if stats.games_with_accuracy == 0 {
        0.0
    } else {
        stats.high_accuracy_games as f64 / stats.games_with_accuracy as f64 * 100.0
    };
    stats
}

fn is_high_accuracy(accuracy: f64, rating: u32, rule: &HighAccuracyRule) -> bool {
    accuracy >= rule.required_accuracy(rating)
}
