use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Time-control category tracked independently by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeClass {
    Bullet,
    Blitz,
    Rapid,
}

impl TimeClass {
    pub const ALL: [TimeClass; 3] = [TimeClass::Bullet, TimeClass::Blitz, TimeClass::Rapid];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeClass::Bullet => "bullet",
            TimeClass::Blitz => "blitz",
            TimeClass::Rapid => "rapid",
        }
    }

    /// Parse the `time_class` field of an upstream game. `daily` and
    /// anything else is not a scored format.
    pub fn from_api(value: &str) -> Option<Self> {
        match value {
            "bullet" => Some(TimeClass::Bullet),
            "blitz" => Some(TimeClass::Blitz),
            "rapid" => Some(TimeClass::Rapid),
            _ => None,
        }
    }

    /// Key of this format in the upstream stats document
    pub fn stats_key(&self) -> &'static str {
        match self {
            TimeClass::Bullet => "chess_bullet",
            TimeClass::Blitz => "chess_blitz",
            TimeClass::Rapid => "chess_rapid",
        }
    }
}

impl fmt::Display for TimeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical outcome of a game from the analysed player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

/// One finished game, already resolved to the analysed player's side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub result: GameOutcome,
    pub time_class: TimeClass,
    pub player_rating: u32,
    pub accuracy: Option<f64>,
    pub rated: bool,
}

/// Lifetime win/loss/draw counters for one format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl LifetimeRecord {
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamesCounts {
    pub total: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentGames {
    pub total: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Percentage, 0-100
    pub winrate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyStats {
    pub games_with_accuracy: u32,
    pub high_accuracy_games: u32,
    /// Percentage of accuracy-bearing games flagged as high accuracy, 0-100
    pub high_accuracy_percentage: f64,
}

/// Normalized statistics for a single format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatStats {
    pub current_rating: u32,
    /// Percentage, 0-100
    pub overall_winrate: f64,
    pub games_counts: GamesCounts,
    pub recent_games: RecentGames,
    pub accuracy: AccuracyStats,
}

/// Input of the risk engine, built fresh for every analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetrics {
    /// Days since account creation
    pub account_age: u32,
    pub formats: BTreeMap<TimeClass, FormatStats>,
    pub username: String,
    pub timestamp: DateTime<Utc>,
}
