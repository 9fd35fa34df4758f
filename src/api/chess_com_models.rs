//! Payloads of the chess.com public API, trimmed to the fields read here.

use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;

use crate::domain::{map_result_code, GameRecord, LifetimeRecord, TimeClass};
use crate::metrics::FormatRecord;

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub joined: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsResponse {
    pub chess_bullet: Option<FormatStatsPayload>,
    pub chess_blitz: Option<FormatStatsPayload>,
    pub chess_rapid: Option<FormatStatsPayload>,
}

impl StatsResponse {
    pub fn format(&self, time_class: TimeClass) -> Option<&FormatStatsPayload> {
        match time_class {
            TimeClass::Bullet => self.chess_bullet.as_ref(),
            TimeClass::Blitz => self.chess_blitz.as_ref(),
            TimeClass::Rapid => self.chess_rapid.as_ref(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FormatStatsPayload {
    pub last: Option<RatingPayload>,
    pub record: Option<RecordPayload>,
}

impl FormatStatsPayload {
    pub fn to_record(&self) -> FormatRecord {
        FormatRecord {
            rating: self.last.as_ref().map(|last| last.rating).unwrap_or(0),
            record: self
                .record
                .as_ref()
                .map(|record| LifetimeRecord {
                    wins: record.win,
                    losses: record.loss,
                    draws: record.draw,
                })
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RatingPayload {
    pub rating: u32,
}

#[derive(Debug, Deserialize)]
pub struct RecordPayload {
    #[serde(default)]
    pub win: u32,
    #[serde(default)]
    pub loss: u32,
    #[serde(default)]
    pub draw: u32,
}

/// Monthly archive URLs, oldest first
#[derive(Debug, Deserialize)]
pub struct ArchivesResponse {
    pub archives: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyGamesResponse {
    #[serde(default)]
    pub games: Vec<ArchivedGame>,
}

#[derive(Debug, Deserialize)]
pub struct ArchivedGame {
    pub white: GameSide,
    pub black: GameSide,
    pub accuracies: Option<Accuracies>,
    pub time_class: String,
    #[serde(default)]
    pub rules: String,
    #[serde(default)]
    pub rated: bool,
    #[serde(default)]
    pub end_time: i64,
}

#[derive(Debug, Deserialize)]
pub struct GameSide {
    pub username: String,
    pub rating: u32,
    pub result: String,
}

#[derive(Debug, Deserialize)]
pub struct Accuracies {
    pub white: Option<f64>,
    pub black: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Colour {
    White,
    Black,
}

impl ArchivedGame {
    /// Resolve the game from `username`'s side.
    ///
    /// Variants, daily games, games the player is not in and unknown
    /// result codes yield `None`.
    pub fn to_record(&self, username: &str) -> Option<GameRecord> {
        if self.rules != "chess" {
            return None;
        }
        let time_class = TimeClass::from_api(&self.time_class)?;
        let colour = self.colour_of(username)?;
        let side = match colour {
            Colour::White => &self.white,
            Colour::Black => &self.black,
        };

        let Some(result) = map_result_code(&side.result) else {
            warn!("Skipping game with unknown result code '{}'", side.result);
            return None;
        };

        Some(GameRecord {
            result,
            time_class,
            player_rating: side.rating,
            accuracy: self.accuracy_of(colour),
            rated: self.rated,
        })
    }

    fn colour_of(&self, username: &str) -> Option<Colour> {
        if self.white.username.eq_ignore_ascii_case(username) {
            Some(Colour::White)
        } else if self.black.username.eq_ignore_ascii_case(username) {
            Some(Colour::Black)
        } else {
            None
        }
    }

    fn accuracy_of(&self, colour: Colour) -> Option<f64> {
        let accuracies = self.accuracies.as_ref()?;
        match colour {
            Colour::White => accuracies.white,
            Colour::Black => accuracies.black,
        }
    }
}
