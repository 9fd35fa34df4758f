use chrono::{DateTime, Utc};
use log::debug;
use std::collections::BTreeMap;

use super::normalizer::{normalize_format, select_recent};
use crate::config::settings::HighAccuracyRule;
use crate::domain::{GameRecord, LifetimeRecord, PlayerMetrics, TimeClass};

/// Current rating and lifetime record of one format
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormatRecord {
    pub rating: u32,
    pub record: LifetimeRecord,
}

/// Consolidated upstream payload for one player, fanned in from the
/// profile, stats and game archive fetches
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub username: String,
    pub joined: DateTime<Utc>,
    /// Only formats the player has a record in
    pub formats: BTreeMap<TimeClass, FormatRecord>,
    /// Newest first
    pub games: Vec<GameRecord>,
}

#[derive(Debug, Clone, Copy)]
pub struct SampleOptions {
    pub recent_limit: usize,
    pub rated_only: bool,
}

impl PlayerSnapshot {
    pub fn account_age_days(&self, now: DateTime<Utc>) -> u32 {
        let days = (now - self.joined).num_days();
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }

    /// Build the engine input as of `now`
    pub fn to_metrics(
        &self,
        now: DateTime<Utc>,
        options: SampleOptions,
        rule: &HighAccuracyRule,
    ) -> PlayerMetrics {
        let formats = self
            .formats
            .iter()
            .map(|(time_class, format)| {
                let recent =
                    select_recent(&self.games, *time_class, options.rated_only, options.recent_limit);
                debug!(
                    "{} {}: {} recent games sampled",
                    self.username,
                    time_class,
                    recent.len()
                );
                (
                    *time_class,
                    normalize_format(&format.record, format.rating, &recent, rule),
                )
            })
            .collect();

        PlayerMetrics {
            account_age: self.account_age_days(now),
            formats,
            username: self.username.clone(),
            timestamp: now,
        }
    }
}
