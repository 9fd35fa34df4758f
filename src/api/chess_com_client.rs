use crate::api::chess_com_models::{
    ArchivedGame, ArchivesResponse, MonthlyGamesResponse, ProfileResponse, StatsResponse,
};
use crate::backoff::RetryPolicy;
use crate::config::settings::FetchSettings;
use crate::domain::{GameRecord, TimeClass};
use crate::errors::{RiskError, UpstreamError};
use crate::http::RetryingClient;
use crate::metrics::PlayerSnapshot;
use anyhow::{Context, Result};
use futures::future;
use log::{debug, info};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use urlencoding::encode;

/// chess.com public API client
pub struct ChessComClient {
    client: RetryingClient,
    base_url: String,
    archive_months: usize,
    username_pattern: Regex,
}

impl ChessComClient {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let client = RetryingClient::new(
            &settings.user_agent,
            settings.timeout_secs,
            RetryPolicy::from_settings(settings),
        )?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            archive_months: settings.archive_months,
            username_pattern: Self::compile_username_pattern()?,
        })
    }

    /// Reject names chess.com could never have issued
    pub fn check_username(&self, username: &str) -> Result<(), RiskError> {
        if self.username_pattern.is_match(username) {
            Ok(())
        } else {
            Err(RiskError::InvalidUsername(username.to_string()))
        }
    }

    /// Fetch everything the engine needs about one player.
    ///
    /// Profile, stats and the archive list are requested concurrently.
    pub async fn fetch_snapshot(&self, username: &str) -> Result<PlayerSnapshot, UpstreamError> {
        info!("Fetching chess.com data for {}", username);

        let (profile, stats, archives) = tokio::try_join!(
            self.fetch_profile(username),
            self.fetch_stats(username),
            self.fetch_archives(username),
        )?;

        let games = self.fetch_recent_games(username, &archives.archives).await?;

        let formats = TimeClass::ALL
            .iter()
            .filter_map(|time_class| {
                stats
                    .format(*time_class)
                    .map(|payload| (*time_class, payload.to_record()))
            })
            .collect::<BTreeMap<_, _>>();

        info!(
            "Fetched {} formats and {} games for {}",
            formats.len(),
            games.len(),
            username
        );

        Ok(PlayerSnapshot {
            username: username.to_string(),
            joined: profile.joined,
            formats,
            games,
        })
    }

    pub async fn fetch_profile(&self, username: &str) -> Result<ProfileResponse, UpstreamError> {
        let url = self.build_player_url(username, "");
        self.get_player_json(username, &url).await
    }

    pub async fn fetch_stats(&self, username: &str) -> Result<StatsResponse, UpstreamError> {
        let url = self.build_player_url(username, "/stats");
        self.get_player_json(username, &url).await
    }

    pub async fn fetch_archives(&self, username: &str) -> Result<ArchivesResponse, UpstreamError> {
        let url = self.build_player_url(username, "/games/archives");
        self.get_player_json(username, &url).await
    }

    /// Games of the newest archive months, newest game first.
    ///
    /// Months are requested concurrently.
    async fn fetch_recent_games(
        &self,
        username: &str,
        archives: &[String],
    ) -> Result<Vec<GameRecord>, UpstreamError> {
        let months = Self::newest_archives(archives, self.archive_months).map(|url| {
            debug!("Reading archive {}", url);
            self.get_player_json::<MonthlyGamesResponse>(username, url)
        });

        let mut games: Vec<ArchivedGame> = future::try_join_all(months)
            .await?
            .into_iter()
            .flat_map(|month| month.games)
            .collect();

        games.sort_by(|a, b| b.end_time.cmp(&a.end_time));

        Ok(games
            .iter()
            .filter_map(|game| game.to_record(username))
            .collect())
    }

    async fn get_player_json<T: DeserializeOwned>(
        &self,
        username: &str,
        url: &str,
    ) -> Result<T, UpstreamError> {
        self.client
            .get_json(url)
            .await
            .map_err(|err| Self::not_found_as_player(err, username))
    }

    fn not_found_as_player(err: UpstreamError, username: &str) -> UpstreamError {
        match err {
            UpstreamError::Status { status: 404, .. } => {
                UpstreamError::PlayerNotFound(username.to_string())
            }
            other => other,
        }
    }

    fn compile_username_pattern() -> Result<Regex> {
        Regex::new(r"^[A-Za-z0-9_-]{3,25}$").context("Failed to compile username pattern")
    }

    fn newest_archives(archives: &[String], months: usize) -> impl Iterator<Item = &String> {
        archives.iter().rev().take(months)
    }

    fn build_player_url(&self, username: &str, suffix: &str) -> String {
        format!(
            "{}/player/{}{}",
            self.base_url,
            encode(&username.to_lowercase()),
            suffix
        )
    }
}
