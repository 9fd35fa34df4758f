use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use serde::Serialize;
use std::time::Duration;

use crate::api::ChessComClient;
use crate::cache::TtlCache;
use crate::config::settings::{AppConfig, RiskSettings};
use crate::database::{self, history, DbPool, HistoryEntry};
use crate::domain::{PlayerMetrics, RiskScoreResult};
use crate::errors::{history_context, with_fetch_context, RiskError};
use crate::metrics::{PlayerSnapshot, SampleOptions};
use crate::risk::{score_player, RiskLevel};

/// Score plus the tier it falls into
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub result: RiskScoreResult,
    pub level: RiskLevel,
}

/// Validate, score and classify a metrics document without any I/O
pub fn evaluate(metrics: &PlayerMetrics, settings: &RiskSettings) -> Result<Analysis, RiskError> {
    let result = score_player(metrics, settings)?;
    let level = RiskLevel::from_score_with_tiers(result.max_score.value, &settings.tiers)?;
    Ok(Analysis { result, level })
}

/// Fetch, score and record players
pub struct AnalysisService {
    config: AppConfig,
    client: ChessComClient,
    cache: TtlCache<PlayerSnapshot>,
    pool: DbPool,
}

impl AnalysisService {
    pub fn new(config: AppConfig, pool: DbPool) -> Result<Self> {
        let mut conn = database::get_connection(&pool)?;
        database::setup::initialize_database(&mut conn)?;

        Ok(Self {
            client: ChessComClient::new(&config.fetch)?,
            cache: TtlCache::new(Duration::from_secs(config.fetch.cache_ttl_secs)),
            config,
            pool,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Analyse a chess.com player and record the outcome in history
    pub async fn analyze(&self, username: &str, rated_only: bool) -> Result<Analysis> {
        self.client.check_username(username)?;
        let snapshot = self.load_snapshot(username).await?;

        let options = SampleOptions {
            recent_limit: self.config.fetch.recent_games_limit,
            rated_only,
        };
        let metrics = snapshot.to_metrics(Utc::now(), options, &self.config.risk.high_accuracy);

        let analysis = evaluate(&metrics, &self.config.risk)
            .with_context(|| format!("Failed to score player: {}", username))?;
        info!(
            "{} scored {} ({})",
            username,
            analysis.result.max_score.value,
            analysis.level.as_str()
        );

        self.record(&analysis)?;
        Ok(analysis)
    }

    pub fn history(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut conn = database::get_connection(&self.pool)?;
        history::list_history(&mut conn, limit.min(self.config.history.max_entries))
    }

    pub fn clear_history(&self) -> Result<usize> {
        let mut conn = database::get_connection(&self.pool)?;
        history::clear_history(&mut conn)
    }

    /// Drop cached snapshots older than the configured TTL
    pub fn purge_cache(&self) -> usize {
        let purged = self.cache.purge_expired();
        if purged > 0 {
            debug!("Evicted {} cached snapshots", purged);
        }
        purged
    }

    async fn load_snapshot(&self, username: &str) -> Result<PlayerSnapshot> {
        if let Some(snapshot) = self.cache.get(username) {
            debug!("Cache hit for {}", username);
            return Ok(snapshot);
        }

        let snapshot =
            with_fetch_context(self.client.fetch_snapshot(username).await, "player data", username)?;
        self.cache.insert(username, snapshot.clone());
        Ok(snapshot)
    }

    fn record(&self, analysis: &Analysis) -> Result<()> {
        let username = &analysis.result.username;
        let entry = HistoryEntry::from_result(&analysis.result, analysis.level);

        let mut conn = database::get_connection(&self.pool)?;
        history::add_to_history(&mut conn, &entry, self.config.history.max_entries)
            .with_context(|| history_context("record", username))
    }
}
