use anyhow::{Context, Result};
use log::info;
use rusqlite::params;
use rusqlite::types::Type;

use super::connection::DbConn;
use super::models::HistoryEntry;
use crate::domain::TimeClass;
use crate::risk::RiskLevel;

/// Insert or refresh the entry for this username (case-insensitive), move it
/// to the front and keep only the `max_entries` most recent usernames
pub fn add_to_history(conn: &mut DbConn, entry: &HistoryEntry, max_entries: usize) -> Result<()> {
    let tx = conn.transaction().context("Failed to start history transaction")?;

    let sql = "INSERT INTO history (username_key, username, score, format, risk_level, analyzed_at, sequence)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, (SELECT COALESCE(MAX(sequence), 0) + 1 FROM history))
               ON CONFLICT(username_key) DO UPDATE SET
                   username = excluded.username,
                   score = excluded.score,
                   format = excluded.format,
                   risk_level = excluded.risk_level,
                   analyzed_at = excluded.analyzed_at,
                   sequence = excluded.sequence";
    tx.execute(
        sql,
        params![
            username_key(&entry.username),
            entry.username,
            entry.score,
            entry.format.map(|format| format.as_str()),
            entry.risk_level.as_str(),
            entry.timestamp,
        ],
    )
    .context("Failed to upsert history entry")?;

    let removed = tx
        .execute(
            "DELETE FROM history WHERE username_key NOT IN
                 (SELECT username_key FROM history ORDER BY sequence DESC LIMIT ?1)",
            params![max_entries as i64],
        )
        .context("Failed to trim history")?;

    tx.commit().context("Failed to commit history update")?;

    info!("Recorded {} in history (score {})", entry.username, entry.score);
    if removed > 0 {
        info!("Trimmed {} old history entries", removed);
    }
    Ok(())
}

/// Most recent first
pub fn list_history(conn: &mut DbConn, limit: usize) -> Result<Vec<HistoryEntry>> {
    let sql = "SELECT username, score, format, risk_level, analyzed_at
               FROM history ORDER BY sequence DESC LIMIT ?1";

    let mut stmt = conn.prepare(sql).context("Failed to prepare history query")?;
    let rows = stmt
        .query_map(params![limit as i64], parse_history_row)
        .context("Failed to query history")?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read history rows")
}

pub fn clear_history(conn: &mut DbConn) -> Result<usize> {
    let removed = conn
        .execute("DELETE FROM history", [])
        .context("Failed to clear history")?;
    info!("Cleared {} history entries", removed);
    Ok(removed)
}

fn username_key(username: &str) -> String {
    username.to_lowercase()
}

fn parse_history_row(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
    let format: Option<String> = row.get(2)?;
    let risk_level: String = row.get(3)?;

    Ok(HistoryEntry {
        username: row.get(0)?,
        score: row.get(1)?,
        format: format
            .map(|value| TimeClass::from_api(&value).ok_or_else(|| conversion_error(2, &value)))
            .transpose()?,
        risk_level: RiskLevel::parse(&risk_level).ok_or_else(|| conversion_error(3, &risk_level))?,
        timestamp: row.get(4)?,
    })
}

fn conversion_error(column: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        Type::Text,
        format!("unexpected value '{}'", value).into(),
    )
}
