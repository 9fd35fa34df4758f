use anyhow::{Context, Result};
use log::{debug, info};

use super::connection::DbConn;

const SCHEMA: &str = include_str!("schema.sql");

/// Bumped whenever `schema.sql` changes shape
const SCHEMA_VERSION: i64 = 1;

/// Bring the history schema up to date; a no-op once it is current
pub fn initialize_database(conn: &mut DbConn) -> Result<()> {
    let version = schema_version(conn)?;
    if version >= SCHEMA_VERSION {
        debug!("History schema already at version {}", version);
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("Failed to start schema transaction")?;
    for (idx, statement) in schema_statements(SCHEMA).enumerate() {
        tx.execute(statement, [])
            .with_context(|| format!("Failed to apply schema statement {}", idx + 1))?;
    }
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)
        .context("Failed to record schema version")?;
    tx.commit().context("Failed to commit history schema")?;

    info!("History schema created (version {})", SCHEMA_VERSION);
    Ok(())
}

fn schema_version(conn: &DbConn) -> Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .context("Failed to read history schema version")
}

fn schema_statements(sql: &str) -> impl Iterator<Item = &str> {
    sql.split(';').map(str::trim).filter(|s| !s.is_empty())
}
