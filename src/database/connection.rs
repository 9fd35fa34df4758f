use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

/// `serve` and the CLI may write the same history file
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool over the history file, creating its directory if needed
pub fn create_pool(database_path: &str) -> Result<DbPool> {
    ensure_parent_dir(database_path)?;

    let manager = SqliteConnectionManager::file(database_path).with_init(configure_connection);
    build_pool(manager, None)
        .with_context(|| format!("Failed to open history database at {}", database_path))
}

/// Single-connection pool over a private in-memory database
pub fn create_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(configure_connection);
    build_pool(manager, Some(1))
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get().context("History database is unavailable")
}

fn configure_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)
}

fn ensure_parent_dir(database_path: &str) -> Result<()> {
    match Path::new(database_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display())),
        _ => Ok(()),
    }
}

fn build_pool(manager: SqliteConnectionManager, max_size: Option<u32>) -> Result<DbPool> {
    let mut builder = r2d2::Pool::builder();
    if let Some(size) = max_size {
        builder = builder.max_size(size);
    }
    builder
        .build(manager)
        .context("Failed to create history connection pool")
}
