use crate::model::{SignalMarker, StorageError};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{Connection, params};

/// Ledger of signal alerts already delivered, so a marker is announced once.
pub struct SqliteStorage {
    conn: Connection,
}

/// Stable delivery key for a marker of one instrument.
pub fn alert_key(symbol: &str, signal: &SignalMarker) -> String {
    format!("{}:{}:{}", symbol, signal.timestamp, signal.label)
}

/// Fixed-width UTC timestamps compare correctly as text.
fn ledger_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl SqliteStorage {
    /// Opens the database and creates the ledger table if needed.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        Self::init(Connection::open(db_path)?)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS notified (
                alert_key TEXT PRIMARY KEY,
                symbol TEXT NOT NULL,
                notified_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(Self { conn })
    }

    pub fn is_notified(&self, key: &str) -> Result<bool, StorageError> {
        let mut stmt = self.conn.prepare("SELECT 1 FROM notified WHERE alert_key = ?1")?;
        Ok(stmt.exists(params![key])?)
    }

    pub fn mark_notified(&self, key: &str, symbol: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO notified (alert_key, symbol, notified_at) VALUES (?1, ?2, ?3)",
            params![key, symbol, ledger_time(Utc::now())],
        )?;
        Ok(())
    }

    /// Deletes ledger rows older than `max_age`, returning how many were removed.
    pub fn prune_older_than(&self, max_age: Duration) -> Result<usize, StorageError> {
        let cutoff: DateTime<Utc> = Utc::now() - max_age;
        let removed = self.conn.execute(
            "DELETE FROM notified WHERE notified_at < ?1",
            params![ledger_time(cutoff)],
        )?;
        Ok(removed)
    }
}
