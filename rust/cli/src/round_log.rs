//! Append-only round log stored in SQLite.
//!
//! One row is written per round attempt, after the stake has been deducted and
//! before the cards are dealt. Game logic never reads it back; the `history`
//! command is the only reader.

use std::path::Path;
use std::time::Duration;

use blackjack_engine::logger::RoundRecord;
use rusqlite::{Connection, OpenFlags, params};
use tracing::{info, warn};

use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;

const CREATE_RESULTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bank INTEGER NOT NULL,
    streak INTEGER NOT NULL,
    wins INTEGER NOT NULL,
    loses INTEGER NOT NULL,
    bet INTEGER NOT NULL,
    ts TEXT NOT NULL
)";

/// How often, and how patiently, [`RoundLog::connect`] tries to reach the
/// database before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_millis(2000),
        }
    }
}

/// A row read back from the `results` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRound {
    pub id: i64,
    pub record: RoundRecord,
}

#[derive(Debug)]
pub struct RoundLog {
    conn: Connection,
}

enum AttemptError {
    Unreachable(String),
    Fatal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    ReadWrite,
    ReadOnly,
}

impl RoundLog {
    /// Opens the database, checks it answers a query and makes sure the
    /// `results` table exists.
    ///
    /// Open and ping failures are retried according to `policy`, sleeping
    /// `policy.delay` between attempts. A failure to create the table is not
    /// retried.
    pub fn connect(path: &Path, policy: RetryPolicy) -> Result<Self, CliError> {
        Self::open_with_retry(path, policy, Access::ReadWrite)
    }

    /// Opens an existing database without write access. The schema is left
    /// untouched; use [`RoundLog::has_results_table`] before reading rows.
    pub fn open_read_only(path: &Path, policy: RetryPolicy) -> Result<Self, CliError> {
        Self::open_with_retry(path, policy, Access::ReadOnly)
    }

    fn open_with_retry(
        path: &Path,
        policy: RetryPolicy,
        access: Access,
    ) -> Result<Self, CliError> {
        if policy.max_attempts == 0 {
            return Err(CliError::Config(
                "database max attempts must be >= 1".to_string(),
            ));
        }

        let mut last_error = String::new();
        for attempt in 1..=policy.max_attempts {
            match Self::connect_attempt(path, access) {
                Ok(log) => {
                    info!(path = %path.display(), attempt, ?access, "round log connected");
                    return Ok(log);
                }
                Err(AttemptError::Fatal(msg)) => return Err(CliError::Database(msg)),
                Err(AttemptError::Unreachable(msg)) => {
                    warn!(
                        path = %path.display(),
                        attempt,
                        max_attempts = policy.max_attempts,
                        error = %msg,
                        "round log connection failed"
                    );
                    last_error = msg;
                    if attempt < policy.max_attempts {
                        std::thread::sleep(policy.delay);
                    }
                }
            }
        }

        Err(CliError::Database(format!(
            "{} unreachable after {} attempt(s): {}",
            path.display(),
            policy.max_attempts,
            last_error
        )))
    }

    fn connect_attempt(path: &Path, access: Access) -> Result<Self, AttemptError> {
        let conn = match access {
            Access::ReadWrite => {
                ensure_parent_dir(path).map_err(|e| {
                    AttemptError::Unreachable(format!("create parent directory: {}", e))
                })?;
                Connection::open(path)
            }
            Access::ReadOnly => {
                Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            }
        }
        .map_err(|e| AttemptError::Unreachable(format!("open: {}", e)))?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|e| AttemptError::Unreachable(format!("ping: {}", e)))?;

        let log = Self { conn };
        if access == Access::ReadWrite {
            log.ensure_schema().map_err(|e| {
                AttemptError::Fatal(format!("Failed to create results table: {}", e))
            })?;
        }
        Ok(log)
    }

    /// Opens a throwaway in-memory log.
    pub fn in_memory() -> Result<Self, CliError> {
        let log = Self {
            conn: Connection::open_in_memory()?,
        };
        log.ensure_schema()?;
        Ok(log)
    }

    fn ensure_schema(&self) -> rusqlite::Result<()> {
        self.conn.execute(CREATE_RESULTS_TABLE, [])?;
        Ok(())
    }

    pub fn has_results_table(&self) -> rusqlite::Result<bool> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'results'",
            [],
            |row| row.get(0),
        )?;
        Ok(n > 0)
    }

    /// Inserts one snapshot and returns its row id.
    pub fn append(&self, record: &RoundRecord) -> rusqlite::Result<i64> {
        self.conn.execute(
            "INSERT INTO results (bank, streak, wins, loses, bet, ts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.bank,
                record.streak,
                record.wins,
                record.loses,
                record.bet,
                record.ts
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent rows first.
    pub fn recent(&self, limit: u32) -> rusqlite::Result<Vec<LoggedRound>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, bank, streak, wins, loses, bet, ts
             FROM results ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit], |row| {
            Ok(LoggedRound {
                id: row.get(0)?,
                record: RoundRecord {
                    bank: row.get(1)?,
                    streak: row.get(2)?,
                    wins: row.get(3)?,
                    loses: row.get(4)?,
                    bet: row.get(5)?,
                    ts: row.get(6)?,
                },
            })
        })?;
        rows.collect()
    }

    pub fn count(&self) -> rusqlite::Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM results", [], |row| row.get(0))?;
        Ok(n.max(0) as usize)
    }
}
