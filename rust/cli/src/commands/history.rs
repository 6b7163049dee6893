//! History command handler.
//!
//! Read-only view of the round log: the most recent rows, newest first.

use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::CliError;
use crate::round_log::RoundLog;

/// Handle the history command.
///
/// The database is opened read-only. A file that does not exist yet, or one
/// without a `results` table, is reported as an empty log and left as it is.
pub fn handle_history_command(
    config: &Config,
    limit: u32,
    database: Option<PathBuf>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let path = database.unwrap_or_else(|| PathBuf::from(&config.database_path));
    if !path.exists() {
        writeln!(out, "No rounds logged yet ({})", path.display())?;
        return Ok(());
    }

    let log = RoundLog::open_read_only(&path, config.retry_policy())?;
    if !log.has_results_table()? {
        writeln!(out, "No rounds logged yet ({})", path.display())?;
        return Ok(());
    }
    let total = log.count()?;
    let rows = log.recent(limit)?;
    if rows.is_empty() {
        writeln!(out, "No rounds logged yet ({})", path.display())?;
        return Ok(());
    }

    writeln!(
        out,
        "Round log {} (showing {} of {})",
        path.display(),
        rows.len(),
        total
    )?;
    for row in rows {
        let r = row.record;
        writeln!(
            out,
            "#{} {} bet={} bank={} wins={} loses={} streak={}",
            row.id, r.ts, r.bet, r.bank, r.wins, r.loses, r.streak
        )?;
    }
    Ok(())
}
