use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::player::Player;

/// Snapshot of the bankroll written to the round log before a round is
/// played. The bet has already been deducted from `bank` at this point.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Bank after the stake was taken
    pub bank: u32,
    /// Consecutive wins going into the round
    pub streak: u32,
    /// Lifetime wins going into the round
    pub wins: u32,
    /// Lifetime losses going into the round
    pub loses: u32,
    /// Stake placed on the round
    pub bet: u32,
    /// Time the snapshot was taken (RFC3339 format)
    pub ts: String,
}

impl RoundRecord {
    pub fn snapshot(player: &Player) -> Self {
        Self::snapshot_at(player, Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn snapshot_at(player: &Player, ts: impl Into<String>) -> Self {
        Self {
            bank: player.bank(),
            streak: player.streak(),
            wins: player.wins(),
            loses: player.losses(),
            bet: player.bet(),
            ts: ts.into(),
        }
    }
}
