//! Bankroll state file.
//!
//! The file is a flat JSON object `{"bank": .., "win": .., "loses": .., "streak": ..}`.
//! It is read once when a round starts and written once when it ends.

use std::fs;
use std::path::Path;

use blackjack_engine::player::Player;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankrollState {
    pub bank: u32,
    #[serde(rename = "win", default)]
    pub wins: u32,
    #[serde(default)]
    pub loses: u32,
    #[serde(default)]
    pub streak: u32,
}

impl From<&Player> for BankrollState {
    fn from(player: &Player) -> Self {
        Self {
            bank: player.bank(),
            wins: player.wins(),
            loses: player.losses(),
            streak: player.streak(),
        }
    }
}

impl From<BankrollState> for Player {
    fn from(state: BankrollState) -> Self {
        Player::restore(state.bank, state.wins, state.loses, state.streak)
    }
}

/// Loads the player from `path`.
///
/// A missing, unreadable or malformed file is not an error: the player starts
/// over with `starting_bank` and zeroed counters.
pub fn load(path: &Path, starting_bank: u32) -> Player {
    match read_state(path) {
        Ok(state) => {
            debug!(path = %path.display(), bank = state.bank, "bankroll loaded");
            state.into()
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no usable bankroll, starting fresh");
            Player::new(starting_bank)
        }
    }
}

fn read_state(path: &Path) -> Result<BankrollState, CliError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| CliError::InvalidInput(format!("malformed bankroll file: {}", e)))
}

/// Writes the player's bank and counters to `path`, creating parent
/// directories as needed.
pub fn save(path: &Path, player: &Player) -> Result<(), CliError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string(&BankrollState::from(player)).map_err(std::io::Error::other)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack_engine::rules::{Outcome, TableRules};

    #[test]
    fn missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let player = load(&dir.path().join("money.json"), 1000);
        assert_eq!(player, Player::new(1000));
    }

    #[test]
    fn malformed_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(load(&path, 750).bank(), 750);
    }

    #[test]
    fn file_without_bank_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        fs::write(&path, r#"{"win": 3}"#).unwrap();
        assert_eq!(load(&path, 1000), Player::new(1000));
    }

    #[test]
    fn older_files_without_loses_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        fs::write(&path, r#"{"bank": 1200, "win": 4, "streak": 2}"#).unwrap();
        let player = load(&path, 1000);
        assert_eq!(player.bank(), 1200);
        assert_eq!(player.wins(), 4);
        assert_eq!(player.losses(), 0);
        assert_eq!(player.streak(), 2);
    }

    #[test]
    fn save_writes_all_four_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("money.json");

        let mut player = Player::new(1000);
        player.place_bet(100).unwrap();
        player.settle(Outcome::PlayerWins, &TableRules::default());
        save(&path, &player).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"bank": 1100, "win": 1, "loses": 0, "streak": 1})
        );
        assert_eq!(load(&path, 1000), Player::restore(1100, 1, 0, 1));
    }
}
