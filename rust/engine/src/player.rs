use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::rules::{validate_bet, Outcome, TableRules};

/// A player's choice during their turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    /// Take another card
    Hit,
    /// Keep the current hand
    Stand,
}

/// Bank a player starts with when no saved state exists.
pub const STARTING_BANK: u32 = 1000;

/// The player's running bankroll and record.
///
/// The stake is taken out of `bank` by [`Player::place_bet`] before the round
/// is dealt; [`Player::settle`] then credits any payout and updates the
/// counters exactly once per round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Currency units available to bet
    bank: u32,
    /// Stake for the current round (already deducted from `bank`)
    bet: u32,
    /// Rounds won over the player's lifetime
    wins: u32,
    /// Rounds lost over the player's lifetime
    losses: u32,
    /// Consecutive rounds won
    streak: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(STARTING_BANK)
    }
}

impl Player {
    pub fn new(bank: u32) -> Self {
        Self {
            bank,
            bet: 0,
            wins: 0,
            losses: 0,
            streak: 0,
        }
    }

    /// Restores a player from persisted counters.
    pub fn restore(bank: u32, wins: u32, losses: u32, streak: u32) -> Self {
        Self {
            bank,
            bet: 0,
            wins,
            losses,
            streak,
        }
    }

    pub fn bank(&self) -> u32 {
        self.bank
    }
    pub fn bet(&self) -> u32 {
        self.bet
    }
    pub fn wins(&self) -> u32 {
        self.wins
    }
    pub fn losses(&self) -> u32 {
        self.losses
    }
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Records the stake for this round and deducts it from the bank.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidBet`] if `amount` exceeds the bank; the
    /// player is left untouched in that case.
    pub fn place_bet(&mut self, amount: u32) -> Result<(), GameError> {
        let amount = validate_bet(self.bank, amount)?;
        self.bank -= amount;
        self.bet = amount;
        Ok(())
    }

    /// Applies a round outcome to the bankroll.
    ///
    /// | Outcome      | Bank             | Streak | Wins | Losses |
    /// |--------------|------------------|--------|------|--------|
    /// | `PlayerWins` | + win payout     | +1     | +1   |        |
    /// | `Push`       | + stake          |        |      |        |
    /// | `PlayerBust` |                  | 0      |      | +1     |
    /// | `DealerWins` |                  | 0      |      | +1     |
    pub fn settle(&mut self, outcome: Outcome, rules: &TableRules) {
        self.bank = self.bank.saturating_add(rules.payout(outcome, self.bet));
        match outcome {
            Outcome::PlayerWins => {
                self.streak = self.streak.saturating_add(1);
                self.wins = self.wins.saturating_add(1);
            }
            Outcome::Push => {}
            Outcome::PlayerBust | Outcome::DealerWins => {
                self.streak = 0;
                self.losses = self.losses.saturating_add(1);
            }
        }
    }
}
