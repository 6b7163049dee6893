use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::hand::BLACKJACK;

/// Dealer keeps drawing while below this total.
pub const DEALER_STANDS_ON: u8 = 17;

/// Multiple of the stake returned on a win (stake plus equal winnings).
pub const WIN_PAYOUT: u32 = 2;

/// Multiple of the stake returned on a push.
pub const PUSH_PAYOUT: u32 = 1;

/// Classification of a finished round from the player's point of view.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player went over 21; the dealer's hand is irrelevant
    PlayerBust,
    /// Dealer busted or the player finished higher
    PlayerWins,
    /// Equal totals, stake returned
    Push,
    /// Dealer finished higher
    DealerWins,
}

/// Table policy values. The round state machine and the ledger read these
/// instead of hard-coding house rules.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableRules {
    /// Dealer stands once the hand value reaches this total (soft or hard)
    pub dealer_stands_on: u8,
    /// Stake multiple paid back on [`Outcome::PlayerWins`]
    pub win_payout: u32,
    /// Stake multiple paid back on [`Outcome::Push`]
    pub push_payout: u32,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            dealer_stands_on: DEALER_STANDS_ON,
            win_payout: WIN_PAYOUT,
            push_payout: PUSH_PAYOUT,
        }
    }
}

impl TableRules {
    /// Amount credited back to the bank for `outcome` on a stake of `bet`.
    pub fn payout(&self, outcome: Outcome, bet: u32) -> u32 {
        match outcome {
            Outcome::PlayerWins => bet.saturating_mul(self.win_payout),
            Outcome::Push => bet.saturating_mul(self.push_payout),
            Outcome::PlayerBust | Outcome::DealerWins => 0,
        }
    }
}

/// Classifies a round from the two final totals.
///
/// Precedence matters: a player bust is checked first and always loses, even
/// when the dealer busted as well. There is no double-bust push.
///
/// # Examples
///
/// ```
/// use blackjack_engine::rules::{determine_outcome, Outcome};
///
/// assert_eq!(determine_outcome(22, 17), Outcome::PlayerBust);
/// assert_eq!(determine_outcome(20, 22), Outcome::PlayerWins);
/// assert_eq!(determine_outcome(18, 18), Outcome::Push);
/// assert_eq!(determine_outcome(17, 19), Outcome::DealerWins);
/// ```
pub fn determine_outcome(player_total: u8, dealer_total: u8) -> Outcome {
    if player_total > BLACKJACK {
        Outcome::PlayerBust
    } else if dealer_total > BLACKJACK || player_total > dealer_total {
        Outcome::PlayerWins
    } else if player_total == dealer_total {
        Outcome::Push
    } else {
        Outcome::DealerWins
    }
}

/// Validates a stake against the player's bank.
///
/// Any amount from zero up to and including the bank is accepted.
///
/// # Errors
///
/// Returns [`GameError::InvalidBet`] when `amount` exceeds `bank`.
///
/// ```
/// use blackjack_engine::rules::validate_bet;
/// use blackjack_engine::errors::GameError;
///
/// assert_eq!(validate_bet(1000, 1000), Ok(1000));
/// assert_eq!(
///     validate_bet(1000, 1001),
///     Err(GameError::InvalidBet { amount: 1001, bank: 1000 })
/// );
/// ```
pub fn validate_bet(bank: u32, amount: u32) -> Result<u32, GameError> {
    if amount > bank {
        Err(GameError::InvalidBet { amount, bank })
    } else {
        Ok(amount)
    }
}
