use thiserror::Error;

use crate::game::Phase;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Deck underflow: no cards left to draw")]
    DeckUnderflow,
    #[error("Invalid bet amount: {amount}, bank: {bank}")]
    InvalidBet { amount: u32, bank: u32 },
    #[error("Operation not allowed during {actual:?} (expected {expected:?})")]
    WrongPhase { expected: Phase, actual: Phase },
}
