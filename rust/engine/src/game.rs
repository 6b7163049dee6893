use serde::{Deserialize, Serialize};

/// Stage of a single blackjack round.
///
/// A round always starts in [`Phase::PlayerTurn`]. Standing, reaching 21 or
/// being dealt a natural moves it to [`Phase::DealerTurn`]; a player bust skips
/// the dealer entirely and goes straight to [`Phase::Resolved`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// The player is choosing between hit and stand
    PlayerTurn,
    /// The dealer draws to the stand threshold
    DealerTurn,
    /// Both hands are final and the outcome can be read
    Resolved,
}
