//! Card, hand and result formatters for terminal display.
//!
//! Cards are written out in words ("Queen of Spades") so the transcript reads
//! the same on any terminal.
//!
//! ## Example
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_cli::formatters::format_card;
//!
//! assert_eq!(format_card(&Card::new(Suit::Spades, Rank::Queen)), "Queen of Spades");
//! assert_eq!(format_card(&Card::new(Suit::Hearts, Rank::Seven)), "7 of Hearts");
//! ```

use blackjack_engine::cards::Card;
use blackjack_engine::hand::Hand;
use blackjack_engine::rules::Outcome;

pub fn format_card(card: &Card) -> String {
    format!("{} of {}", card.rank.name(), card.suit.name())
}

/// One line per card, indented, as shown under "Your hand:".
pub fn format_hand(hand: &Hand) -> String {
    hand.cards()
        .iter()
        .map(|c| format!("  {}", format_card(c)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Hand value, with a "soft" marker while an Ace is still counted as 11.
pub fn format_total(hand: &Hand) -> String {
    if hand.is_soft() {
        format!("{} (soft)", hand.value())
    } else {
        hand.value().to_string()
    }
}

pub fn format_outcome(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::PlayerBust => "Bust! Dealer wins.",
        Outcome::PlayerWins => "You win!",
        Outcome::Push => "Push!",
        Outcome::DealerWins => "Dealer wins!",
    }
}
