use crate::cards::{Card, Rank};

/// Highest total a hand can hold without busting.
pub const BLACKJACK: u8 = 21;

/// Base blackjack value of a single card. Aces start at 11 and are reduced
/// to 1 by [`hand_value`] when the hand would otherwise bust.
pub fn card_value(card: Card) -> u8 {
    match card.rank {
        Rank::Two => 2,
        Rank::Three => 3,
        Rank::Four => 4,
        Rank::Five => 5,
        Rank::Six => 6,
        Rank::Seven => 7,
        Rank::Eight => 8,
        Rank::Nine => 9,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        Rank::Ace => 11,
    }
}

// (total, aces still counted as 11)
fn evaluate(cards: &[Card]) -> (u8, u8) {
    let mut total: u8 = 0;
    let mut soft_aces: u8 = 0;
    for &card in cards {
        if card.rank == Rank::Ace {
            soft_aces += 1;
        }
        total = total.saturating_add(card_value(card));
    }
    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    (total, soft_aces)
}

/// Best total for a set of cards under soft/hard ace counting.
///
/// Each Ace counts 11 unless that would push the total past 21, in which case
/// it drops to 1. Reductions happen one Ace at a time and stop as soon as the
/// total is back at or below 21, so the result is independent of card order.
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::hand_value;
///
/// let aces = [Card::new(Suit::Hearts, Rank::Ace), Card::new(Suit::Spades, Rank::Ace)];
/// assert_eq!(hand_value(&aces), 12);
/// ```
pub fn hand_value(cards: &[Card]) -> u8 {
    evaluate(cards).0
}

/// Whether at least one Ace in `cards` is still counted as 11.
pub fn is_soft(cards: &[Card]) -> bool {
    evaluate(cards).1 > 0
}

/// Cards held by one participant. Hands only grow during a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// First card dealt; for the dealer this is the card shown face up.
    pub fn up_card(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn last(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}
