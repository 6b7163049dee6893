use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// An ordered sequence of cards dealt from the front.
///
/// Dealt cards are never handed out again: the deck only moves forward and
/// there is no reshuffle. One deck serves exactly one round.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// Builds a full 52-card deck shuffled by a ChaCha20 generator seeded
    /// with `seed`. The same seed always yields the same order.
    pub fn shuffled(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::shuffled_with(&mut rng)
    }

    /// Builds a full 52-card deck shuffled by the supplied random source.
    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = full_deck();
        cards.shuffle(rng);
        Self { cards, position: 0 }
    }

    /// Builds a deck that deals `cards` in the given order.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards, position: 0 }
    }

    /// Removes and returns the front card.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        let card = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(GameError::DeckUnderflow)?;
        self.position += 1;
        Ok(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
