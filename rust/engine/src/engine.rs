use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::Phase;
use crate::hand::{Hand, BLACKJACK};
use crate::player::Decision;
use crate::rules::{determine_outcome, Outcome, TableRules};

/// One blackjack round: the deck, both hands and the turn state machine.
///
/// The round owns its deck for its whole lifetime. The player's hits and the
/// dealer's draws come from that same deck in sequence, so whatever the player
/// leaves behind is exactly what the dealer draws from.
///
/// # Examples
///
/// ```
/// use blackjack_engine::deck::Deck;
/// use blackjack_engine::engine::Round;
/// use blackjack_engine::game::Phase;
/// use blackjack_engine::rules::TableRules;
///
/// let mut round = Round::deal(Deck::shuffled(42), TableRules::default()).unwrap();
/// if round.phase() == Phase::PlayerTurn {
///     round.stand().unwrap();
/// }
/// if round.phase() == Phase::DealerTurn {
///     round.dealer_play().unwrap();
/// }
/// assert!(round.outcome().is_ok());
/// assert_eq!(round.deck_remaining(), 52 - round.player_hand().len() - round.dealer_hand().len());
/// ```
#[derive(Debug, Clone)]
pub struct Round {
    deck: Deck,
    player: Hand,
    dealer: Hand,
    phase: Phase,
    rules: TableRules,
}

impl Round {
    /// Deals two cards to the player and then two to the dealer.
    ///
    /// A dealt 21 leaves the player nothing to decide, so the round opens
    /// directly in [`Phase::DealerTurn`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DeckUnderflow`] if the deck holds fewer than four cards.
    pub fn deal(deck: Deck, rules: TableRules) -> Result<Self, GameError> {
        let mut round = Self {
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            phase: Phase::PlayerTurn,
            rules,
        };
        for _ in 0..2 {
            let card = round.deck.draw()?;
            round.player.push(card);
        }
        for _ in 0..2 {
            let card = round.deck.draw()?;
            round.dealer.push(card);
        }
        round.close_player_turn_if_final();
        Ok(round)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    // 21 hands the turn to the dealer, a bust skips the dealer.
    fn close_player_turn_if_final(&mut self) {
        let value = self.player.value();
        if value > BLACKJACK {
            self.phase = Phase::Resolved;
        } else if value == BLACKJACK {
            self.phase = Phase::DealerTurn;
        }
    }

    /// Draws one card into the player's hand.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::WrongPhase`] outside the player turn, or
    /// [`GameError::DeckUnderflow`] if the deck is exhausted.
    pub fn hit(&mut self) -> Result<Card, GameError> {
        self.ensure_phase(Phase::PlayerTurn)?;
        let card = self.deck.draw()?;
        self.player.push(card);
        self.close_player_turn_if_final();
        Ok(card)
    }

    /// Ends the player's turn.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::WrongPhase`] outside the player turn.
    pub fn stand(&mut self) -> Result<(), GameError> {
        self.ensure_phase(Phase::PlayerTurn)?;
        self.phase = Phase::DealerTurn;
        Ok(())
    }

    /// Applies a player decision. Returns the drawn card for a hit.
    ///
    /// # Errors
    ///
    /// Same as [`Round::hit`] and [`Round::stand`].
    pub fn apply(&mut self, decision: Decision) -> Result<Option<Card>, GameError> {
        match decision {
            Decision::Hit => self.hit().map(Some),
            Decision::Stand => self.stand().map(|()| None),
        }
    }

    /// Plays the dealer's hand: draws until the value reaches the stand
    /// threshold, then resolves the round. Returns the cards drawn.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::WrongPhase`] outside the dealer turn, or
    /// [`GameError::DeckUnderflow`] if the deck runs out mid-draw.
    pub fn dealer_play(&mut self) -> Result<Vec<Card>, GameError> {
        self.ensure_phase(Phase::DealerTurn)?;
        let mut drawn = Vec::new();
        while self.dealer.value() < self.rules.dealer_stands_on {
            let card = self.deck.draw()?;
            self.dealer.push(card);
            drawn.push(card);
        }
        self.phase = Phase::Resolved;
        Ok(drawn)
    }

    /// Final classification of the round.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::WrongPhase`] until the round is resolved.
    pub fn outcome(&self) -> Result<Outcome, GameError> {
        self.ensure_phase(Phase::Resolved)?;
        Ok(determine_outcome(self.player.value(), self.dealer.value()))
    }

    /// Runs the round to completion, asking `decide` for every player choice.
    ///
    /// # Errors
    ///
    /// Propagates any error from the individual steps.
    pub fn play_out<F>(&mut self, mut decide: F) -> Result<Outcome, GameError>
    where
        F: FnMut(&Hand) -> Decision,
    {
        while self.phase == Phase::PlayerTurn {
            let decision = decide(&self.player);
            self.apply(decision)?;
        }
        if self.phase == Phase::DealerTurn {
            self.dealer_play()?;
        }
        self.outcome()
    }
}
