//! # blackjack-engine: Blackjack Round Core
//!
//! A single-player blackjack engine with no I/O. It covers deck construction
//! and shuffling, hand evaluation with soft/hard aces, the player/dealer turn
//! state machine, outcome classification and the bankroll ledger.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Seedable, front-drawing deck with underflow checking
//! - [`hand`] - Hand value with ace reduction
//! - [`engine`] - The [`engine::Round`] state machine
//! - [`game`] - Round phases
//! - [`rules`] - Outcome resolver, bet validation and table policy
//! - [`player`] - Bankroll record and ledger updates
//! - [`logger`] - Round log snapshot type
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::deck::Deck;
//! use blackjack_engine::engine::Round;
//! use blackjack_engine::player::{Decision, Player};
//! use blackjack_engine::rules::TableRules;
//!
//! let rules = TableRules::default();
//! let mut player = Player::default();
//! player.place_bet(100).unwrap();
//! assert_eq!(player.bank(), 900);
//!
//! let mut round = Round::deal(Deck::shuffled(7), rules).unwrap();
//! let outcome = round
//!     .play_out(|hand| if hand.value() < 17 { Decision::Hit } else { Decision::Stand })
//!     .unwrap();
//! player.settle(outcome, &rules);
//! ```
//!
//! ## Deterministic Shuffles
//!
//! ```rust
//! use blackjack_engine::deck::Deck;
//!
//! let mut a = Deck::shuffled(42);
//! let mut b = Deck::shuffled(42);
//! assert_eq!(a.draw(), b.draw());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
