//! Input parsing and validation for the interactive round.
//!
//! Bets and turn choices come in as raw lines from stdin; the functions here
//! turn them into engine values or a message the prompt can show the player.

use blackjack_engine::player::Decision;
use blackjack_engine::rules::validate_bet;

/// Result of parsing a line typed at the hit/stand prompt.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid decision
    Decision(Decision),
    /// Blank line, the prompt just waits for more input
    Empty,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse the hit/stand prompt input.
///
/// Accepts `h`/`hit` and `s`/`stand`, case-insensitive.
///
/// # Example
///
/// ```rust
/// # use blackjack_cli::validation::{parse_turn_choice, ParseResult};
/// use blackjack_engine::player::Decision;
///
/// assert_eq!(parse_turn_choice("H"), ParseResult::Decision(Decision::Hit));
/// assert_eq!(parse_turn_choice("s"), ParseResult::Decision(Decision::Stand));
/// assert_eq!(parse_turn_choice("   "), ParseResult::Empty);
/// assert!(matches!(parse_turn_choice("x"), ParseResult::Invalid(_)));
/// ```
pub fn parse_turn_choice(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "" => ParseResult::Empty,
        "h" | "hit" => ParseResult::Decision(Decision::Hit),
        "s" | "stand" => ParseResult::Decision(Decision::Stand),
        other => ParseResult::Invalid(format!(
            "Unrecognized choice '{}'. Enter h to hit or s to stand",
            other
        )),
    }
}

/// Parse a bet typed at the bet prompt and check it against the bank.
///
/// A zero bet is accepted. Negative amounts, amounts above the bank and
/// anything that is not a whole number are rejected with a message.
///
/// # Example
///
/// ```rust
/// # use blackjack_cli::validation::parse_bet;
/// assert_eq!(parse_bet("100", 1000), Ok(100));
/// assert_eq!(parse_bet("0", 1000), Ok(0));
/// assert!(parse_bet("1001", 1000).is_err());
/// assert!(parse_bet("-5", 1000).is_err());
/// assert!(parse_bet("ten", 1000).is_err());
/// ```
pub fn parse_bet(input: &str, bank: u32) -> Result<u32, String> {
    let input = input.trim();
    let amount: i64 = input
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", input))?;
    if amount < 0 {
        return Err("Bet cannot be negative".to_string());
    }
    let amount = u32::try_from(amount).map_err(|_| format!("Bet exceeds bank of {}", bank))?;
    validate_bet(bank, amount).map_err(|e| e.to_string())
}
