//! # Play Command
//!
//! One interactive round of blackjack against the dealer.
//!
//! The command connects to the round log, loads the bankroll, asks for a bet,
//! plays the round through [`Round`] and writes the bankroll back. Persistence
//! failures after the database connection is up are reported as warnings; the
//! round is never rolled back.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use blackjack_engine::deck::Deck;
use blackjack_engine::engine::Round;
use blackjack_engine::game::Phase;
use blackjack_engine::logger::RoundRecord;
use blackjack_engine::player::{Decision, Player};
use blackjack_engine::rules::TableRules;
use tracing::{info, warn};

use crate::bankroll;
use crate::cli::PlayArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_card, format_hand, format_outcome, format_total};
use crate::io_utils::read_stdin_line;
use crate::round_log::RoundLog;
use crate::ui;
use crate::validation::{ParseResult, parse_bet, parse_turn_choice};

/// Where a round reads its rules from and writes its results to.
pub struct Table<'a> {
    pub rules: TableRules,
    pub round_log: &'a RoundLog,
    pub bankroll_path: &'a Path,
}

/// Handle the play command.
///
/// Command-line flags win over the resolved configuration. Without a seed
/// from either, a random one is drawn and printed so the round can be
/// replayed.
///
/// # Errors
///
/// * `CliError::Database` if the round log cannot be reached or prepared
/// * `CliError::Interrupted` if stdin closes before a bet is placed
/// * `CliError::Io` if reading stdin or writing to `out` fails
pub fn handle_play_command(
    config: &Config,
    args: PlayArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    let bankroll_path = args
        .bankroll
        .unwrap_or_else(|| PathBuf::from(&config.bankroll_path));
    let database_path = args
        .database
        .unwrap_or_else(|| PathBuf::from(&config.database_path));

    let round_log = RoundLog::connect(&database_path, config.retry_policy())?;
    let player = bankroll::load(&bankroll_path, config.starting_bank);
    info!(seed, bank = player.bank(), "starting round");

    writeln!(out, "seed={}", seed)?;
    let table = Table {
        rules: config.table_rules(),
        round_log: &round_log,
        bankroll_path: &bankroll_path,
    };
    play_round(&table, player, Deck::shuffled(seed), stdin, out, err)?;
    Ok(())
}

/// Plays one round from the bet prompt to the saved bankroll and returns the
/// settled player.
pub fn play_round(
    table: &Table<'_>,
    mut player: Player,
    deck: Deck,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Player, CliError> {
    writeln!(out, "Bank: {}", player.bank())?;
    let bet = prompt_bet(player.bank(), stdin, out, err)?;
    player.place_bet(bet)?;

    let record = RoundRecord::snapshot(&player);
    match table.round_log.append(&record) {
        Ok(id) => info!(id, bet, bank = record.bank, "round logged"),
        Err(e) => {
            warn!(error = %e, "failed to append round log entry");
            ui::display_warning(err, &format!("Round was not logged: {}", e))?;
        }
    }

    let mut round = Round::deal(deck, table.rules)?;
    writeln!(out, "Your hand:")?;
    writeln!(out, "{}", format_hand(round.player_hand()))?;
    writeln!(out, "Total: {}", format_total(round.player_hand()))?;
    if let Some(up) = round.dealer_hand().up_card() {
        writeln!(out, "Dealer shows: {}", format_card(&up))?;
    }

    player_turn(&mut round, stdin, out, err)?;

    if round.phase() == Phase::DealerTurn {
        writeln!(out, "Dealer hand:")?;
        writeln!(out, "{}", format_hand(round.dealer_hand()))?;
        for card in round.dealer_play()? {
            writeln!(out, "Dealer draws: {}", format_card(&card))?;
        }
        writeln!(out, "Dealer total: {}", round.dealer_hand().value())?;
    }

    let outcome = round.outcome()?;
    writeln!(out, "{}", format_outcome(outcome))?;
    player.settle(outcome, &table.rules);
    info!(?outcome, bank = player.bank(), streak = player.streak(), "round settled");

    if let Err(e) = bankroll::save(table.bankroll_path, &player) {
        warn!(path = %table.bankroll_path.display(), error = %e, "failed to save bankroll");
        ui::display_warning(err, &format!("Bankroll was not saved: {}", e))?;
    }

    writeln!(out, "Your new bank: {}", player.bank())?;
    Ok(player)
}

fn prompt_bet(
    bank: u32,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<u32, CliError> {
    write!(out, "Your bet: ")?;
    out.flush()?;
    loop {
        let Some(line) = read_stdin_line(stdin)? else {
            writeln!(out)?;
            return Err(CliError::Interrupted(
                "input closed before a bet was placed".to_string(),
            ));
        };
        if line.is_empty() {
            continue;
        }
        match parse_bet(&line, bank) {
            Ok(bet) => return Ok(bet),
            Err(msg) => {
                ui::write_error(err, &msg)?;
                write!(out, "Your bet: ")?;
                out.flush()?;
            }
        }
    }
}

// Closed input stands; the bet is already on the table.
fn player_turn(
    round: &mut Round,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    while round.phase() == Phase::PlayerTurn {
        write!(out, "Hit (h) or stand (s)? ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin)? else {
            writeln!(out)?;
            info!("input closed during player turn, standing");
            round.stand()?;
            break;
        };
        match parse_turn_choice(&line) {
            ParseResult::Decision(Decision::Hit) => {
                let card = round.hit()?;
                writeln!(out, "New card: {}", format_card(&card))?;
                writeln!(out, "Total: {}", format_total(round.player_hand()))?;
            }
            ParseResult::Decision(Decision::Stand) => round.stand()?,
            ParseResult::Empty => {}
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::capture;
    use blackjack_engine::cards::{Card, Rank, Suit};
    use std::io::Cursor;
    use tracing::Level;

    fn c(rank: Rank) -> Card {
        Card::new(Suit::Hearts, rank)
    }

    // Player gets the first two cards, the dealer the next two, then draws follow.
    fn stacked(cards: &[Rank]) -> Deck {
        Deck::from_cards(cards.iter().map(|&r| c(r)).collect())
    }

    struct Run {
        result: Result<Player, CliError>,
        out: String,
        err: String,
        rows: usize,
    }

    fn run_round(
        player: Player,
        deck: Deck,
        input: impl AsRef<[u8]>,
        bankroll_path: &Path,
    ) -> Run {
        let round_log = RoundLog::in_memory().unwrap();
        let table = Table {
            rules: TableRules::default(),
            round_log: &round_log,
            bankroll_path,
        };
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_ref().to_vec());
        let result = play_round(&table, player, deck, &mut stdin, &mut out, &mut err);
        Run {
            result,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
            rows: round_log.count().unwrap(),
        }
    }

    #[test]
    fn stand_and_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        // Player 10+9=19, dealer 10+7=17 stands.
        let deck = stacked(&[Rank::Ten, Rank::Nine, Rank::King, Rank::Seven]);
        let run = run_round(Player::new(1000), deck, "100\ns\n", &path);

        let player = run.result.unwrap();
        assert_eq!(player.bank(), 1100);
        assert_eq!(player.wins(), 1);
        assert_eq!(player.streak(), 1);
        assert!(run.out.contains("Dealer shows: King of Hearts"));
        assert!(run.out.contains("You win!"));
        assert!(run.out.contains("Your new bank: 1100"));
        assert_eq!(run.rows, 1);
        assert_eq!(bankroll::load(&path, 1000).bank(), 1100);
    }

    #[test]
    fn hit_into_bust_skips_dealer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        // Player 10+6=16, dealer 10+7, hit draws a King.
        let deck = stacked(&[Rank::Ten, Rank::Six, Rank::Ten, Rank::Seven, Rank::King]);
        let run = run_round(Player::new(1000), deck, "50\nh\n", &path);

        let player = run.result.unwrap();
        assert_eq!(player.bank(), 950);
        assert_eq!(player.losses(), 1);
        assert!(run.out.contains("New card: King of Hearts"));
        assert!(run.out.contains("Total: 26"));
        assert!(run.out.contains("Bust! Dealer wins."));
        assert!(!run.out.contains("Dealer hand:"));
    }

    #[test]
    fn dealer_draws_are_echoed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        // Player 10+8=18, dealer 10+2 draws 3 then 5 to reach 20.
        let deck = stacked(&[
            Rank::Ten,
            Rank::Eight,
            Rank::Ten,
            Rank::Two,
            Rank::Three,
            Rank::Five,
        ]);
        let run = run_round(Player::new(1000), deck, "10\ns\n", &path);

        assert_eq!(run.result.unwrap().bank(), 990);
        assert!(run.out.contains("Dealer draws: 3 of Hearts"));
        assert!(run.out.contains("Dealer draws: 5 of Hearts"));
        assert!(run.out.contains("Dealer total: 20"));
        assert!(run.out.contains("Dealer wins!"));
    }

    #[test]
    fn invalid_bets_are_reprompted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        let deck = stacked(&[Rank::Ten, Rank::Nine, Rank::Ten, Rank::Nine]);
        let run = run_round(Player::new(100), deck, "abc\n-5\n500\n\n100\ns\n", &path);

        let player = run.result.unwrap();
        assert_eq!(player.bank(), 100);
        assert!(run.out.contains("Push!"));
        assert_eq!(run.err.matches("Error:").count(), 3);
        assert_eq!(run.rows, 1);
    }

    #[test]
    fn unknown_turn_input_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        let deck = stacked(&[Rank::Ten, Rank::Nine, Rank::King, Rank::Seven]);
        let run = run_round(Player::new(1000), deck, "100\nx\n\nS\n", &path);

        assert_eq!(run.result.unwrap().bank(), 1100);
        assert!(run.err.contains("Unrecognized choice 'x'"));
        assert!(!run.out.contains("New card"));
    }

    #[test]
    fn garbled_turn_input_is_reprompted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        // Player 10+5=15 hits a 5 to 20, dealer 10+7=17.
        let deck = stacked(&[Rank::Ten, Rank::Five, Rank::King, Rank::Seven, Rank::Five]);
        let run = run_round(Player::new(1000), deck, b"100\n\xff\xfe\nh\ns\n", &path);

        assert_eq!(run.result.unwrap().bank(), 1100);
        assert!(run.err.contains("Unrecognized choice"));
        assert!(run.out.contains("New card: 5 of Hearts"));
        assert!(run.out.contains("Total: 20"));
        assert_eq!(run.out.matches("Hit (h) or stand (s)?").count(), 3);
    }

    #[test]
    fn garbled_bet_input_is_reprompted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        let deck = stacked(&[Rank::Ten, Rank::Nine, Rank::King, Rank::Seven]);
        let run = run_round(Player::new(1000), deck, b"\xff\n100\ns\n", &path);

        assert_eq!(run.result.unwrap().bank(), 1100);
        assert!(run.err.contains("is not a whole number"));
        assert_eq!(run.rows, 1);
    }

    #[test]
    fn dealt_twenty_one_skips_the_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        let deck = stacked(&[Rank::Ace, Rank::King, Rank::Ten, Rank::Eight]);
        let run = run_round(Player::new(1000), deck, "100\n", &path);

        assert_eq!(run.result.unwrap().bank(), 1100);
        assert!(!run.out.contains("Hit (h) or stand (s)?"));
        assert!(run.out.contains("Total: 21 (soft)"));
    }

    #[test]
    fn closed_input_before_bet_is_interrupted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        let deck = stacked(&[Rank::Ten, Rank::Nine, Rank::King, Rank::Seven]);
        let run = run_round(Player::new(1000), deck, "", &path);

        assert!(matches!(run.result, Err(CliError::Interrupted(_))));
        assert_eq!(run.rows, 0);
        assert!(!path.exists());
    }

    #[test]
    fn closed_input_during_turn_stands_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        // Player 10+5=15 stands on EOF, dealer 10+7=17 wins.
        let deck = stacked(&[Rank::Ten, Rank::Five, Rank::King, Rank::Seven]);
        let run = run_round(Player::new(1000), deck, "200\n", &path);

        assert_eq!(run.result.unwrap().bank(), 800);
        assert_eq!(bankroll::load(&path, 1000), Player::restore(800, 0, 1, 0));
    }

    #[test]
    fn zero_bet_plays_for_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("money.json");
        let deck = stacked(&[Rank::Ten, Rank::Nine, Rank::King, Rank::Seven]);
        let player = run_round(Player::new(1000), deck, "0\ns\n", &path)
            .result
            .unwrap();
        assert_eq!(player.bank(), 1000);
        assert_eq!(player.wins(), 1);
    }

    #[test]
    fn failed_bankroll_write_only_warns() {
        let dir = tempfile::tempdir().unwrap();
        // The directory itself cannot be written as a file.
        let deck = stacked(&[Rank::Ten, Rank::Nine, Rank::King, Rank::Seven]);
        let (run, logs) = capture(|| run_round(Player::new(1000), deck, "100\ns\n", dir.path()));

        assert_eq!(run.result.unwrap().bank(), 1100);
        assert!(run.err.contains("WARNING: Bankroll was not saved"));
        assert!(run.out.contains("Your new bank: 1100"));
        assert!(
            logs.at(Level::WARN)
                .iter()
                .any(|e| e.message.contains("failed to save bankroll"))
        );
    }

    #[test]
    fn failed_log_insert_only_warns() {
        let dir = tempfile::tempdir().unwrap();
        let database_path = dir.path().join("rounds.sqlite");
        let bankroll_path = dir.path().join("money.json");
        let policy = Config::default().retry_policy();
        let round_log = RoundLog::connect(&database_path, policy).unwrap();
        rusqlite::Connection::open(&database_path)
            .unwrap()
            .execute("DROP TABLE results", [])
            .unwrap();

        let table = Table {
            rules: TableRules::default(),
            round_log: &round_log,
            bankroll_path: &bankroll_path,
        };
        let deck = stacked(&[Rank::Ten, Rank::Nine, Rank::King, Rank::Seven]);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new("100\ns\n");
        let (result, logs) = capture(|| {
            play_round(&table, Player::new(1000), deck, &mut stdin, &mut out, &mut err)
        });

        assert_eq!(result.unwrap().bank(), 1100);
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("WARNING: Round was not logged"), "{err}");
        assert!(String::from_utf8(out).unwrap().contains("Your new bank: 1100"));
        assert_eq!(bankroll::load(&bankroll_path, 1).bank(), 1100);
        assert!(
            logs.at(Level::WARN)
                .iter()
                .any(|e| e.message.contains("failed to append round log entry"))
        );
    }

    #[test]
    fn handler_uses_flags_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let bankroll_path = dir.path().join("money.json");
        let database_path = dir.path().join("rounds.sqlite");
        let config = Config {
            db_retry_delay_ms: 0,
            ..Config::default()
        };
        let args = PlayArgs {
            seed: Some(7),
            bankroll: Some(bankroll_path.clone()),
            database: Some(database_path.clone()),
        };
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new("25\ns\n");

        handle_play_command(&config, args, &mut out, &mut err, &mut stdin).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("seed=7\n"));
        assert!(bankroll_path.exists());
        let log = RoundLog::connect(&database_path, config.retry_policy()).unwrap();
        let rows = log.recent(5).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.bet, 25);
        assert_eq!(rows[0].record.bank, 975);
    }
}
