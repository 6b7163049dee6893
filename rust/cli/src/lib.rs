//! # Blackjack CLI Library
//!
//! Console driver for `blackjack-engine`: one round of blackjack per
//! invocation, with the bankroll kept in a JSON file and every round attempt
//! appended to a SQLite round log.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the command line and dispatches to a command handler;
//! [`run_with_input`] does the same with an explicit stdin.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["blackjack", "play", "--seed", "42"];
//! let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play one round (also runs when no subcommand is given)
//! - `history`: List recent round log entries
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::{BufRead, Write};

pub mod bankroll;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod round_log;
pub mod ui;
pub mod validation;

use cli::{BlackjackCli, Commands};
use commands::{handle_cfg_command, handle_history_command, handle_play_command};

pub use commands::{Table, play_round};
pub use error::CliError;

/// Main entry point for the CLI application, reading from the process stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when stdin closes before
/// a bet is placed
///
/// # Example
///
/// ```
/// use std::io;
/// let code = blackjack_cli::run(vec!["blackjack", "--help"], &mut io::sink(), &mut io::sink());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// Same as [`run`], with the interactive input supplied by the caller.
pub fn run_with_input<I, S>(
    args: I,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "history", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Usage: blackjack [command] [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: blackjack --help");
            return exit_code::ERROR;
        }
    };

    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            write_or_exit!(err, "Error: Invalid configuration: {}", e);
            return exit_code::ERROR;
        }
    };

    let result = match cli.command() {
        Commands::Play(args) => handle_play_command(&resolved.config, args, out, err, stdin),
        Commands::History { limit, database } => {
            handle_history_command(&resolved.config, limit, database, out)
        }
        Commands::Cfg => handle_cfg_command(&resolved, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            write_or_exit!(err, "Interrupted: {}", msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
