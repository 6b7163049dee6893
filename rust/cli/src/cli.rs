//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "blackjack",
    version,
    about = "Single-player terminal blackjack with a persistent bankroll",
    args_conflicts_with_subcommands = true
)]
pub struct BlackjackCli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,
    /// Flags for the implicit `play` command
    #[command(flatten)]
    pub play: PlayArgs,
}

impl BlackjackCli {
    /// The command to run; `play` when none was named.
    pub fn command(self) -> Commands {
        self.cmd.unwrap_or(Commands::Play(self.play))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play one round against the dealer (the default)
    Play(PlayArgs),
    /// Show the most recent entries of the round log
    History {
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=1000))]
        limit: u32,
        #[arg(long)]
        database: Option<PathBuf>,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Shuffle seed, for a reproducible deck
    #[arg(long)]
    pub seed: Option<u64>,
    /// Bankroll state file
    #[arg(long)]
    pub bankroll: Option<PathBuf>,
    /// Round log database file
    #[arg(long)]
    pub database: Option<PathBuf>,
}
