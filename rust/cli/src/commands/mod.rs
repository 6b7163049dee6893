//! Command handler modules for the blackjack CLI.
//!
//! Each command lives in its own file and exposes a
//! `handle_COMMAND_command(...) -> Result<(), CliError>` function. Output
//! streams (`&mut dyn Write`) and stdin (`&mut dyn BufRead`) are passed in so
//! the handlers run against in-memory buffers in tests.

mod cfg;
mod history;
mod play;

pub use cfg::handle_cfg_command;
pub use history::handle_history_command;
pub use play::{Table, handle_play_command, play_round};
