//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of every value
//! (`default`, `file` or `env`).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "starting_bank": {
//!     "value": 1000,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config::ConfigResolved;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Io` if writing to the output stream fails.
pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_bank": {
            "value": config.starting_bank,
            "source": sources.starting_bank,
        },
        "bankroll_path": {
            "value": config.bankroll_path,
            "source": sources.bankroll_path,
        },
        "database_path": {
            "value": config.database_path,
            "source": sources.database_path,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "dealer_stands_on": {
            "value": config.dealer_stands_on,
            "source": sources.dealer_stands_on,
        },
        "win_payout": {
            "value": config.win_payout,
            "source": sources.win_payout,
        },
        "db_max_attempts": {
            "value": config.db_max_attempts,
            "source": sources.db_max_attempts,
        },
        "db_retry_delay_ms": {
            "value": config.db_retry_delay_ms,
            "source": sources.db_retry_delay_ms,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{self, ValueSource};

    fn resolved(pairs: &'static [(&'static str, &'static str)]) -> ConfigResolved {
        config::resolve(|key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
        .unwrap()
    }

    #[test]
    fn test_cfg_displays_every_setting() {
        let mut out = Vec::new();
        handle_cfg_command(&resolved(&[]), &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        for key in [
            "starting_bank",
            "bankroll_path",
            "database_path",
            "seed",
            "dealer_stands_on",
            "win_payout",
            "db_max_attempts",
            "db_retry_delay_ms",
        ] {
            assert_eq!(json[key]["source"], "default", "{key}");
        }
        assert_eq!(json["starting_bank"]["value"], 1000);
        assert_eq!(json["bankroll_path"]["value"], "money.json");
        assert!(json["seed"]["value"].is_null());
    }

    #[test]
    fn test_cfg_reports_env_sources() {
        let resolved = resolved(&[("BLACKJACK_SEED", "99"), ("BLACKJACK_WIN_PAYOUT", "3")]);
        assert_eq!(resolved.sources.seed, ValueSource::Env);

        let mut out = Vec::new();
        handle_cfg_command(&resolved, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["seed"]["value"], 99);
        assert_eq!(json["seed"]["source"], "env");
        assert_eq!(json["win_payout"]["value"], 3);
        assert_eq!(json["dealer_stands_on"]["source"], "default");
    }

    #[test]
    fn test_cfg_writes_pretty_json() {
        let mut out = Vec::new();
        handle_cfg_command(&resolved(&[]), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains('\n'));
        assert!(output.contains("  "));
    }
}
