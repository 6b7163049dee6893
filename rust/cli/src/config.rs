use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use blackjack_engine::player::STARTING_BANK;
use blackjack_engine::rules::{DEALER_STANDS_ON, PUSH_PAYOUT, TableRules, WIN_PAYOUT};

use crate::round_log::RetryPolicy;

pub const CONFIG_PATH_VAR: &str = "BLACKJACK_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_bank: u32,
    pub bankroll_path: String,
    pub database_path: String,
    pub seed: Option<u64>,
    pub dealer_stands_on: u8,
    pub win_payout: u32,
    pub db_max_attempts: u32,
    pub db_retry_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_bank: ValueSource,
    pub bankroll_path: ValueSource,
    pub database_path: ValueSource,
    pub seed: ValueSource,
    pub dealer_stands_on: ValueSource,
    pub win_payout: ValueSource,
    pub db_max_attempts: ValueSource,
    pub db_retry_delay_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_bank: ValueSource::Default,
            bankroll_path: ValueSource::Default,
            database_path: ValueSource::Default,
            seed: ValueSource::Default,
            dealer_stands_on: ValueSource::Default,
            win_payout: ValueSource::Default,
            db_max_attempts: ValueSource::Default,
            db_retry_delay_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_bank: STARTING_BANK,
            bankroll_path: "money.json".into(),
            database_path: "blackjack.sqlite".into(),
            seed: None,
            dealer_stands_on: DEALER_STANDS_ON,
            win_payout: WIN_PAYOUT,
            db_max_attempts: 5,
            db_retry_delay_ms: 2000,
        }
    }
}

impl Config {
    pub fn table_rules(&self) -> TableRules {
        TableRules {
            dealer_stands_on: self.dealer_stands_on,
            win_payout: self.win_payout,
            push_payout: PUSH_PAYOUT,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.db_max_attempts,
            delay: Duration::from_millis(self.db_retry_delay_ms),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok())
}

/// Layers defaults, the optional TOML file named by `BLACKJACK_CONFIG` and
/// the `BLACKJACK_*` environment variables, in that order.
///
/// `lookup` reads a single environment variable. Empty values count as unset.
pub fn resolve<F>(lookup: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = lookup(CONFIG_PATH_VAR).filter(|p| !p.is_empty()) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_bank {
            cfg.starting_bank = v;
            sources.starting_bank = ValueSource::File;
        }
        if let Some(v) = f.bankroll_path {
            cfg.bankroll_path = v;
            sources.bankroll_path = ValueSource::File;
        }
        if let Some(v) = f.database_path {
            cfg.database_path = v;
            sources.database_path = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.dealer_stands_on {
            cfg.dealer_stands_on = v;
            sources.dealer_stands_on = ValueSource::File;
        }
        if let Some(v) = f.win_payout {
            cfg.win_payout = v;
            sources.win_payout = ValueSource::File;
        }
        if let Some(v) = f.db_max_attempts {
            cfg.db_max_attempts = v;
            sources.db_max_attempts = ValueSource::File;
        }
        if let Some(v) = f.db_retry_delay_ms {
            cfg.db_retry_delay_ms = v;
            sources.db_retry_delay_ms = ValueSource::File;
        }
    }

    let env = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = env_number(&env, "BLACKJACK_STARTING_BANK", "starting bank")? {
        cfg.starting_bank = v;
        sources.starting_bank = ValueSource::Env;
    }
    if let Some(v) = env("BLACKJACK_BANKROLL_PATH") {
        cfg.bankroll_path = v;
        sources.bankroll_path = ValueSource::Env;
    }
    if let Some(v) = env("BLACKJACK_DATABASE_PATH") {
        cfg.database_path = v;
        sources.database_path = ValueSource::Env;
    }
    if let Some(v) = env_number(&env, "BLACKJACK_SEED", "seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_number(&env, "BLACKJACK_DEALER_STANDS_ON", "dealer stand threshold")? {
        cfg.dealer_stands_on = v;
        sources.dealer_stands_on = ValueSource::Env;
    }
    if let Some(v) = env_number(&env, "BLACKJACK_WIN_PAYOUT", "win payout")? {
        cfg.win_payout = v;
        sources.win_payout = ValueSource::Env;
    }
    if let Some(v) = env_number(&env, "BLACKJACK_DB_MAX_ATTEMPTS", "database attempts")? {
        cfg.db_max_attempts = v;
        sources.db_max_attempts = ValueSource::Env;
    }
    if let Some(v) = env_number(&env, "BLACKJACK_DB_RETRY_DELAY_MS", "database retry delay")? {
        cfg.db_retry_delay_ms = v;
        sources.db_retry_delay_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_number<T, F>(env: &F, key: &str, what: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match env(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {what}: {raw}"))),
        None => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    starting_bank: Option<u32>,
    #[serde(default)]
    bankroll_path: Option<String>,
    #[serde(default)]
    database_path: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    dealer_stands_on: Option<u8>,
    #[serde(default)]
    win_payout: Option<u32>,
    #[serde(default)]
    db_max_attempts: Option<u32>,
    #[serde(default)]
    db_retry_delay_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_bank == 0 {
        return Err(ConfigError::Invalid("starting_bank must be >0".into()));
    }
    if !(1..=21).contains(&cfg.dealer_stands_on) {
        return Err(ConfigError::Invalid("dealer_stands_on must be between 1 and 21".into()));
    }
    if cfg.win_payout == 0 {
        return Err(ConfigError::Invalid("win_payout must be >=1".into()));
    }
    if cfg.db_max_attempts == 0 {
        return Err(ConfigError::Invalid("db_max_attempts must be >=1".into()));
    }
    if cfg.bankroll_path.trim().is_empty() || cfg.database_path.trim().is_empty() {
        return Err(ConfigError::Invalid("paths must not be empty".into()));
    }
    Ok(())
}
