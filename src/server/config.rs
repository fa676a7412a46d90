use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Directory served for every non-API path, typically trunk's `dist/`.
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("SCHOOL_ODDS_PORT", DEFAULT_PORT),
            static_dir: optional("SCHOOL_ODDS_STATIC_DIR").map(PathBuf::from),
        }
    }
}

fn optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => {
            info!("{key} not set, skipping");
            None
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
