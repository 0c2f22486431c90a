use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;

use crate::matcher::FUZZY_CUTOFF;
use crate::scorer::MIN_INCLUSION_SCORE;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        rules_path: get_env_opt("DEVXPLORE_RULES_PATH"),
        min_score: get_env_parsed_or("DEVXPLORE_MIN_SCORE", MIN_INCLUSION_SCORE),
        fuzzy_cutoff: get_env_parsed_or("DEVXPLORE_FUZZY_CUTOFF", FUZZY_CUTOFF),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    /// Rules file used when the command line does not name one.
    pub rules_path: Option<String>,
    pub min_score: u32,
    pub fuzzy_cutoff: f64,
}

pub const LOG_LEVEL_KEY: &str = "DEVXPLORE_LOG_LEVEL";

/// Raw log level, read without building [`CONFIG`] so the logger can be
/// installed before any config warning is emitted.
pub fn log_level_from_env() -> String {
    dotenv().ok();
    get_env_or_default(LOG_LEVEL_KEY, "info")
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    raw.trim().parse().unwrap_or_else(|_| {
        log::warn!("ignoring unparseable {key}={raw:?}, using {default}");
        default
    })
}

#[test]
fn test_parse_or_falls_back_on_garbage() {
    assert_eq!(parse_or("DEVXPLORE_MIN_SCORE", " 35 ", 20u32), 35);
    assert_eq!(parse_or("DEVXPLORE_MIN_SCORE", "twenty", 20u32), 20);
    assert_eq!(parse_or("DEVXPLORE_FUZZY_CUTOFF", "85.5", 90.0f64), 85.5);
    assert_eq!(parse_or("DEVXPLORE_FUZZY_CUTOFF", "", 90.0f64), 90.0);
}
