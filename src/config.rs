use anyhow::{Context, Result};
use std::str::FromStr;

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub library_path: String,
    pub default_duration_hours: u32,
    pub default_block_count: usize,
    pub default_genre_weight: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_path: "library.json".to_string(),
            default_duration_hours: 4,
            default_block_count: 3,
            default_genre_weight: 50,
        }
    }
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    config_from_lookup(|key| std::env::var(key).ok())
}

fn config_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let defaults = Config::default();
    Ok(Config {
        library_path: lookup("BLOCKMIX_LIBRARY").unwrap_or(defaults.library_path),
        default_duration_hours: parse_var(
            &lookup,
            "BLOCKMIX_DEFAULT_DURATION_HOURS",
            defaults.default_duration_hours,
        )?,
        default_block_count: parse_var(
            &lookup,
            "BLOCKMIX_DEFAULT_BLOCK_COUNT",
            defaults.default_block_count,
        )?,
        default_genre_weight: parse_var(
            &lookup,
            "BLOCKMIX_DEFAULT_GENRE_WEIGHT",
            defaults.default_genre_weight,
        )?,
    })
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}
