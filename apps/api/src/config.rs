use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::matching::discovery::{PersistMode, DEFAULT_MIN_SCORE};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub jobs_file: PathBuf,
    pub candidates_file: PathBuf,
    pub matches_file: PathBuf,
    pub applications_file: PathBuf,
    pub min_match_score: f64,
    pub match_persist_mode: PersistMode,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let min_match_score: f64 = var("MIN_MATCH_SCORE", &DEFAULT_MIN_SCORE.to_string())
            .parse()
            .context("MIN_MATCH_SCORE must be a number")?;
        if !(0.0..=100.0).contains(&min_match_score) {
            return Err(anyhow!("MIN_MATCH_SCORE must be between 0 and 100"));
        }

        Ok(Config {
            jobs_file: var("JOBS_FILE", "edjoin_jobs.json").into(),
            candidates_file: var("CANDIDATES_FILE", "candidates.json").into(),
            matches_file: var("MATCHES_FILE", "candidate_matches.json").into(),
            applications_file: var("APPLICATIONS_FILE", "applications.json").into(),
            min_match_score,
            match_persist_mode: PersistMode::from_str(&var("MATCH_PERSIST_MODE", "replace"))
                .map_err(|e| anyhow!(e))
                .context("invalid MATCH_PERSIST_MODE")?,
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
        })
    }
}
