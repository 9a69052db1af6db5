use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub recommendation_limit: usize,
    pub prune_stale_recommendations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            recommendation_limit: parse_limit(std::env::var("RECOMMENDATION_LIMIT").ok())?,
            prune_stale_recommendations: parse_flag(
                std::env::var("PRUNE_STALE_RECOMMENDATIONS").ok(),
            )?,
        })
    }
}

const DEFAULT_RECOMMENDATION_LIMIT: usize = 20;

fn parse_limit(value: Option<String>) -> Result<usize> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(DEFAULT_RECOMMENDATION_LIMIT),
        Some(raw) => {
            let limit: usize = raw
                .parse()
                .context("RECOMMENDATION_LIMIT must be a positive integer")?;
            anyhow::ensure!(limit > 0, "RECOMMENDATION_LIMIT must be a positive integer");
            Ok(limit)
        }
    }
}

fn parse_flag(value: Option<String>) -> Result<bool> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(false),
        Some("1" | "true" | "yes") => Ok(true),
        Some("0" | "false" | "no") => Ok(false),
        Some(other) => anyhow::bail!("PRUNE_STALE_RECOMMENDATIONS has invalid value '{other}'"),
    }
}
