use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When unset the service runs on the
    /// in-memory store (single-process development mode).
    pub database_url: Option<String>,
    /// Enables the one-click generation endpoint when present.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL").ok(),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            database_url: None,
            anthropic_api_key: None,
            port: 0,
            rust_log: "info".to_string(),
        }
    }
}
