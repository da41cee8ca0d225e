use anyhow::Result;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Six-field cron expression (with seconds) for the start sweep.
    pub sweep_cron: String,
    /// JSON file the match book is loaded from at startup and saved to on
    /// shutdown. Without it the book lives in memory only.
    pub matches_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep_cron: "0 * * * * *".to_string(),
            matches_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let sweep_cron = var("SWEEP_CRON").unwrap_or(defaults.sweep_cron);
        if sweep_cron.split_whitespace().count() != 6 {
            anyhow::bail!("SWEEP_CRON must have six fields (sec min hour day month weekday)");
        }

        let matches_path = var("MATCHES_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            sweep_cron,
            matches_path,
        })
    }
}
