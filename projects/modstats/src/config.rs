use std::env;
use std::time::Duration;

use thiserror::Error;

use interfaces_github_gists::index as gists;
use interfaces_steam_workshop::index as workshop;
use interfaces_thunderstore_package_metrics::index as thunderstore;

/// Runtime configuration, read once at startup.
pub struct Config {
    pub gist_id: String,
    pub github_token: String,
    pub steam_api_key: String,
    /// `None` runs a single cycle and exits (cron mode).
    pub poll_interval: Option<Duration>,
    pub thunderstore_base_url: String,
    pub steam_base_url: String,
    pub github_base_url: String,
}

#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("MissingVar: {name}")]
    MissingVar { name: &'static str },

    #[error("InvalidPollInterval: {value}")]
    InvalidPollInterval { value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, LoadConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            gist_id: require("GIST_ID")?,
            github_token: require("GITHUB_TOKEN")?,
            steam_api_key: require("STEAM_API_KEY")?,
            poll_interval: poll_interval_from_env()?,
            thunderstore_base_url: env::var("THUNDERSTORE_URL")
                .unwrap_or_else(|_| thunderstore::DEFAULT_BASE_URL.to_string()),
            steam_base_url: env::var("STEAM_API_URL")
                .unwrap_or_else(|_| workshop::DEFAULT_BASE_URL.to_string()),
            github_base_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| gists::DEFAULT_BASE_URL.to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String, LoadConfigError> {
    env::var(name).map_err(|_| LoadConfigError::MissingVar { name })
}

/// Absent or `0` means run once; anything non-numeric is an error.
fn poll_interval_from_env() -> Result<Option<Duration>, LoadConfigError> {
    let value = match env::var("POLL_INTERVAL_SECS") {
        Ok(value) => value,
        Err(_) => return Ok(None),
    };

    let secs: u64 = value
        .parse()
        .map_err(|_| LoadConfigError::InvalidPollInterval { value })?;

    if secs == 0 {
        Ok(None)
    } else {
        Ok(Some(Duration::from_secs(secs)))
    }
}
