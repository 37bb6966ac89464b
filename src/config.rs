use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MASK_API_URL: &str = "https://8oi9s0nnth.apigw.ntruss.com/corona19-masks/v1";
const DEFAULT_DUMP_PATH: &str = "./range.binary";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PENDING_TTL_SECS: u64 = 3600;

/// Exit status used when the bot token is missing.
pub const EXIT_MISSING_TOKEN: i32 = 2;

#[derive(Debug)]
pub enum ConfigError {
    MissingToken,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingToken => write!(f, "BOT_TOKEN 환경변수가 필요합니다"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub mask_api_url: String,
    pub range_dump_path: PathBuf,
    pub request_timeout: Duration,
    pub pending_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = var("BOT_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let secs = |key: &str, default: u64| {
            var(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(default)
        };

        Ok(Self {
            bot_token,
            mask_api_url: var("MASK_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_MASK_API_URL.to_string()),
            range_dump_path: var("RANGE_DUMP_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DUMP_PATH)),
            request_timeout: Duration::from_secs(secs("MASK_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            pending_ttl: Duration::from_secs(secs(
                "PENDING_RADIUS_TTL_SECS",
                DEFAULT_PENDING_TTL_SECS,
            )),
        })
    }
}
