use std::{path::PathBuf, time::Duration};

use tunicoin_client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

pub struct Config {
    pub api_url: String,
    pub request_timeout: Duration,
    pub secret_file: PathBuf,
    pub secret_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let api_url = std::env::var("TUNI_API_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let default_timeout_ms = DEFAULT_TIMEOUT_SECS * 1000;
        let timeout_ms: u64 = std::env::var("TUNI_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(default_timeout_ms);
        let secret_file = std::env::var("TUNI_SECRET_FILE")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(default_secret_file);
        let secret_key = std::env::var("TUNI_SECRET_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Self {
            api_url,
            request_timeout: Duration::from_millis(timeout_ms),
            secret_file,
            secret_key,
        }
    }
}

fn default_secret_file() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tunicoin")
        .join("secrets.json")
}
