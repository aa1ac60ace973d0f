use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Default location of the token file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "tokens.json";

pub const IPINFO_TOKEN_KEY: &str = "IPINFO_TOKEN";
pub const TELEGRAM_BOT_TOKEN_KEY: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID_KEY: &str = "TELEGRAM_CHAT_ID";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing or empty value for {0}")]
    Missing(&'static str),
}

/// Base URLs of the external services.
#[derive(Clone, Debug)]
pub struct Endpoints {
    pub geo: String,
    pub proxy: String,
    pub telegram: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geo: "https://ipinfo.io".to_string(),
            proxy: "https://proxycheck.io".to_string(),
            telegram: "https://api.telegram.org".to_string(),
        }
    }
}

/// On-disk shape of the token file. Unknown keys are ignored.
#[derive(Deserialize)]
struct TokenFile {
    #[serde(rename = "IPINFO_TOKEN", default)]
    ipinfo_token: Option<String>,
    #[serde(rename = "TELEGRAM_BOT_TOKEN", default)]
    telegram_bot_token: Option<String>,
    #[serde(rename = "TELEGRAM_CHAT_ID", default)]
    telegram_chat_id: Option<String>,
}

#[derive(Clone)]
pub struct Config {
    pub ipinfo_token: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub endpoints: Endpoints,
    pub timeout: Duration,
}

impl Config {
    pub fn new(ipinfo_token: &str, telegram_bot_token: &str, telegram_chat_id: &str) -> Self {
        Self {
            ipinfo_token: ipinfo_token.to_string(),
            telegram_bot_token: telegram_bot_token.to_string(),
            telegram_chat_id: telegram_chat_id.to_string(),
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Load the three tokens from a JSON file.
    ///
    /// Every key must be present and hold a non-blank string. There is no
    /// partial configuration: any problem is reported as a [`ConfigError`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        debug!(path = %shown, "Loading token file");

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        Self::from_json(&raw, &shown)
    }

    fn from_json(raw: &str, path: &str) -> Result<Self, ConfigError> {
        let tokens: TokenFile = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;

        let ipinfo_token = required(&tokens.ipinfo_token, IPINFO_TOKEN_KEY)?;
        let telegram_bot_token = required(&tokens.telegram_bot_token, TELEGRAM_BOT_TOKEN_KEY)?;
        let telegram_chat_id = required(&tokens.telegram_chat_id, TELEGRAM_CHAT_ID_KEY)?;
        Ok(Self::new(ipinfo_token, telegram_bot_token, telegram_chat_id))
    }
}

// Tokens are secrets; keep them out of debug output and logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoints", &self.endpoints)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn required<'a>(value: &'a Option<String>, key: &'static str) -> Result<&'a str, ConfigError> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}
