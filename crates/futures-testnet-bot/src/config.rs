/*
[INPUT]:  .env file, BINANCE_* environment variables, optional secrets file
[OUTPUT]: Validated BotConfig with credentials and client settings
[POS]:    Configuration layer - credential and endpoint setup
[UPDATE]: When adding new configuration options or sources
*/

use std::fmt;
use std::path::{Path, PathBuf};

use binance_futures_adapter::{ClientConfig, Network};
use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, warn};

/// Prefix shared by every environment variable the bot reads
pub const ENV_PREFIX: &str = "BINANCE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API credentials not found. Use .env locally or a secrets file in deployment.")]
    MissingCredentials,
    #[error("secrets file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),
}

/// Runtime configuration for the trading bot
#[derive(Clone, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    /// Anything but a case-insensitive "true" selects mainnet
    #[serde(default = "default_testnet", deserialize_with = "deserialize_flag")]
    pub testnet: bool,
    /// Overrides the network's REST base URL
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,
    /// Smallest order value (quote asset) the pre-check lets through
    #[serde(default = "default_min_notional")]
    pub min_notional: Decimal,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("testnet", &self.testnet)
            .field("base_url", &self.base_url)
            .field("recv_window_ms", &self.recv_window_ms)
            .field("min_notional", &self.min_notional)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

fn default_testnet() -> bool {
    true
}

fn default_recv_window_ms() -> u64 {
    5_000
}

fn default_min_notional() -> Decimal {
    Decimal::from(100)
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => text.trim().eq_ignore_ascii_case("true"),
    })
}

impl BotConfig {
    /// Config with defaults for everything but the credentials
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            testnet: default_testnet(),
            base_url: None,
            recv_window_ms: default_recv_window_ms(),
            min_notional: default_min_notional(),
            log_dir: default_log_dir(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Load `.env`, then the process environment, then the secrets file.
    ///
    /// Values from the secrets file win over environment values.
    pub fn load(secrets_file: Option<&Path>) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env file"),
            Err(err) if err.not_found() => debug!("no .env file found"),
            Err(err) => warn!(error = %err, "failed to read .env file"),
        }

        Self::from_sources(None, secrets_file)
    }

    /// Build from an explicit environment map (`None` reads the process
    /// environment) and an optional secrets file.
    pub fn from_sources(
        env: Option<config::Map<String, String>>,
        secrets_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env));

        if let Some(path) = secrets_file {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        let mut config: BotConfig = builder.build()?.try_deserialize()?;
        config.api_key = config.api_key.trim().to_string();
        config.api_secret = config.api_secret.trim().to_string();
        config.base_url = config.base_url.filter(|url| !url.trim().is_empty());

        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }

        Ok(config)
    }

    pub fn network(&self) -> Network {
        if self.testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    /// REST base URL after applying the override
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.network().base_url())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            recv_window_ms: self.recv_window_ms,
            ..ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_loads_from_environment() {
        let config = BotConfig::from_sources(
            env(&[
                ("BINANCE_API_KEY", "key"),
                ("BINANCE_API_SECRET", "secret"),
                ("BINANCE_RECV_WINDOW_MS", "7000"),
            ]),
            None,
        )
        .expect("config");

        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_secret, "secret");
        assert!(config.testnet);
        assert_eq!(config.network(), Network::Testnet);
        assert_eq!(config.base_url(), "https://testnet.binancefuture.com");
        assert_eq!(config.client_config().recv_window_ms, 7_000);
        assert_eq!(config.min_notional, Decimal::from(100));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_testnet_flag_parsing() {
        for (raw, expected) in [("true", true), ("TRUE", true), ("false", false), ("yes", false)] {
            let config = BotConfig::from_sources(
                env(&[
                    ("BINANCE_API_KEY", "key"),
                    ("BINANCE_API_SECRET", "secret"),
                    ("BINANCE_TESTNET", raw),
                ]),
                None,
            )
            .expect("config");
            assert_eq!(config.testnet, expected, "BINANCE_TESTNET={raw}");
        }
    }

    #[test]
    fn test_missing_credentials() {
        let err = BotConfig::from_sources(env(&[("BINANCE_API_KEY", "key")]), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials));
        assert!(err.to_string().starts_with("API credentials not found"));

        let err = BotConfig::from_sources(
            env(&[("BINANCE_API_KEY", "  "), ("BINANCE_API_SECRET", "secret")]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials));
    }

    #[test]
    fn test_secrets_file_overrides_environment() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("tempfile");
        writeln!(
            file,
            "api_key: file-key\napi_secret: file-secret\ntestnet: false\nmin_notional: 5"
        )
        .expect("write secrets");

        let config = BotConfig::from_sources(
            env(&[("BINANCE_API_KEY", "env-key"), ("BINANCE_API_SECRET", "env-secret")]),
            Some(file.path()),
        )
        .expect("config");

        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.api_secret, "file-secret");
        assert!(!config.testnet);
        assert_eq!(config.base_url(), "https://fapi.binance.com");
        assert_eq!(config.min_notional, Decimal::from(5));
    }

    #[test]
    fn test_missing_secrets_file() {
        let err = BotConfig::from_sources(
            env(&[("BINANCE_API_KEY", "key"), ("BINANCE_API_SECRET", "secret")]),
            Some(Path::new("/definitely/not/here.yaml")),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn test_base_url_override_and_debug() {
        let config = BotConfig::new("key", "shh").with_base_url("http://127.0.0.1:8080");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
        assert!(!format!("{config:?}").contains("shh"));
    }
}
