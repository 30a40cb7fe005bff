/*
[INPUT]:  HTTP configuration (base URL, timeouts, recvWindow, credentials)
[OUTPUT]: Configured reqwest client, signed request builders, decoded responses
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::http::{BinanceError, RequestSigner, Result};
use crate::types::{ApiErrorBody, Network};

const API_KEY_HEADER: &str = "X-MBX-APIKEY";
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// How long a signed request stays valid after its timestamp
    pub recv_window_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            recv_window_ms: 5_000,
        }
    }
}

/// Credentials for SIGNED endpoints
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Main HTTP client for the USDT-M futures REST API
#[derive(Debug)]
pub struct BinanceClient {
    http_client: Client,
    base_url: Url,
    config: ClientConfig,
    credentials: Option<Credentials>,
}

impl BinanceClient {
    /// Create a new client with default configuration
    pub fn new(network: Network) -> Result<Self> {
        Self::with_config(ClientConfig::default(), network)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, network: Network) -> Result<Self> {
        Self::with_config_and_base_url(config, network.base_url())
    }

    /// Create a client against an explicit base URL (mock servers, proxies)
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            config,
            credentials: None,
        })
    }

    /// Set credentials for SIGNED requests
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, endpoint: &str, query: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.join(endpoint)?;
        url.set_query(query.filter(|q| !q.is_empty()));
        Ok(url)
    }

    /// Build an unsigned request; `params` go into the query string
    pub(crate) fn public_request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<RequestBuilder> {
        let query = encode_query(params);
        let url = self.url(endpoint, Some(query.as_str()))?;
        Ok(self.http_client.request(method, url))
    }

    /// Build a SIGNED request
    ///
    /// Appends `recvWindow` and `timestamp`, signs the full query string with
    /// the API secret and appends `signature`. The API key travels in the
    /// `X-MBX-APIKEY` header.
    pub(crate) fn signed_request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<RequestBuilder> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(BinanceError::MissingCredentials)?;

        let query = self.signed_query(credentials, params, Utc::now().timestamp_millis());
        let url = self.url(endpoint, Some(query.as_str()))?;
        Ok(self
            .http_client
            .request(method, url)
            .header(API_KEY_HEADER, credentials.api_key.as_str()))
    }

    fn signed_query(
        &self,
        credentials: &Credentials,
        params: &[(&str, String)],
        timestamp_ms: i64,
    ) -> String {
        let mut all: Vec<(&str, String)> = params.to_vec();
        all.push(("recvWindow", self.config.recv_window_ms.to_string()));
        all.push(("timestamp", timestamp_ms.to_string()));

        let payload = encode_query(&all);
        let signature = RequestSigner::new(credentials.api_secret.as_str()).sign(&payload);
        format!("{payload}&signature={signature}")
    }

    /// Execute a request and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|err| self.map_transport(err))?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() == 418 {
            let retry_after = retry_after_secs(&response);
            warn!(status = status.as_u16(), retry_after, "rate limited by exchange");
            return Err(BinanceError::RateLimit { retry_after });
        }

        let body = response.text().await.map_err(|err| self.map_transport(err))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(api) => BinanceError::Api {
                    code: api.code,
                    message: api.msg,
                },
                Err(_) => BinanceError::api_error(status, body),
            });
        }

        serde_json::from_str(&body).map_err(|err| {
            BinanceError::InvalidResponse(format!("failed to decode response body: {err}"))
        })
    }

    fn map_transport(&self, err: reqwest::Error) -> BinanceError {
        if err.is_timeout() {
            BinanceError::Timeout {
                duration: self.config.timeout.as_secs(),
            }
        } else {
            BinanceError::Http(err)
        }
    }
}

fn encode_query(params: &[(&str, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())))
        .finish()
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
