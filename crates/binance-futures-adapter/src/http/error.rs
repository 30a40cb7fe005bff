/*
[INPUT]:  Error sources (HTTP, API, URL, credentials)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Exchange code for "order's notional must be no smaller than the minimum".
pub const MIN_NOTIONAL_REJECTED: i64 = -4164;

/// Exchange codes that mean the key, secret or signature was refused.
const AUTH_ERROR_CODES: [i64; 3] = [-1022, -2014, -2015];

/// Main error type for the Binance futures adapter
#[derive(Error, Debug)]
pub enum BinanceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Signed endpoint called without API key and secret
    #[error("API credentials are not set")]
    MissingCredentials,

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    /// Connection timeout
    #[error("Connection timeout after {duration}s")]
    Timeout { duration: u64 },
}

impl BinanceError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BinanceError::Http(_)
                | BinanceError::RateLimit { .. }
                | BinanceError::Timeout { .. }
                | BinanceError::InvalidResponse(_)
        )
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            BinanceError::RateLimit { retry_after } => Some(*retry_after),
            BinanceError::Timeout { .. } => Some(1),
            _ => None,
        }
    }

    /// Check if error indicates the credentials were refused
    pub fn is_auth_error(&self) -> bool {
        match self {
            BinanceError::MissingCredentials => true,
            BinanceError::Api { code, .. } => {
                AUTH_ERROR_CODES.contains(code) || *code == -i64::from(StatusCode::UNAUTHORIZED.as_u16())
            }
            _ => false,
        }
    }

    /// Transport-level failure: the exchange never gave a usable answer.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            BinanceError::Http(_) | BinanceError::Timeout { .. } | BinanceError::InvalidResponse(_)
        )
    }

    /// Exchange error code, if the exchange rejected the request
    pub fn api_code(&self) -> Option<i64> {
        match self {
            BinanceError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The exchange refused the order because price * quantity is too small
    pub fn is_min_notional_rejection(&self) -> bool {
        self.api_code() == Some(MIN_NOTIONAL_REJECTED)
    }

    /// Create an API error from a status code when the body carried no error payload.
    ///
    /// The status is stored negated so it never collides with a real exchange code.
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        BinanceError::Api {
            code: -i64::from(status.as_u16()),
            message: message.into(),
        }
    }
}

/// Result type alias for Binance operations
pub type Result<T> = std::result::Result<T, BinanceError>;
