//! Error types for dictionary service calls.
//!
//! Every failure is a variant of the single [`Error`] enum, so callers can
//! match one variant, a whole [`ErrorKind`], or just propagate with `?`.
//! Transport failures keep the underlying `reqwest::Error` as their
//! [`source`](std::error::Error::source).

use crate::rate_limit::RateLimitInfo;
use http::StatusCode;

/// Body reported for a 429 response that came back without one.
pub const DEFAULT_RATE_LIMIT_BODY: &str = "Rate limited";

/// The error type for all latindictionary.io calls.
///
/// # Examples
///
/// ```no_run
/// use latindictionary::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new()?;
///
/// match client.latin_to_english("canis").await {
///     Ok(response) => println!("{:?}", response.data),
///     Err(Error::Api { status, body }) => eprintln!("API error {}: {}", status, body),
///     Err(e) if e.is_retryable() => eprintln!("gave up after retries: {}", e),
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The host could not be reached, or the connection broke mid-request.
    ///
    /// Returned only once the retry budget is spent.
    #[error("Connection error after {attempts} attempt(s): {source}")]
    Connection {
        /// Total attempts made, including the first.
        attempts: usize,
        /// The transport error from the final attempt.
        source: reqwest::Error,
    },

    /// The request exceeded the configured timeout.
    ///
    /// Returned only once the retry budget is spent.
    #[error("Request timed out after {attempts} attempt(s): {source}")]
    Timeout {
        /// Total attempts made, including the first.
        attempts: usize,
        /// The transport error from the final attempt.
        source: reqwest::Error,
    },

    /// The service kept answering HTTP 429.
    ///
    /// Returned only once the retry budget is spent. The status is always 429.
    #[error("API error 429: {body}")]
    RateLimited {
        /// Response body of the final 429, or [`DEFAULT_RATE_LIMIT_BODY`].
        body: String,
        /// Total attempts made, including the first.
        attempts: usize,
        /// Rate limit headers of the final 429, if any were sent.
        rate_limit: Option<RateLimitInfo>,
    },

    /// The service answered with a status >= 400 other than 429.
    ///
    /// Never retried.
    #[error("API error {}: {body}", .status.as_u16())]
    Api {
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// A caller-supplied argument was rejected before any request was sent.
    #[error("Invalid input: {0}")]
    InputValidation(String),

    /// A successful response body did not match the requested type.
    #[error("Failed to deserialize response (status {}): {source}", .status.as_u16())]
    Deserialization {
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response body.
        body: String,
        /// The serde error.
        source: serde_json::Error,
    },

    /// The client was configured with invalid settings.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Connection,
    Timeout,
    RateLimited,
    Api,
    InputValidation,
    Deserialization,
    Configuration,
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Connection { .. } => ErrorKind::Connection,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::RateLimited { .. } => ErrorKind::RateLimited,
            Error::Api { .. } => ErrorKind::Api,
            Error::InputValidation(_) => ErrorKind::InputValidation,
            Error::Deserialization { .. } => ErrorKind::Deserialization,
            Error::Configuration(_) | Error::InvalidUrl(_) => ErrorKind::Configuration,
        }
    }

    /// Returns `true` for the kinds the client retries: connection
    /// failures, timeouts and rate limiting.
    ///
    /// An error of a retryable kind that reaches the caller has already
    /// exhausted the retry budget.
    ///
    /// ```
    /// use latindictionary::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::Api {
    ///     status: StatusCode::INTERNAL_SERVER_ERROR,
    ///     body: "boom".to_string(),
    /// };
    /// assert!(!err.is_retryable());
    ///
    /// let err = Error::RateLimited {
    ///     body: "slow down".to_string(),
    ///     attempts: 4,
    ///     rate_limit: None,
    /// };
    /// assert!(err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Connection | ErrorKind::Timeout | ErrorKind::RateLimited
        )
    }

    /// Returns the HTTP status if the service answered.
    ///
    /// `RateLimited` always reports 429, so `status().is_some()` catches
    /// every API-level failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::RateLimited { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            Error::Api { status, .. } => Some(*status),
            Error::Deserialization { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the response body if the service answered.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::RateLimited { body, .. } => Some(body),
            Error::Api { body, .. } => Some(body),
            Error::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns the number of attempts made before giving up, for the
    /// retryable kinds.
    pub fn attempts(&self) -> Option<usize> {
        match self {
            Error::Connection { attempts, .. }
            | Error::Timeout { attempts, .. }
            | Error::RateLimited { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }
}

/// A specialized `Result` type for latindictionary.io calls.
pub type Result<T> = std::result::Result<T, Error>;
