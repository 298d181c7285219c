//! The retry policy shared by the async and blocking clients.
//!
//! A client drives one logical request as a loop of attempts. Each attempt
//! ends in one of three ways:
//!
//! - success: the body is parsed and returned,
//! - a terminal failure: returned at once, never retried,
//! - a retryable [`Failure`]: handed to [`RetryState::next`], which either
//!   says how long to wait before the next attempt or turns the failure into
//!   the final [`Error`].
//!
//! Only the waiting differs between the two clients.

use crate::{
    error::DEFAULT_RATE_LIMIT_BODY, rate_limit::RateLimitInfo, Backoff, ClientConfig, Error,
    Response,
};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// A retryable failure of a single attempt.
#[derive(Debug)]
pub(crate) enum Failure {
    Timeout(reqwest::Error),
    Connection(reqwest::Error),
    RateLimited {
        body: String,
        rate_limit: Option<RateLimitInfo>,
    },
}

impl Failure {
    /// Classifies an error raised while sending a request or reading its body.
    pub(crate) fn transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Failure::Timeout(error)
        } else {
            Failure::Connection(error)
        }
    }

    fn into_error(self, attempts: usize) -> Error {
        match self {
            Failure::Timeout(source) => Error::Timeout { attempts, source },
            Failure::Connection(source) => Error::Connection { attempts, source },
            Failure::RateLimited { body, rate_limit } => Error::RateLimited {
                body,
                attempts,
                rate_limit,
            },
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Timeout(e) => write!(f, "timeout: {}", e),
            Failure::Connection(e) => write!(f, "connection failure: {}", e),
            Failure::RateLimited { .. } => write!(f, "rate limited (429)"),
        }
    }
}

/// How a single attempt ended, when it did not succeed.
#[derive(Debug)]
pub(crate) enum AttemptError {
    Retryable(Failure),
    Terminal(Error),
}

impl From<Failure> for AttemptError {
    fn from(failure: Failure) -> Self {
        AttemptError::Retryable(failure)
    }
}

/// What to do after a retryable failure.
#[derive(Debug)]
pub(crate) enum Decision {
    /// Wait this long, then try again.
    Retry(Duration),
    /// Budget spent; return this error.
    GiveUp(Error),
}

/// Attempt bookkeeping for one logical request.
#[derive(Debug)]
pub(crate) struct RetryState {
    backoff: Backoff,
    max_retries: usize,
    attempt: usize,
}

impl RetryState {
    pub(crate) fn new(config: &ClientConfig) -> Self {
        Self {
            backoff: config.backoff,
            max_retries: config.max_retries,
            attempt: 0,
        }
    }

    /// The 0-based index of the current attempt.
    pub(crate) fn attempt(&self) -> usize {
        self.attempt
    }

    /// Attempts made so far, counting the current one.
    pub(crate) fn attempts(&self) -> usize {
        self.attempt + 1
    }

    /// Decides whether the current attempt's failure is retried.
    pub(crate) fn next(&mut self, failure: Failure) -> Decision {
        tracing::warn!(
            error = %failure,
            attempt = self.attempt,
            max_retries = self.max_retries,
            "Request attempt failed"
        );

        if self.attempt >= self.max_retries {
            return Decision::GiveUp(failure.into_error(self.attempts()));
        }

        let delay = self.backoff.delay(self.attempt);
        tracing::info!(
            delay_ms = delay.as_millis() as u64,
            attempt = self.attempt,
            "Retrying request after delay"
        );
        self.attempt += 1;
        Decision::Retry(delay)
    }
}

/// Interprets a fully read response.
///
/// 429 is retryable, any other status >= 400 is terminal, everything else is
/// parsed as the requested type.
pub(crate) fn interpret<T>(
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    latency: Duration,
    attempts: usize,
) -> Result<Response<T>, AttemptError>
where
    T: DeserializeOwned,
{
    tracing::info!(
        status = status.as_u16(),
        latency_ms = latency.as_millis() as u64,
        attempts = attempts,
        "Received HTTP response"
    );

    if status == StatusCode::TOO_MANY_REQUESTS {
        let body = if body.trim().is_empty() {
            DEFAULT_RATE_LIMIT_BODY.to_string()
        } else {
            body
        };
        return Err(Failure::RateLimited {
            body,
            rate_limit: RateLimitInfo::from_headers(&headers),
        }
        .into());
    }

    if status.as_u16() >= 400 {
        tracing::error!(status = status.as_u16(), response = %body, "API error");
        return Err(AttemptError::Terminal(Error::Api { status, body }));
    }

    match serde_json::from_str::<T>(&body) {
        Ok(data) => Ok(Response::new(data, body, status, headers, latency, attempts)),
        Err(source) => {
            tracing::error!(
                error = %source,
                raw_response = %body,
                "Failed to deserialize response"
            );
            Err(AttemptError::Terminal(Error::Deserialization {
                status,
                body,
                source,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use serde_json::{json, Value};

    fn config(max_retries: usize) -> ClientConfig {
        ClientConfig {
            max_retries,
            backoff: Backoff::new(Duration::from_millis(10), Duration::from_millis(25)),
            ..Default::default()
        }
    }

    fn rate_limited() -> Failure {
        Failure::RateLimited {
            body: "Too Many".to_string(),
            rate_limit: None,
        }
    }

    #[test]
    fn test_zero_retries_gives_up_immediately() {
        let mut state = RetryState::new(&config(0));
        match state.next(rate_limited()) {
            Decision::GiveUp(Error::RateLimited { attempts, body, .. }) => {
                assert_eq!(attempts, 1);
                assert_eq!(body, "Too Many");
            }
            other => panic!("Expected GiveUp, got {:?}", other),
        }
    }

    #[test]
    fn test_retries_until_budget_spent() {
        let mut state = RetryState::new(&config(3));
        let mut delays = Vec::new();

        loop {
            match state.next(rate_limited()) {
                Decision::Retry(delay) => delays.push(delay),
                Decision::GiveUp(err) => {
                    assert_eq!(err.attempts(), Some(4));
                    break;
                }
            }
        }

        assert_eq!(delays.len(), 3);
        assert!(delays[0] >= Duration::from_millis(10) && delays[0] < Duration::from_millis(15));
        assert!(delays[1] >= Duration::from_millis(20) && delays[1] < Duration::from_millis(30));
        assert!(delays[2] >= Duration::from_millis(25));
        assert_eq!(state.attempt(), 3);
    }

    #[test]
    fn test_interpret_success_passes_body_through() {
        let body = r#"{"word": "canis", "definitions": ["dog"], "extra": 1}"#;
        let response = interpret::<Value>(
            StatusCode::OK,
            HeaderMap::new(),
            body.to_string(),
            Duration::from_millis(3),
            2,
        )
        .unwrap();

        assert_eq!(
            response.data,
            json!({"word": "canis", "definitions": ["dog"], "extra": 1})
        );
        assert_eq!(response.raw_body, body);
        assert_eq!(response.attempts, 2);
    }

    #[test]
    fn test_interpret_scalar_body() {
        let response = interpret::<Value>(
            StatusCode::OK,
            HeaderMap::new(),
            "42".to_string(),
            Duration::ZERO,
            1,
        )
        .unwrap();
        assert_eq!(response.data, json!(42));
    }

    #[test]
    fn test_interpret_429_is_retryable() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("3"));

        let result = interpret::<Value>(
            StatusCode::TOO_MANY_REQUESTS,
            headers,
            String::new(),
            Duration::ZERO,
            1,
        );

        match result {
            Err(AttemptError::Retryable(Failure::RateLimited { body, rate_limit })) => {
                assert_eq!(body, DEFAULT_RATE_LIMIT_BODY);
                assert_eq!(
                    rate_limit.and_then(|info| info.retry_after),
                    Some(Duration::from_secs(3))
                );
            }
            other => panic!("Expected retryable rate limit, got {:?}", other),
        }
    }

    #[test]
    fn test_interpret_errors_are_terminal() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            let result = interpret::<Value>(
                status,
                HeaderMap::new(),
                "Internal Error".to_string(),
                Duration::ZERO,
                1,
            );
            match result {
                Err(AttemptError::Terminal(Error::Api { status: got, body })) => {
                    assert_eq!(got, status);
                    assert_eq!(body, "Internal Error");
                }
                other => panic!("Expected terminal Api error for {}, got {:?}", status, other),
            }
        }
    }

    #[test]
    fn test_interpret_bad_json() {
        let result = interpret::<Value>(
            StatusCode::OK,
            HeaderMap::new(),
            "invalid json".to_string(),
            Duration::ZERO,
            1,
        );
        assert!(matches!(
            result,
            Err(AttemptError::Terminal(Error::Deserialization { .. }))
        ));
    }
}
