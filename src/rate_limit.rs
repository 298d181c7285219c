//! Rate limit headers of HTTP 429 responses.
//!
//! The retry delay is always taken from [`Backoff`](crate::Backoff); the
//! parsed headers are attached to [`Error::RateLimited`](crate::Error) so a
//! caller can decide how long to stay away once the client has given up.

use http::HeaderMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rate limit information parsed from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// From `Retry-After`, either delay-seconds or an HTTP date.
    pub retry_after: Option<Duration>,

    /// From `X-RateLimit-Reset` or `RateLimit-Reset` (Unix seconds).
    pub reset_at: Option<SystemTime>,

    /// From `X-RateLimit-Remaining`.
    pub remaining: Option<u64>,
}

impl RateLimitInfo {
    /// Parses the rate limit headers present in `headers`.
    ///
    /// Returns `None` when none of them are present or parsable.
    ///
    /// ```
    /// use latindictionary::rate_limit::RateLimitInfo;
    /// use http::HeaderMap;
    /// use std::time::Duration;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("retry-after", "60".parse().unwrap());
    ///
    /// let info = RateLimitInfo::from_headers(&headers).unwrap();
    /// assert_eq!(info.retry_after, Some(Duration::from_secs(60)));
    /// assert!(RateLimitInfo::from_headers(&HeaderMap::new()).is_none());
    /// ```
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let info = Self {
            retry_after: parse_retry_after(headers),
            reset_at: parse_reset(headers),
            remaining: header_str(headers, "x-ratelimit-remaining").and_then(|v| v.parse().ok()),
        };

        if info == Self::default() {
            None
        } else {
            Some(info)
        }
    }

    /// Returns how long the server asked callers to wait, capped at `max_wait`.
    ///
    /// `Retry-After` wins over the reset timestamp. A reset time already in
    /// the past yields `None`.
    pub fn wait_hint(&self, max_wait: Duration) -> Option<Duration> {
        if let Some(retry_after) = self.retry_after {
            return Some(retry_after.min(max_wait));
        }

        let until_reset = self.reset_at?.duration_since(SystemTime::now()).ok()?;
        Some(until_reset.min(max_wait))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok().map(str::trim)
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = header_str(headers, "retry-after")?;

    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date = httpdate::parse_http_date(value).ok()?;
    Some(date.duration_since(SystemTime::now()).unwrap_or(Duration::ZERO))
}

fn parse_reset(headers: &HeaderMap) -> Option<SystemTime> {
    ["x-ratelimit-reset", "ratelimit-reset"]
        .into_iter()
        .find_map(|name| header_str(headers, name)?.parse::<u64>().ok())
        .map(|timestamp| UNIX_EPOCH + Duration::from_secs(timestamp))
}
