//! Successful responses.
//!
//! [`Response`] carries the parsed body together with the HTTP details of the
//! attempt that succeeded and how many attempts the call took.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful response from the dictionary service.
///
/// Dereferences to the parsed body, so fields of the body can be used
/// directly.
///
/// # Examples
///
/// ```no_run
/// use latindictionary::Client;
///
/// # async fn example() -> Result<(), latindictionary::Error> {
/// let client = Client::new()?;
/// let response = client.latin_to_english("canis").await?;
///
/// println!("word: {:?}", response.get("word"));
/// println!("took {:?} over {} attempt(s)", response.latency, response.attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The parsed response body.
    pub data: T,

    /// The response body exactly as received.
    pub raw_body: String,

    /// The HTTP status of the successful attempt.
    pub status: StatusCode,

    /// The headers of the successful attempt.
    pub headers: HeaderMap,

    /// Time from the first attempt until the body was read, including
    /// backoff waits.
    pub latency: Duration,

    /// Total attempts made; `1` when the first attempt succeeded.
    pub attempts: usize,
}

impl<T> Response<T> {
    /// Creates a new response.
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
        attempts: usize,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
            attempts,
        }
    }

    /// Transforms the body while keeping the response details.
    ///
    /// ```
    /// # use latindictionary::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response::new(
    ///     serde_json::json!({"word": "canis"}),
    ///     r#"{"word":"canis"}"#.to_string(),
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(20),
    ///     1,
    /// );
    ///
    /// let word = response.map(|v| v["word"].as_str().unwrap_or_default().to_string());
    /// assert_eq!(word.data, "canis");
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
            attempts: self.attempts,
        }
    }

    /// Returns the parsed body, dropping the response details.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Returns `true` if the call needed more than one attempt.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
