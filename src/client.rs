//! Asynchronous client.
//!
//! [`Client`] is the main entry point. Configure it with [`ClientBuilder`];
//! for synchronous code use [`blocking::Client`](crate::blocking::Client),
//! which follows the same retry policy.

use crate::{
    blocking, endpoint,
    models::{AutoDetectResponse, InflectionTableResponse, LatinParseResponse, TranslationResponse},
    policy::{self, AttemptError, Decision, Failure, RetryState},
    Backoff, ClientConfig, Error, InflectionTableOptions, LatinParseOptions, Request, Response,
    Result,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// An asynchronous client for the latindictionary.io API.
///
/// Cloning is cheap and clones share one connection pool. Transient failures
/// (connection errors, timeouts, HTTP 429) are retried with exponential
/// backoff; any other status >= 400 fails at once.
///
/// # Examples
///
/// ```no_run
/// use latindictionary::{Client, LatinParseOptions};
///
/// # async fn example() -> Result<(), latindictionary::Error> {
/// let client = Client::new()?;
///
/// let canis = client.latin_to_english("canis").await?;
/// println!("{:?}", canis.get("definitions"));
///
/// let parsed = client
///     .latin_parse("Gallia est omnis divisa", &LatinParseOptions::new().max_alternates(2))
///     .await?;
/// println!("{} token(s)", parsed.tokens().map(Vec::len).unwrap_or_default());
///
/// client.close();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.inner.config)
            .finish()
    }
}

impl Client {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new `ClientBuilder`.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client configured from `LATINDICTIONARY_*` environment
    /// variables. See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let config = config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(base_url = %config.base_url, "Created client");

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                config,
            }),
        })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Releases this handle on the connection pool.
    ///
    /// Dropping the client does the same; the pool closes once the last
    /// clone is gone.
    pub fn close(self) {
        tracing::debug!(base_url = %self.inner.config.base_url, "Closing client");
    }

    /// Executes a GET request with retries and parses the body as `T`.
    ///
    /// Use `serde_json::Value` for `T` to accept any JSON body.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use latindictionary::{Client, Request};
    ///
    /// # async fn example() -> Result<(), latindictionary::Error> {
    /// let client = Client::new()?;
    /// let request = Request::new("inflection-table").with_query("lemma", "amo");
    /// let table = client.request::<serde_json::Value>(&request).await?;
    /// println!("{}", table.raw_body);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request<T>(&self, request: &Request) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let url = endpoint::request_url(&self.inner.config.base_url, request)?;
        let start = Instant::now();
        let mut retry = RetryState::new(&self.inner.config);

        loop {
            match self.attempt(&url, &retry, start).await {
                Ok(response) => return Ok(response),
                Err(AttemptError::Terminal(e)) => return Err(e),
                Err(AttemptError::Retryable(failure)) => match retry.next(failure) {
                    Decision::Retry(delay) => tokio::time::sleep(delay).await,
                    Decision::GiveUp(e) => return Err(e),
                },
            }
        }
    }

    /// Makes a GET request to `path` relative to the base URL.
    ///
    /// The path is sent as given; it is not percent-encoded.
    pub async fn get<T>(&self, path: impl Into<String>) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        self.request(&Request::new(path)).await
    }

    async fn attempt<T>(
        &self,
        url: &Url,
        retry: &RetryState,
        start: Instant,
    ) -> std::result::Result<Response<T>, AttemptError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(url = %url, attempt = retry.attempt(), "Executing HTTP request");

        let response = self
            .inner
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(Failure::transport)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(Failure::transport)?;

        policy::interpret(status, headers, body, start.elapsed(), retry.attempts())
    }

    /// Looks up a Latin word and returns its English definitions.
    pub async fn latin_to_english(&self, word: &str) -> Result<Response<TranslationResponse>> {
        self.request(&Request::latin_to_english(word)?).await
    }

    /// Looks up an English word and returns Latin equivalents.
    pub async fn english_to_latin(&self, word: &str) -> Result<Response<TranslationResponse>> {
        self.request(&Request::english_to_latin(word)?).await
    }

    /// Detects the language of `text` and translates it.
    pub async fn auto_detect(&self, text: &str) -> Result<Response<AutoDetectResponse>> {
        self.request(&Request::auto_detect(text)?).await
    }

    /// Parses Latin text with the service's AI parser.
    pub async fn latin_parse(
        &self,
        text: &str,
        options: &LatinParseOptions,
    ) -> Result<Response<LatinParseResponse>> {
        self.request(&Request::latin_parse(text, options)?).await
    }

    /// Returns the inflection table for a dictionary form.
    pub async fn inflection_table(
        &self,
        lemma: &str,
        options: &InflectionTableOptions,
    ) -> Result<Response<InflectionTableResponse>> {
        self.request(&Request::inflection_table(lemma, options)?).await
    }
}

/// Builder for [`Client`] and [`blocking::Client`].
///
/// # Examples
///
/// ```no_run
/// use latindictionary::{Backoff, Client};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), latindictionary::Error> {
/// let client = Client::builder()
///     .base_url("https://api.latindictionary.io/api/v1")?
///     .timeout(Duration::from_secs(10))
///     .max_retries(5)
///     .backoff(Backoff::new(Duration::from_millis(500), Duration::from_secs(10)))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration, e.g. [`ClientConfig::from_env`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the service root. A trailing slash is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        Url::parse(url.as_ref())?;
        self.config.base_url = url.as_ref().to_string();
        Ok(self)
    }

    /// Sets the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets how many times a transient failure is retried.
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Sets the delay policy between attempts.
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.config.backoff = backoff;
        self
    }

    /// Sets the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Builds an asynchronous [`Client`].
    pub fn build(self) -> Result<Client> {
        Client::with_config(self.config)
    }

    /// Builds a [`blocking::Client`].
    ///
    /// Must not be called from within an async runtime.
    pub fn build_blocking(self) -> Result<blocking::Client> {
        blocking::Client::with_config(self.config)
    }
}
