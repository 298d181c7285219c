//! Blocking client.
//!
//! Same endpoints and retry policy as the async [`Client`](crate::Client),
//! but every call holds the calling thread until it finishes, including the
//! backoff waits. Do not use it from inside an async runtime.

use crate::{
    endpoint,
    models::{AutoDetectResponse, InflectionTableResponse, LatinParseResponse, TranslationResponse},
    policy::{self, AttemptError, Decision, Failure, RetryState},
    ClientBuilder, ClientConfig, Error, InflectionTableOptions, LatinParseOptions, Request,
    Response, Result,
};
use serde::de::DeserializeOwned;
use std::time::Instant;
use url::Url;

/// A blocking client for the latindictionary.io API.
///
/// # Examples
///
/// ```no_run
/// use latindictionary::blocking::Client;
///
/// # fn example() -> Result<(), latindictionary::Error> {
/// let client = Client::new()?;
/// let response = client.english_to_latin("dog")?;
/// println!("{}", response.raw_body);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    http_client: reqwest::blocking::Client,
    config: ClientConfig,
}

impl Client {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new [`ClientBuilder`]; finish it with
    /// [`build_blocking`](ClientBuilder::build_blocking).
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client configured from `LATINDICTIONARY_*` environment
    /// variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Creates a client from an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let config = config.validate()?;

        let http_client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(base_url = %config.base_url, "Created blocking client");

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Closes the client and its connection pool.
    pub fn close(self) {
        tracing::debug!(base_url = %self.config.base_url, "Closing blocking client");
    }

    /// Executes a GET request with retries and parses the body as `T`.
    pub fn request<T>(&self, request: &Request) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let url = endpoint::request_url(&self.config.base_url, request)?;
        let start = Instant::now();
        let mut retry = RetryState::new(&self.config);

        loop {
            match self.attempt(&url, &retry, start) {
                Ok(response) => return Ok(response),
                Err(AttemptError::Terminal(e)) => return Err(e),
                Err(AttemptError::Retryable(failure)) => match retry.next(failure) {
                    Decision::Retry(delay) => std::thread::sleep(delay),
                    Decision::GiveUp(e) => return Err(e),
                },
            }
        }
    }

    /// Makes a GET request to `path` relative to the base URL.
    pub fn get<T>(&self, path: impl Into<String>) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        self.request(&Request::new(path))
    }

    fn attempt<T>(
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
            .http_client
            .get(url.clone())
            .send()
            .map_err(Failure::transport)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().map_err(Failure::transport)?;

        policy::interpret(status, headers, body, start.elapsed(), retry.attempts())
    }

    /// Looks up a Latin word and returns its English definitions.
    pub fn latin_to_english(&self, word: &str) -> Result<Response<TranslationResponse>> {
        self.request(&Request::latin_to_english(word)?)
    }

    /// Looks up an English word and returns Latin equivalents.
    pub fn english_to_latin(&self, word: &str) -> Result<Response<TranslationResponse>> {
        self.request(&Request::english_to_latin(word)?)
    }

    /// Detects the language of `text` and translates it.
    pub fn auto_detect(&self, text: &str) -> Result<Response<AutoDetectResponse>> {
        self.request(&Request::auto_detect(text)?)
    }

    /// Parses Latin text with the service's AI parser.
    pub fn latin_parse(
        &self,
        text: &str,
        options: &LatinParseOptions,
    ) -> Result<Response<LatinParseResponse>> {
        self.request(&Request::latin_parse(text, options)?)
    }

    /// Returns the inflection table for a dictionary form.
    pub fn inflection_table(
        &self,
        lemma: &str,
        options: &InflectionTableOptions,
    ) -> Result<Response<InflectionTableResponse>> {
        self.request(&Request::inflection_table(lemma, options)?)
    }
}
