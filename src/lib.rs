//! # latindictionary - a client for the latindictionary.io API
//!
//! Async and blocking clients for the latindictionary.io REST service: Latin
//! and English word lookup, language auto-detection, AI-assisted parsing and
//! inflection tables. Built on `reqwest`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use latindictionary::{Client, InflectionTableOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), latindictionary::Error> {
//!     let client = Client::new()?;
//!
//!     let canis = client.latin_to_english("canis").await?;
//!     println!("canis: {:?}", canis.get("definitions"));
//!
//!     let amo = client
//!         .inflection_table("amo", &InflectionTableOptions::new().max_entries(1))
//!         .await?;
//!     let entries = amo.entries().map(Vec::len).unwrap_or(0);
//!     println!("{} entr(ies) after {} attempt(s)", entries, amo.attempts);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Retries
//!
//! Every call is one logical GET. Connection failures, timeouts and HTTP 429
//! are retried up to `max_retries` times (default 3) with exponential backoff:
//! `min(1s * 2^attempt, 30s)` plus up to 50% random jitter. Any other error
//! status is returned at once as [`Error::Api`]. When the retries run out,
//! the last failure is returned as [`Error::Connection`], [`Error::Timeout`]
//! or [`Error::RateLimited`].
//!
//! ```no_run
//! use latindictionary::{Backoff, Client, Error};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Error> {
//! let client = Client::builder()
//!     .timeout(Duration::from_secs(10))
//!     .max_retries(5)
//!     .backoff(Backoff::new(Duration::from_millis(250), Duration::from_secs(8)))
//!     .build()?;
//!
//! match client.auto_detect("amor").await {
//!     Ok(response) => println!("language: {:?}", response.language()),
//!     Err(Error::RateLimited { attempts, rate_limit, .. }) => {
//!         eprintln!("still rate limited after {} attempts: {:?}", attempts, rate_limit);
//!     }
//!     Err(e) => eprintln!("lookup failed: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Blocking
//!
//! ```no_run
//! let client = latindictionary::blocking::Client::new()?;
//! let dog = client.english_to_latin("dog")?;
//! println!("{}", dog.raw_body);
//! # Ok::<(), latindictionary::Error>(())
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (attempts at debug, responses and retries
//! at info, failed attempts at warn) and never installs a subscriber.

mod backoff;
pub mod blocking;
mod client;
mod config;
pub mod endpoint;
mod error;
pub mod models;
mod policy;
pub mod rate_limit;
mod request;
mod response;

pub use backoff::{calculate_backoff, Backoff, DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY};
pub use client::{Client, ClientBuilder};
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT, ENV_BASE_URL,
    ENV_MAX_RETRIES, ENV_TIMEOUT_SECS,
};
pub use error::{Error, ErrorKind, Result, DEFAULT_RATE_LIMIT_BODY};
pub use models::{
    AutoDetectResponse, InflectionTableResponse, LatinParseResponse, TranslationResponse,
};
pub use request::{InflectionTableOptions, LatinParseOptions, Request};
pub use response::Response;
