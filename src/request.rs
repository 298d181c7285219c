//! Request descriptors and per-endpoint options.
//!
//! Both clients turn their endpoint methods into a [`Request`] through the
//! constructors here, so argument validation and parameter naming live in
//! one place.

use crate::{
    endpoint::{encode_path_segment, QueryParams},
    Error, Result,
};

/// A single logical GET request: a path relative to the base URL plus
/// query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Path relative to the base URL. Leading slashes are ignored.
    pub path: String,

    /// Query parameters. Only values the caller actually set are present.
    pub query: QueryParams,
}

impl Request {
    /// Creates a request for `path` with no query parameters.
    ///
    /// The path is used as given; encode user-supplied segments with
    /// [`encode_path_segment`] first.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: QueryParams::new(),
        }
    }

    /// Adds a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push(name, value);
        self
    }

    /// Adds a query parameter if `value` is `Some`.
    pub fn with_optional_query<V: ToString>(
        mut self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        self.query.push_opt(name, value);
        self
    }

    /// `GET la-to-en/{word}`
    pub fn latin_to_english(word: &str) -> Result<Self> {
        Ok(Self::new(format!("la-to-en/{}", segment("word", word)?)))
    }

    /// `GET en-to-la/{word}`
    pub fn english_to_latin(word: &str) -> Result<Self> {
        Ok(Self::new(format!("en-to-la/{}", segment("word", word)?)))
    }

    /// `GET auto-detect/{text}`
    pub fn auto_detect(text: &str) -> Result<Self> {
        Ok(Self::new(format!("auto-detect/{}", segment("text", text)?)))
    }

    /// `GET latin-parse?q={text}&...`
    pub fn latin_parse(text: &str, options: &LatinParseOptions) -> Result<Self> {
        Ok(Self::new("latin-parse")
            .with_query("q", require("text", text)?)
            .with_optional_query("model", options.model.as_deref())
            .with_optional_query("max_candidates_per_token", options.max_candidates_per_token)
            .with_optional_query("max_alternates", options.max_alternates)
            .with_optional_query("allow_fallback", options.allow_fallback))
    }

    /// `GET inflection-table?lemma={lemma}&...`
    pub fn inflection_table(lemma: &str, options: &InflectionTableOptions) -> Result<Self> {
        Ok(Self::new("inflection-table")
            .with_query("lemma", require("lemma", lemma)?)
            .with_optional_query("entry_id", options.entry_id.as_deref())
            .with_optional_query("max_entries", options.max_entries)
            .with_optional_query("include_periphrastic", options.include_periphrastic))
    }
}

fn require<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::InputValidation(format!("{} must not be empty", name)));
    }
    Ok(value)
}

/// Validates and encodes a value sent as a single path segment.
fn segment(name: &str, value: &str) -> Result<String> {
    // "." and ".." would be resolved away by URL parsing, escaped or not
    if matches!(require(name, value)?, "." | "..") {
        return Err(Error::InputValidation(format!(
            "{} must not be a dot segment: {:?}",
            name, value
        )));
    }
    Ok(encode_path_segment(value))
}

/// Optional parameters for the `latin-parse` endpoint.
///
/// Fields left as `None` are not sent.
///
/// ```
/// use latindictionary::LatinParseOptions;
///
/// let options = LatinParseOptions::new()
///     .model("default")
///     .max_candidates_per_token(3)
///     .allow_fallback(true);
/// assert_eq!(options.max_alternates, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatinParseOptions {
    /// Model identifier.
    pub model: Option<String>,
    /// Maximum candidate analyses returned per token.
    pub max_candidates_per_token: Option<u32>,
    /// Maximum alternate parses returned.
    pub max_alternates: Option<u32>,
    /// Whether the service may fall back to a non-AI parse.
    pub allow_fallback: Option<bool>,
}

impl LatinParseOptions {
    /// Creates options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the maximum candidates per token.
    pub fn max_candidates_per_token(mut self, max: u32) -> Self {
        self.max_candidates_per_token = Some(max);
        self
    }

    /// Sets the maximum number of alternate parses.
    pub fn max_alternates(mut self, max: u32) -> Self {
        self.max_alternates = Some(max);
        self
    }

    /// Sets whether a non-AI fallback parse is allowed.
    pub fn allow_fallback(mut self, allow: bool) -> Self {
        self.allow_fallback = Some(allow);
        self
    }
}

/// Optional parameters for the `inflection-table` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InflectionTableOptions {
    /// Dictionary entry ID, for disambiguating homographs.
    pub entry_id: Option<String>,
    /// Maximum number of entries returned.
    pub max_entries: Option<u32>,
    /// Whether periphrastic forms are included.
    pub include_periphrastic: Option<bool>,
}

impl InflectionTableOptions {
    /// Creates options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects one dictionary entry by ID.
    pub fn entry_id(mut self, entry_id: impl Into<String>) -> Self {
        self.entry_id = Some(entry_id.into());
        self
    }

    /// Sets the maximum number of entries.
    pub fn max_entries(mut self, max: u32) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// Sets whether periphrastic forms are included.
    pub fn include_periphrastic(mut self, include: bool) -> Self {
        self.include_periphrastic = Some(include);
        self
    }
}
