//! URL construction: joining paths onto the base URL, encoding path
//! segments, and query parameter sets.

use crate::{request::Request, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Everything except ASCII alphanumerics and the RFC 3986 unreserved marks.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Joins `base` and `path` with exactly one slash.
///
/// All trailing slashes of `base` and leading slashes of `path` are dropped;
/// slashes inside either part are kept.
///
/// # Examples
///
/// ```
/// use latindictionary::endpoint::build_url;
///
/// let base = "https://api.latindictionary.io/api/v1";
/// assert_eq!(build_url(base, "la-to-en/canis"), format!("{base}/la-to-en/canis"));
/// assert_eq!(build_url("https://x.test/v1/", "/la-to-en"), "https://x.test/v1/la-to-en");
/// ```
pub fn build_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-encodes a single path segment.
///
/// Spaces, non-ASCII letters, `/`, `?`, `#` and other reserved characters are
/// all escaped, so a looked-up word can never change the shape of the path.
/// The one exception is a segment that is exactly `.` or `..`: URL parsing
/// resolves those away whether escaped or not, so
/// [`Request`](crate::Request) rejects them before encoding.
///
/// ```
/// use latindictionary::endpoint::encode_path_segment;
///
/// assert_eq!(encode_path_segment("rosa rosae"), "rosa%20rosae");
/// assert_eq!(encode_path_segment("a/b?"), "a%2Fb%3F");
/// assert_eq!(encode_path_segment("e.g."), "e.g.");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Ordered query parameters. Unset optional values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl ToString) {
        self.pairs.push((name.into(), value.to_string()));
    }

    /// Appends a parameter only when `value` is `Some`.
    pub fn push_opt<V: ToString>(&mut self, name: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    /// Returns the value of the first parameter named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if a parameter named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Builds the absolute URL for `request` under `base`.
pub(crate) fn request_url(base: &str, request: &Request) -> Result<Url> {
    let mut url = Url::parse(&build_url(base, &request.path))?;

    // query_pairs_mut on an empty set would leave a dangling `?`
    if !request.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in request.query.iter() {
            pairs.append_pair(name, value);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.latindictionary.io/api/v1";

    #[test]
    fn test_build_url_slash_combinations() {
        let expected = format!("{}/la-to-en/canis", BASE);
        for base in [BASE.to_string(), format!("{}/", BASE), format!("{}///", BASE)] {
            for path in ["la-to-en/canis", "/la-to-en/canis", "//la-to-en/canis"] {
                assert_eq!(build_url(&base, path), expected, "{} + {}", base, path);
            }
        }
    }

    #[test]
    fn test_build_url_keeps_trailing_path_slash() {
        assert_eq!(
            build_url(BASE, "/inflection-table/"),
            format!("{}/inflection-table/", BASE)
        );
    }

    #[test]
    fn test_build_url_no_double_slash() {
        let url = build_url(&format!("{}/", BASE), "/la-to-en/canis");
        assert!(!url.trim_start_matches("https://").contains("//"));
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("canis"), "canis");
        assert_eq!(encode_path_segment("amō"), "am%C5%8D");
        assert_eq!(encode_path_segment("Gallia est"), "Gallia%20est");
        assert_eq!(encode_path_segment("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode_path_segment("quid?#&"), "quid%3F%23%26");
    }

    #[test]
    fn test_dot_segments_are_resolved_by_url_parsing() {
        // Escaping does not help; the lookup constructors reject these
        for (segment, resolved) in [
            (".", "/api/v1/la-to-en/"),
            ("%2E", "/api/v1/la-to-en/"),
            ("..", "/api/v1/"),
            ("%2e%2E", "/api/v1/"),
        ] {
            let url = request_url(BASE, &Request::new(format!("la-to-en/{}", segment))).unwrap();
            assert_eq!(url.path(), resolved, "{}", segment);
        }

        let url = request_url(BASE, &Request::latin_to_english("...").unwrap()).unwrap();
        assert_eq!(url.path(), "/api/v1/la-to-en/...");
    }

    #[test]
    fn test_query_params_skip_unset() {
        let mut params = QueryParams::new();
        params.push("q", "Gallia");
        params.push_opt("model", None::<String>);
        params.push_opt("max_alternates", Some(2));
        params.push_opt("allow_fallback", Some(false));

        assert_eq!(params.len(), 3);
        assert!(!params.contains("model"));
        assert_eq!(params.get("max_alternates"), Some("2"));
        assert_eq!(params.get("allow_fallback"), Some("false"));
    }

    #[test]
    fn test_request_url_appends_query() {
        let request = Request::new("latin-parse").with_query("q", "Gallia est");
        let url = request_url(BASE, &request).unwrap();
        assert_eq!(url.path(), "/api/v1/latin-parse");
        assert_eq!(url.query(), Some("q=Gallia+est"));
    }

    #[test]
    fn test_request_url_without_query() {
        let request = Request::new("/la-to-en/canis");
        let url = request_url(&format!("{}/", BASE), &request).unwrap();
        assert_eq!(url.as_str(), format!("{}/la-to-en/canis", BASE));
        assert_eq!(url.query(), None);
    }
}
