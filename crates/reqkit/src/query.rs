//! Typed query-string list parsing.
//!
//! Values like `key=1,2,3` are split on a separator and parsed lazily into a
//! target type. Tokens that fail to parse are skipped rather than aborting
//! the whole request.

use crate::{ExtractError, ExtractSource, RequestContext};
use std::marker::PhantomData;
use std::str::FromStr;

/// Default separator for list-valued query parameters.
const DEFAULT_SEPARATOR: &str = ",";

impl RequestContext {
    /// Returns the raw decoded value of a query parameter.
    ///
    /// Repeated keys are joined with `,`, matching how multi-valued query
    /// collections stringify in the frameworks this library mirrors. Returns
    /// `None` when the key is absent.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<String> {
        let query = self.query_string()?;
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;

        let mut values = pairs
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .peekable();

        values.peek()?;
        Some(values.collect::<Vec<_>>().join(","))
    }

    /// Parses a list-valued query parameter into a lazy typed sequence.
    ///
    /// The raw value is split on `separator` and each token is parsed via
    /// [`FromStr`] on demand. Unparseable tokens are silently skipped. A
    /// missing key or empty value yields an empty sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use http::{Method, Uri};
    /// use reqkit::RequestContext;
    ///
    /// let ctx = RequestContext::builder()
    ///     .method(Method::GET)
    ///     .uri(Uri::from_static("/items?ids=1;sdf;3"))
    ///     .build();
    ///
    /// let ids: Vec<i64> = ctx.parse_list("ids", ";").unwrap().collect();
    /// assert_eq!(ids, vec![1, 3]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when `key` is empty.
    pub fn parse_list<T: FromStr>(
        &self,
        key: &str,
        separator: &str,
    ) -> Result<QueryList<T>, ExtractError> {
        if key.is_empty() {
            return Err(ExtractError::invalid_argument(
                ExtractSource::Query,
                "queryKey",
                "must not be empty",
            ));
        }

        let raw = self.query_value(key).unwrap_or_default();
        Ok(QueryList::new(raw, separator))
    }

    /// Parses a comma-separated list of integers from the query string.
    ///
    /// The expected format is `key=1,2`. Non-integer tokens are skipped.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when `key` is empty.
    pub fn integer_list(&self, key: &str) -> Result<QueryList<i64>, ExtractError> {
        self.parse_list(key, DEFAULT_SEPARATOR)
    }

    /// Parses a comma-separated list of doubles from the query string.
    ///
    /// The expected format is `key=1.2,1.1`. Parsing is locale-invariant:
    /// `1.1` is one-point-one on every host. Non-numeric tokens are skipped.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when `key` is empty.
    pub fn double_list(&self, key: &str) -> Result<QueryList<f64>, ExtractError> {
        self.parse_list(key, DEFAULT_SEPARATOR)
    }

    /// Parses a comma-separated list of strings from the query string.
    ///
    /// The expected format is `key=str1,str2`. Every token is produced
    /// verbatim, including empty ones.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when `key` is empty.
    pub fn string_list(&self, key: &str) -> Result<QueryList<String>, ExtractError> {
        self.parse_list(key, DEFAULT_SEPARATOR)
    }
}

/// Lazy, single-pass sequence of typed query-string tokens.
///
/// Tokens are split and parsed only as the iterator advances; tokens whose
/// parse fails are dropped without terminating the sequence. Order follows
/// the raw value.
#[derive(Debug, Clone)]
pub struct QueryList<T> {
    raw: String,
    separator: String,
    pos: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> QueryList<T> {
    pub(crate) fn new(raw: String, separator: &str) -> Self {
        // An empty raw value is an empty sequence, not one empty token.
        let pos = if raw.is_empty() { 1 } else { 0 };
        Self {
            raw,
            separator: separator.to_string(),
            pos,
            _marker: PhantomData,
        }
    }
}

impl<T: FromStr> Iterator for QueryList<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if self.pos > self.raw.len() {
                return None;
            }

            let rest = &self.raw[self.pos..];
            let token = if self.separator.is_empty() {
                // Degenerate separator: the whole value is a single token.
                self.pos = self.raw.len() + 1;
                rest
            } else if let Some(at) = rest.find(self.separator.as_str()) {
                self.pos += at + self.separator.len();
                &rest[..at]
            } else {
                self.pos = self.raw.len() + 1;
                rest
            };

            if let Ok(value) = token.parse::<T>() {
                return Some(value);
            }
        }
    }
}
