//! Pagination parameter resolution.
//!
//! Reads a page index and page size from the query string, substitutes
//! defaults for absent or unparseable values, clamps the size, and produces
//! a validated [`PaginationData`].

use crate::{ExtractError, ExtractSource, FromRequest, RequestContext};
use serde::Serialize;

/// Default page index when the query parameter is absent or unparseable.
const DEFAULT_PAGE_INDEX: i64 = 1;
/// Default page size when the query parameter is absent or unparseable.
const DEFAULT_PAGE_SIZE: i64 = 20;
/// Default upper bound applied to the resolved page size.
const DEFAULT_MAX_PAGE_SIZE: i64 = 20;

/// A validated page index/size pair.
///
/// Immutable value object with field equality. The zero-based record offset
/// is derived as `(index - 1) * size` and deliberately not clamped: callers
/// passing `index == 0` get `-size`. Whether the index is zero- or one-based
/// is a caller convention this type does not arbitrate.
///
/// # Example
///
/// ```rust
/// use reqkit::PaginationData;
///
/// let page = PaginationData::new(2, 20).unwrap();
/// assert_eq!(page.offset(), 20);
///
/// assert!(PaginationData::new(-1, 20).is_err());
/// assert!(PaginationData::new(1, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PaginationData {
    index: i64,
    size: i64,
}

impl PaginationData {
    /// Creates a pagination pair.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when `index < 0` or `size < 1`.
    pub fn new(index: i64, size: i64) -> Result<Self, ExtractError> {
        if index < 0 {
            return Err(ExtractError::invalid_argument(
                ExtractSource::Other,
                "index",
                "page index must not be negative",
            ));
        }
        if size < 1 {
            return Err(ExtractError::invalid_argument(
                ExtractSource::Other,
                "size",
                "page size must be at least 1",
            ));
        }

        Ok(Self { index, size })
    }

    /// Returns the page index.
    #[must_use]
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Returns the page size.
    #[must_use]
    pub fn size(&self) -> i64 {
        self.size
    }

    /// Returns the zero-based record offset, `(index - 1) * size`.
    ///
    /// Saturates at `i64::MAX` for indices large enough to overflow;
    /// the index comes straight from the query string and is only
    /// bounded below.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.index - 1).saturating_mul(self.size)
    }
}

impl FromRequest for PaginationData {
    fn from_request(ctx: &RequestContext) -> Result<Self, ExtractError> {
        ctx.pagination()
    }
}

/// Parameter names and bounds used when resolving pagination.
#[derive(Debug, Clone)]
pub struct PaginationParams {
    index_param: String,
    size_param: String,
    max_size: i64,
}

impl PaginationParams {
    /// Creates parameters with the default names and maximum size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            index_param: "pageIndex".to_string(),
            size_param: "pageSize".to_string(),
            max_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Sets the name of the query parameter holding the page index.
    #[must_use]
    pub fn index_param(mut self, name: impl Into<String>) -> Self {
        self.index_param = name.into();
        self
    }

    /// Sets the name of the query parameter holding the page size.
    #[must_use]
    pub fn size_param(mut self, name: impl Into<String>) -> Self {
        self.size_param = name.into();
        self
    }

    /// Sets the upper bound applied to the resolved page size.
    #[must_use]
    pub fn max_size(mut self, max_size: i64) -> Self {
        self.max_size = max_size;
        self
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestContext {
    /// Resolves pagination from the query string with default parameters.
    ///
    /// Equivalent to [`pagination_with`](Self::pagination_with) using
    /// `pageIndex` / `pageSize` and a maximum size of 20.
    ///
    /// # Errors
    ///
    /// See [`pagination_with`](Self::pagination_with).
    pub fn pagination(&self) -> Result<PaginationData, ExtractError> {
        self.pagination_with(&PaginationParams::new())
    }

    /// Resolves pagination from the query string.
    ///
    /// Absent or unparseable parameters fall back to index 1 and size 20.
    /// A resolved size above `max_size` is clamped down to it; no lower
    /// bound is applied beyond what [`PaginationData::new`] enforces.
    ///
    /// # Example
    ///
    /// ```rust
    /// use http::{Method, Uri};
    /// use reqkit::{PaginationParams, RequestContext};
    ///
    /// let ctx = RequestContext::builder()
    ///     .method(Method::GET)
    ///     .uri(Uri::from_static("/users?pageIndex=3&pageSize=200"))
    ///     .build();
    ///
    /// let page = ctx.pagination().unwrap();
    /// assert_eq!(page.index(), 3);
    /// assert_eq!(page.size(), 20); // clamped
    ///
    /// let page = ctx
    ///     .pagination_with(&PaginationParams::new().max_size(500))
    ///     .unwrap();
    /// assert_eq!(page.size(), 200);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when the resolved values are out of
    /// range, which with the stated defaults only happens for a caller
    /// supplied non-positive `max_size`.
    pub fn pagination_with(&self, params: &PaginationParams) -> Result<PaginationData, ExtractError> {
        let index = self.query_integer_or(&params.index_param, DEFAULT_PAGE_INDEX);
        let mut size = self.query_integer_or(&params.size_param, DEFAULT_PAGE_SIZE);

        if size > params.max_size {
            size = params.max_size;
        }

        PaginationData::new(index, size)
    }

    fn query_integer_or(&self, key: &str, default: i64) -> i64 {
        self.query_value(key)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(default)
    }
}
