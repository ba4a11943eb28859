//! # reqkit
//!
//! Request parsing and validation helpers for HTTP handler code.
//!
//! This crate is a small library of extension-style operations over an
//! already-received request: typed query-string lists, pagination
//! resolution, JSON body parsing with optional validation, and extraction
//! of an authenticated identity's user principal name. It has no server,
//! no routing, and no state of its own; everything operates on a
//! [`RequestContext`] built by the host framework's integration layer.
//!
//! ## Operations
//!
//! | Operation | Source | Description |
//! |-----------|--------|-------------|
//! | [`RequestContext::integer_list`] | Query string | Lazy `i64` list, unparseable tokens skipped |
//! | [`RequestContext::double_list`] | Query string | Lazy `f64` list, unparseable tokens skipped |
//! | [`RequestContext::string_list`] | Query string | Lazy verbatim string list |
//! | [`RequestContext::pagination`] | Query string | Defaulted, clamped [`PaginationData`] |
//! | [`RequestContext::parse_json_body`] | Request body | Async JSON parse + optional [`Validator`] |
//! | [`RequestContext::authorization`] | Identities | User principal name for a scheme |
//!
//! ## Example
//!
//! ```rust
//! use http::{Method, Uri};
//! use reqkit::RequestContext;
//!
//! let ctx = RequestContext::builder()
//!     .method(Method::GET)
//!     .uri(Uri::from_static("/orders?ids=7,11&pageSize=50"))
//!     .build();
//!
//! let ids: Vec<i64> = ctx.integer_list("ids").unwrap().collect();
//! assert_eq!(ids, vec![7, 11]);
//!
//! let page = ctx.pagination().unwrap();
//! assert_eq!(page.size(), 20); // clamped to the default maximum
//! assert_eq!(page.offset(), 0);
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns an [`ExtractError`] that carries the
//! failure source, an error code for envelopes, and an HTTP status code.
//! Failures always propagate to the caller; the sole soft failure is an
//! unparseable list token, which is dropped rather than raised.
//!
//! ```rust
//! use reqkit::{ExtractError, ExtractSource};
//!
//! let err = ExtractError::invalid_argument(ExtractSource::Query, "queryKey", "must not be empty");
//! assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
//! ```

#![doc(html_root_url = "https://docs.rs/reqkit/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod de;
mod error;
mod extractor;
mod identity;
mod json;
mod pagination;
mod query;
mod validate;

// Re-export main types
pub use context::{BoxError, RequestContext, RequestContextBuilder};
pub use de::from_value_case_insensitive;
pub use error::{ExtractError, ExtractSource};
pub use extractor::FromRequest;
pub use identity::{claim_types, Claim, Identity};
pub use pagination::{PaginationData, PaginationParams};
pub use query::QueryList;
pub use validate::{FieldViolation, RuleSet, Validator};
