//! Request context construction helpers.
//!
//! One-line constructors for the request shapes the test suites use.
//! Helpers panic on malformed input; they are meant for test code only.

use http::{Method, Uri};
use reqkit::{Identity, RequestContext};
use serde::Serialize;

fn parse_uri(uri: &str) -> Uri {
    uri.parse().expect("valid uri")
}

/// Builds a GET request context for the given URI.
#[must_use]
pub fn get(uri: &str) -> RequestContext {
    RequestContext::builder()
        .method(Method::GET)
        .uri(parse_uri(uri))
        .build()
}

/// Builds a POST request context with a JSON-serialized body.
///
/// Sets the `Content-Type` header to `application/json`.
#[must_use]
pub fn post_json<T: Serialize>(uri: &str, body: &T) -> RequestContext {
    let body = serde_json::to_vec(body).expect("serializable body");
    RequestContext::builder()
        .method(Method::POST)
        .uri(parse_uri(uri))
        .header("content-type", "application/json")
        .body(body)
        .build()
}

/// Builds a POST request context with a raw string body.
#[must_use]
pub fn post_raw(uri: &str, body: &str) -> RequestContext {
    RequestContext::builder()
        .method(Method::POST)
        .uri(parse_uri(uri))
        .body(body.to_string())
        .build()
}

/// Builds a GET request context with the given identities attached.
#[must_use]
pub fn authenticated(uri: &str, identities: Vec<Identity>) -> RequestContext {
    RequestContext::builder()
        .method(Method::GET)
        .uri(parse_uri(uri))
        .identities(identities)
        .build()
}
