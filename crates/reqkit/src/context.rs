//! Request context providing access to request data.
//!
//! The [`RequestContext`] is the request capability surface the rest of the
//! crate operates on: query parameters, headers, the (once-readable) body,
//! and the identities an authentication layer attached to the request.

use crate::identity::Identity;
use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full};

/// Boxed error type used for body streams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Type-erased request body stream.
pub(crate) type BoxedBody = UnsyncBoxBody<Bytes, BoxError>;

/// Context providing access to the parts of an in-flight HTTP request.
///
/// Constructed by the host framework's integration layer (or directly from
/// buffered data in tests) and handed to handler code, which uses the
/// parsing operations defined across this crate. The body is held as a
/// stream and can be consumed exactly once; everything else is cheap,
/// already-materialized data.
///
/// # Example
///
/// ```rust
/// use http::{Method, Uri};
/// use reqkit::RequestContext;
///
/// let ctx = RequestContext::builder()
///     .method(Method::GET)
///     .uri(Uri::from_static("/users?pageIndex=2&pageSize=10"))
///     .build();
///
/// assert_eq!(ctx.method(), &Method::GET);
/// assert_eq!(ctx.path(), "/users");
/// assert_eq!(ctx.query_string(), Some("pageIndex=2&pageSize=10"));
/// ```
pub struct RequestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Option<BoxedBody>,
    identities: Vec<Identity>,
}

impl RequestContext {
    /// Creates a new context from buffered body bytes.
    #[must_use]
    pub fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: impl Into<Bytes>,
        identities: Vec<Identity>,
    ) -> Self {
        Self {
            method,
            uri,
            headers,
            body: Some(buffered_body(body.into())),
            identities,
        }
    }

    /// Returns a builder for constructing a context.
    #[must_use]
    pub fn builder() -> RequestContextBuilder {
        RequestContextBuilder::new()
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the query string if present.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a specific header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns the identities attached to the request.
    #[must_use]
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// Returns `true` if the body stream has already been consumed.
    #[must_use]
    pub fn is_body_consumed(&self) -> bool {
        self.body.is_none()
    }

    /// Takes the body stream, leaving the context without one.
    pub(crate) fn take_body(&mut self) -> Option<BoxedBody> {
        self.body.take()
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("headers", &self.headers)
            .field("body", if self.body.is_some() { &"pending" } else { &"consumed" })
            .field("identities", &self.identities)
            .finish()
    }
}

fn buffered_body(bytes: Bytes) -> BoxedBody {
    Full::new(bytes).map_err(|never| match never {}).boxed_unsync()
}

/// Builder for constructing a [`RequestContext`].
#[derive(Default)]
#[must_use]
pub struct RequestContextBuilder {
    method: Option<Method>,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Option<BoxedBody>,
    identities: Vec<Identity>,
}

impl RequestContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URI.
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = Some(uri);
        self
    }

    /// Sets the headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single header.
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets a buffered body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(buffered_body(body.into()));
        self
    }

    /// Sets a streaming body.
    ///
    /// The stream is read in full the first time the body is consumed.
    pub fn streaming_body<B>(mut self, body: B) -> Self
    where
        B: http_body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        self.body = Some(body.map_err(Into::into).boxed_unsync());
        self
    }

    /// Attaches an authenticated identity.
    pub fn identity(mut self, identity: Identity) -> Self {
        self.identities.push(identity);
        self
    }

    /// Attaches a set of authenticated identities.
    pub fn identities(mut self, identities: Vec<Identity>) -> Self {
        self.identities = identities;
        self
    }

    /// Builds the request context.
    ///
    /// # Panics
    ///
    /// Panics if method or uri were not set.
    #[must_use]
    pub fn build(self) -> RequestContext {
        RequestContext {
            method: self.method.expect("method is required"),
            uri: self.uri.expect("uri is required"),
            headers: self.headers,
            body: Some(self.body.unwrap_or_else(|| buffered_body(Bytes::new()))),
            identities: self.identities,
        }
    }
}
