//! Async JSON body parsing with optional validation.
//!
//! The body stream is collected once, deserialized with case-insensitive
//! field matching, and optionally run through a caller-supplied
//! [`Validator`].

use crate::de::from_value_case_insensitive;
use crate::{ExtractError, ExtractSource, RequestContext, Validator};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

impl RequestContext {
    /// Parses the request body as JSON into `T`, validating it if a
    /// validator is supplied.
    ///
    /// The body stream is read in full (the only suspension point in this
    /// crate) and can be consumed exactly once; a second call fails with a
    /// body-read error. Dropping the returned future cancels the read
    /// without producing a parse failure. Field names are matched ASCII
    /// case-insensitively against `T`'s declared shape.
    ///
    /// When a validator is supplied it runs after successful
    /// deserialization and its violations surface as a validation error;
    /// without one, no validation step runs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use http::{Method, Uri};
    /// use reqkit::{RequestContext, RuleSet};
    /// use serde::Deserialize;
    ///
    /// #[derive(Debug, Deserialize)]
    /// struct CreateUser {
    ///     name: String,
    /// }
    ///
    /// let mut ctx = RequestContext::builder()
    ///     .method(Method::POST)
    ///     .uri(Uri::from_static("/users"))
    ///     .body(r#"{"Name": "Alice"}"#)
    ///     .build();
    ///
    /// let rules = RuleSet::new().rule("name", "must not be empty", |u: &CreateUser| {
    ///     !u.name.is_empty()
    /// });
    ///
    /// let user = tokio_test::block_on(ctx.parse_json_body(Some(&rules))).unwrap();
    /// assert_eq!(user.name, "Alice");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when the body cannot be read or was
    /// already consumed, when it is not valid JSON or does not conform to
    /// `T`'s shape, or when the validator reports violations.
    pub async fn parse_json_body<T: DeserializeOwned>(
        &mut self,
        validator: Option<&dyn Validator<T>>,
    ) -> Result<T, ExtractError> {
        let body = self.take_body().ok_or_else(ExtractError::body_consumed)?;

        let collected = body.collect().await.map_err(|e| {
            tracing::debug!(error = %e, "request body collection failed");
            ExtractError::body_read(e.to_string())
        })?;
        let bytes = collected.to_bytes();

        if bytes.is_empty() {
            return Err(ExtractError::deserialization_failed(
                ExtractSource::Body,
                "empty request body",
            ));
        }

        let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
            ExtractError::deserialization_failed(ExtractSource::Body, e.to_string())
        })?;
        let parsed: T = from_value_case_insensitive(value).map_err(|e| {
            ExtractError::deserialization_failed(ExtractSource::Body, e.to_string())
        })?;

        if let Some(validator) = validator {
            if let Err(violations) = validator.validate(&parsed) {
                tracing::debug!(count = violations.len(), "request body validation failed");
                return Err(ExtractError::validation_failed(violations));
            }
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleSet;
    use bytes::Bytes;
    use http::{Method, Uri};
    use serde::Deserialize;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    #[derive(Debug, Deserialize, PartialEq)]
    struct CreateUser {
        name: String,
        email: String,
    }

    fn make_ctx(body: &str) -> RequestContext {
        RequestContext::builder()
            .method(Method::POST)
            .uri(Uri::from_static("/users"))
            .body(body.to_string())
            .build()
    }

    fn user_rules() -> RuleSet<CreateUser> {
        RuleSet::new()
            .rule("name", "must not be empty", |u: &CreateUser| !u.name.is_empty())
            .rule("email", "must contain @", |u: &CreateUser| u.email.contains('@'))
    }

    #[tokio::test]
    async fn test_parses_valid_body() {
        let mut ctx = make_ctx(r#"{"name": "Alice", "email": "alice@example.com"}"#);

        let user: CreateUser = ctx.parse_json_body(None).await.unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_field_matching_is_case_insensitive() {
        let mut ctx = make_ctx(r#"{"Name": "Alice", "EMAIL": "alice@example.com"}"#);

        let user: CreateUser = ctx.parse_json_body(None).await.unwrap();
        assert_eq!(user.name, "Alice");
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_deserialization_error() {
        let mut ctx = make_ctx(r#"{"name": "Alice", invalid"#);

        let err = ctx.parse_json_body::<CreateUser>(None).await.unwrap_err();
        assert_eq!(err.error_code(), "DESERIALIZATION_FAILED");
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_a_deserialization_error() {
        let mut ctx = make_ctx(r#"{"name": 42, "email": "alice@example.com"}"#);

        let err = ctx.parse_json_body::<CreateUser>(None).await.unwrap_err();
        assert_eq!(err.error_code(), "DESERIALIZATION_FAILED");
    }

    #[tokio::test]
    async fn test_empty_body_is_a_deserialization_error() {
        let mut ctx = make_ctx("");

        let err = ctx.parse_json_body::<CreateUser>(None).await.unwrap_err();
        assert_eq!(err.error_code(), "DESERIALIZATION_FAILED");
        assert!(err.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn test_validator_failure_surfaces_violations() {
        let mut ctx = make_ctx(r#"{"name": "", "email": "not-an-email"}"#);
        let rules = user_rules();

        let err = ctx.parse_json_body::<CreateUser>(Some(&rules)).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert_eq!(err.violations().len(), 2);
        assert_eq!(err.violations()[0].field(), "name");
    }

    #[tokio::test]
    async fn test_validator_pass_returns_model_unchanged() {
        let mut ctx = make_ctx(r#"{"name": "Alice", "email": "alice@example.com"}"#);
        let rules = user_rules();

        let user = ctx.parse_json_body(Some(&rules)).await.unwrap();
        assert_eq!(
            user,
            CreateUser {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_body_can_only_be_consumed_once() {
        let mut ctx = make_ctx(r#"{"name": "Alice", "email": "alice@example.com"}"#);

        let _: CreateUser = ctx.parse_json_body(None).await.unwrap();
        let err = ctx.parse_json_body::<CreateUser>(None).await.unwrap_err();
        assert_eq!(err.error_code(), "BODY_READ_ERROR");
        assert!(err.to_string().contains("already consumed"));
    }

    struct FailingBody;

    impl http_body::Body for FailingBody {
        type Data = Bytes;
        type Error = std::io::Error;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Option<Result<http_body::Frame<Bytes>, Self::Error>>> {
            Poll::Ready(Some(Err(std::io::Error::other("connection reset"))))
        }
    }

    #[tokio::test]
    async fn test_stream_failure_is_a_body_read_error() {
        let mut ctx = RequestContext::builder()
            .method(Method::POST)
            .uri(Uri::from_static("/users"))
            .streaming_body(FailingBody)
            .build();

        let err = ctx.parse_json_body::<CreateUser>(None).await.unwrap_err();
        assert_eq!(err.error_code(), "BODY_READ_ERROR");
        assert!(err.to_string().contains("connection reset"));
    }
}
