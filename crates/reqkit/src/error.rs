//! Extraction error types.
//!
//! This module provides the [`ExtractError`] type returned by every fallible
//! operation in the crate, along with the [`ExtractSource`] describing which
//! part of the request the failure came from.

use crate::validate::FieldViolation;
use http::StatusCode;
use std::fmt;

/// Part of the request an extraction failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractSource {
    /// Query string parameters
    Query,
    /// Request body
    Body,
    /// Authenticated identities attached to the request
    Identity,
    /// Other sources (e.g. caller-supplied arguments)
    Other,
}

impl fmt::Display for ExtractSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Body => write!(f, "body"),
            Self::Identity => write!(f, "identity"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Error returned by request parsing and validation operations.
///
/// Contains the source of the failure, an optional field name, and for
/// validation failures the per-field violation list. Can be converted to an
/// appropriate HTTP status code for error responses.
///
/// # Example
///
/// ```rust
/// use reqkit::{ExtractError, ExtractSource};
/// use http::StatusCode;
///
/// let err = ExtractError::invalid_argument(ExtractSource::Query, "queryKey", "must not be empty");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.error_code(), "INVALID_ARGUMENT");
/// assert!(err.to_string().contains("queryKey"));
/// ```
#[derive(Debug)]
pub struct ExtractError {
    source: ExtractSource,
    kind: ExtractErrorKind,
    field: Option<String>,
    message: String,
    violations: Vec<FieldViolation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractErrorKind {
    /// Required argument is missing or out of range
    InvalidArgument,
    /// Body could not be deserialized into the target shape
    Deserialization,
    /// Parsed value failed one or more validation rules
    Validation,
    /// More than one identity matched the requested scheme
    AmbiguousIdentity,
    /// Matched identity is missing the expected claim
    ClaimNotFound,
    /// Body stream could not be read, or was already consumed
    BodyRead,
}

impl ExtractError {
    /// Creates an error for a missing or out-of-range argument.
    #[must_use]
    pub fn invalid_argument(
        source: ExtractSource,
        field: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let details = details.into();
        Self {
            source,
            kind: ExtractErrorKind::InvalidArgument,
            message: format!("invalid {source} argument '{field}': {details}"),
            field: Some(field),
            violations: Vec::new(),
        }
    }

    /// Creates an error for a body that could not be deserialized.
    #[must_use]
    pub fn deserialization_failed(source: ExtractSource, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            source,
            kind: ExtractErrorKind::Deserialization,
            message: format!("failed to deserialize {source}: {error}"),
            field: None,
            violations: Vec::new(),
        }
    }

    /// Creates an error carrying one or more field-level rule violations.
    #[must_use]
    pub fn validation_failed(violations: Vec<FieldViolation>) -> Self {
        Self {
            source: ExtractSource::Body,
            kind: ExtractErrorKind::Validation,
            message: format!("validation failed with {} violation(s)", violations.len()),
            field: None,
            violations,
        }
    }

    /// Creates an error for an ambiguous identity match.
    ///
    /// More than one identity on the request carried the requested
    /// authentication scheme. This indicates a framework misconfiguration
    /// rather than bad client input.
    #[must_use]
    pub fn ambiguous_identity(scheme: impl Into<String>) -> Self {
        let scheme = scheme.into();
        Self {
            source: ExtractSource::Identity,
            kind: ExtractErrorKind::AmbiguousIdentity,
            message: format!("multiple identities match authentication scheme '{scheme}'"),
            field: Some(scheme),
            violations: Vec::new(),
        }
    }

    /// Creates an error for a matched identity missing the expected claim.
    #[must_use]
    pub fn claim_not_found(scheme: impl Into<String>, claim_type: impl Into<String>) -> Self {
        let scheme = scheme.into();
        let claim_type = claim_type.into();
        Self {
            source: ExtractSource::Identity,
            kind: ExtractErrorKind::ClaimNotFound,
            message: format!(
                "identity for scheme '{scheme}' has no claim of type '{claim_type}'"
            ),
            field: Some(claim_type),
            violations: Vec::new(),
        }
    }

    /// Creates an error for a body stream that failed to read.
    #[must_use]
    pub fn body_read(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            source: ExtractSource::Body,
            kind: ExtractErrorKind::BodyRead,
            message: format!("failed to read request body: {error}"),
            field: None,
            violations: Vec::new(),
        }
    }

    /// Creates an error for a body stream that was already consumed.
    #[must_use]
    pub fn body_consumed() -> Self {
        Self {
            source: ExtractSource::Body,
            kind: ExtractErrorKind::BodyRead,
            message: "request body was already consumed".to_string(),
            field: None,
            violations: Vec::new(),
        }
    }

    /// Returns the part of the request the failure originated from.
    ///
    /// Named to stay distinct from [`std::error::Error::source`].
    #[must_use]
    pub fn extract_source(&self) -> ExtractSource {
        self.source
    }

    /// Returns the field or argument name if applicable.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the field-level violations for validation failures.
    ///
    /// Empty for every other error kind.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ExtractErrorKind::InvalidArgument
            | ExtractErrorKind::Deserialization
            | ExtractErrorKind::BodyRead => StatusCode::BAD_REQUEST,
            ExtractErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ExtractErrorKind::AmbiguousIdentity | ExtractErrorKind::ClaimNotFound => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ExtractErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ExtractErrorKind::Deserialization => "DESERIALIZATION_FAILED",
            ExtractErrorKind::Validation => "VALIDATION_FAILED",
            ExtractErrorKind::AmbiguousIdentity => "AMBIGUOUS_IDENTITY",
            ExtractErrorKind::ClaimNotFound => "CLAIM_NOT_FOUND",
            ExtractErrorKind::BodyRead => "BODY_READ_ERROR",
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExtractError {}
