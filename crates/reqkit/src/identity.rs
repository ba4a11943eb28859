//! Authenticated identities and claim extraction.
//!
//! An authentication layer attaches zero or more [`Identity`] values to a
//! [`RequestContext`](crate::RequestContext) before handler code runs. This
//! module provides the identity model and the claim lookup used by
//! [`RequestContext::authorization`].

use crate::{ExtractError, ExtractSource, RequestContext};
use serde::{Deserialize, Serialize};

/// Well-known claim type names.
pub mod claim_types {
    /// The user principal name of an authenticated user.
    pub const USER_PRINCIPAL_NAME: &str = "upn";
}

/// A single `(type, value)` attribute attached to an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    claim_type: String,
    value: String,
}

impl Claim {
    /// Creates a claim of the given type.
    #[must_use]
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    /// Creates a user principal name claim.
    #[must_use]
    pub fn user_principal_name(value: impl Into<String>) -> Self {
        Self::new(claim_types::USER_PRINCIPAL_NAME, value)
    }

    /// Returns the claim type.
    #[must_use]
    pub fn claim_type(&self) -> &str {
        &self.claim_type
    }

    /// Returns the claim value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// One authenticated credential associated with a request.
///
/// Tagged with the name of the authentication scheme that produced it
/// (e.g. `Bearer`, `Negotiate`) and carrying a set of claims.
///
/// # Example
///
/// ```rust
/// use reqkit::{Claim, Identity};
///
/// let identity = Identity::new("Bearer")
///     .with_claim(Claim::user_principal_name("alice@example.com"));
///
/// assert_eq!(identity.scheme(), "Bearer");
/// assert_eq!(identity.claim("upn"), Some("alice@example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    scheme: String,
    claims: Vec<Claim>,
}

impl Identity {
    /// Creates an identity for the given authentication scheme.
    #[must_use]
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            claims: Vec::new(),
        }
    }

    /// Adds a claim to the identity.
    #[must_use]
    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.claims.push(claim);
        self
    }

    /// Returns the authentication scheme name.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns all claims attached to this identity.
    #[must_use]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Returns the value of the first claim with the given type.
    ///
    /// Claim types are compared exactly; scheme matching, not claim
    /// matching, is the case-insensitive step.
    #[must_use]
    pub fn claim(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type == claim_type)
            .map(Claim::value)
    }

    /// Returns `true` if this identity was produced by the given scheme,
    /// compared ASCII case-insensitively.
    #[must_use]
    pub fn matches_scheme(&self, scheme: &str) -> bool {
        self.scheme.eq_ignore_ascii_case(scheme)
    }
}

impl RequestContext {
    /// Extracts the user principal name for the given authentication scheme.
    ///
    /// Searches the identities attached to the request for exactly one whose
    /// scheme name matches `scheme` ASCII case-insensitively.
    ///
    /// - No matching identity returns an empty string, not an error.
    /// - More than one match is an ambiguous-identity error; a correctly
    ///   configured authentication layer attaches at most one identity per
    ///   scheme.
    /// - A single match must carry a
    ///   [`claim_types::USER_PRINCIPAL_NAME`] claim, else a claim-not-found
    ///   error is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use http::{Method, Uri};
    /// use reqkit::{Claim, Identity, RequestContext};
    ///
    /// let ctx = RequestContext::builder()
    ///     .method(Method::GET)
    ///     .uri(Uri::from_static("/reports"))
    ///     .identity(
    ///         Identity::new("Bearer").with_claim(Claim::user_principal_name("alice@example.com")),
    ///     )
    ///     .build();
    ///
    /// assert_eq!(ctx.authorization("bearer").unwrap(), "alice@example.com");
    /// assert_eq!(ctx.authorization("Negotiate").unwrap(), "");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when `scheme` is empty, when more than
    /// one identity matches, or when the matched identity has no user
    /// principal name claim.
    pub fn authorization(&self, scheme: &str) -> Result<String, ExtractError> {
        if scheme.is_empty() {
            return Err(ExtractError::invalid_argument(
                ExtractSource::Identity,
                "scheme",
                "authentication scheme must not be empty",
            ));
        }

        let mut matches = self.identities().iter().filter(|id| id.matches_scheme(scheme));

        let Some(identity) = matches.next() else {
            return Ok(String::new());
        };
        if matches.next().is_some() {
            return Err(ExtractError::ambiguous_identity(scheme));
        }

        identity
            .claim(claim_types::USER_PRINCIPAL_NAME)
            .map(String::from)
            .ok_or_else(|| {
                ExtractError::claim_not_found(scheme, claim_types::USER_PRINCIPAL_NAME)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, Uri};

    fn ctx_with(identities: Vec<Identity>) -> RequestContext {
        let mut builder = RequestContext::builder()
            .method(Method::GET)
            .uri(Uri::from_static("/"));
        for identity in identities {
            builder = builder.identity(identity);
        }
        builder.build()
    }

    fn bearer(upn: &str) -> Identity {
        Identity::new("Bearer").with_claim(Claim::user_principal_name(upn))
    }

    #[test]
    fn test_no_matching_identity_returns_empty_string() {
        let ctx = ctx_with(vec![bearer("alice@example.com")]);

        assert_eq!(ctx.authorization("Negotiate").unwrap(), "");
    }

    #[test]
    fn test_single_match_returns_claim_value() {
        let ctx = ctx_with(vec![bearer("alice@example.com")]);

        assert_eq!(ctx.authorization("Bearer").unwrap(), "alice@example.com");
    }

    #[test]
    fn test_scheme_comparison_is_case_insensitive() {
        let ctx = ctx_with(vec![bearer("alice@example.com")]);

        assert_eq!(ctx.authorization("BEARER").unwrap(), "alice@example.com");
        assert_eq!(ctx.authorization("bearer").unwrap(), "alice@example.com");
    }

    #[test]
    fn test_multiple_matches_is_ambiguous() {
        let ctx = ctx_with(vec![bearer("alice@example.com"), bearer("bob@example.com")]);

        let err = ctx.authorization("Bearer").unwrap_err();
        assert_eq!(err.error_code(), "AMBIGUOUS_IDENTITY");
    }

    #[test]
    fn test_missing_claim_is_an_error() {
        let identity = Identity::new("Bearer").with_claim(Claim::new("role", "admin"));
        let ctx = ctx_with(vec![identity]);

        let err = ctx.authorization("Bearer").unwrap_err();
        assert_eq!(err.error_code(), "CLAIM_NOT_FOUND");
        assert_eq!(err.field(), Some(claim_types::USER_PRINCIPAL_NAME));
    }

    #[test]
    fn test_empty_scheme_is_invalid() {
        let ctx = ctx_with(vec![bearer("alice@example.com")]);

        let err = ctx.authorization("").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_claim_lookup_is_exact_on_type() {
        let identity = Identity::new("Bearer")
            .with_claim(Claim::new("UPN", "wrong-case@example.com"))
            .with_claim(Claim::user_principal_name("alice@example.com"));

        assert_eq!(identity.claim("upn"), Some("alice@example.com"));
        assert_eq!(identity.claim("UPN"), Some("wrong-case@example.com"));
    }

    #[test]
    fn test_identity_serialization() {
        let identity = bearer("alice@example.com");
        let json = serde_json::to_string(&identity).expect("serializes");
        assert!(json.contains("\"type\":\"upn\""));

        let parsed: Identity = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(parsed, identity);
    }
}
