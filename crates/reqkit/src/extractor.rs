//! Core extractor trait.
//!
//! [`FromRequest`] lets synchronous parsing operations compose: anything
//! derivable from already-materialized request data can implement it and be
//! combined through tuples or made optional.

use crate::{ExtractError, RequestContext};

/// Trait for types that can be extracted from a request context.
///
/// Covers the synchronous operations only; body parsing is async and lives
/// on [`RequestContext`] directly.
///
/// # Implementing `FromRequest`
///
/// ```rust
/// use reqkit::{ExtractError, ExtractSource, FromRequest, RequestContext};
///
/// struct ApiVersion(u32);
///
/// impl FromRequest for ApiVersion {
///     fn from_request(ctx: &RequestContext) -> Result<Self, ExtractError> {
///         let version = ctx.header("x-api-version").ok_or_else(|| {
///             ExtractError::invalid_argument(
///                 ExtractSource::Other,
///                 "x-api-version",
///                 "header is required",
///             )
///         })?;
///
///         let version: u32 = version.parse().map_err(|_| {
///             ExtractError::invalid_argument(
///                 ExtractSource::Other,
///                 "x-api-version",
///                 "expected integer version",
///             )
///         })?;
///
///         Ok(ApiVersion(version))
///     }
/// }
/// ```
pub trait FromRequest: Sized {
    /// Extracts this type from the request context.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] if extraction fails.
    fn from_request(ctx: &RequestContext) -> Result<Self, ExtractError>;
}

// Option<T> makes extraction optional (None if it fails)
impl<T: FromRequest> FromRequest for Option<T> {
    fn from_request(ctx: &RequestContext) -> Result<Self, ExtractError> {
        Ok(T::from_request(ctx).ok())
    }
}

// Result<T, ExtractError> allows handling extraction errors inline
impl<T: FromRequest> FromRequest for Result<T, ExtractError> {
    fn from_request(ctx: &RequestContext) -> Result<Self, ExtractError> {
        Ok(T::from_request(ctx))
    }
}

macro_rules! impl_from_request_for_tuple {
    ($($T:ident),*) => {
        impl<$($T: FromRequest),*> FromRequest for ($($T,)*) {
            fn from_request(ctx: &RequestContext) -> Result<Self, ExtractError> {
                Ok(($($T::from_request(ctx)?,)*))
            }
        }
    };
}

impl_from_request_for_tuple!(T1);
impl_from_request_for_tuple!(T1, T2);
impl_from_request_for_tuple!(T1, T2, T3);
impl_from_request_for_tuple!(T1, T2, T3, T4);

impl FromRequest for () {
    fn from_request(_ctx: &RequestContext) -> Result<Self, ExtractError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExtractSource, PaginationData};
    use http::{Method, Uri};

    struct PathExtractor(String);

    impl FromRequest for PathExtractor {
        fn from_request(ctx: &RequestContext) -> Result<Self, ExtractError> {
            Ok(Self(ctx.path().to_string()))
        }
    }

    struct FailingExtractor;

    impl FromRequest for FailingExtractor {
        fn from_request(_ctx: &RequestContext) -> Result<Self, ExtractError> {
            Err(ExtractError::invalid_argument(
                ExtractSource::Other,
                "required_field",
                "always fails",
            ))
        }
    }

    fn make_ctx(uri: &'static str) -> RequestContext {
        RequestContext::builder()
            .method(Method::GET)
            .uri(Uri::from_static(uri))
            .build()
    }

    #[test]
    fn test_basic_extraction() {
        let ctx = make_ctx("/test/path");

        let extracted = PathExtractor::from_request(&ctx).unwrap();
        assert_eq!(extracted.0, "/test/path");
    }

    #[test]
    fn test_option_extraction() {
        let ctx = make_ctx("/test");

        assert!(<Option<PathExtractor>>::from_request(&ctx).unwrap().is_some());
        assert!(<Option<FailingExtractor>>::from_request(&ctx).unwrap().is_none());
    }

    #[test]
    fn test_result_extraction() {
        let ctx = make_ctx("/test");

        let inner = <Result<FailingExtractor, ExtractError>>::from_request(&ctx).unwrap();
        assert!(inner.is_err());
    }

    #[test]
    fn test_tuple_extraction() {
        let ctx = make_ctx("/users?pageIndex=2");

        let (path, page) = <(PathExtractor, PaginationData)>::from_request(&ctx).unwrap();
        assert_eq!(path.0, "/users");
        assert_eq!(page.index(), 2);
    }

    #[test]
    fn test_tuple_extraction_propagates_failure() {
        let ctx = make_ctx("/test");

        assert!(<(PathExtractor, FailingExtractor)>::from_request(&ctx).is_err());
    }

    #[test]
    fn test_unit_extraction() {
        let ctx = make_ctx("/test");

        assert!(<()>::from_request(&ctx).is_ok());
    }
}
