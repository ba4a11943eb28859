//! # reqkit-test
//!
//! Test fixtures and request-building helpers for [`reqkit`].
//!
//! Provides a sample DTO with a builder and mother-style constructors, a
//! matching rule set, and one-line constructors for request contexts used
//! across the reqkit test suites.
//!
//! ```rust
//! use reqkit_test::{mother, request, sample_rules};
//!
//! let dto = mother::sample_dto();
//! assert!(!sample_rules().is_empty());
//! assert_eq!(dto.string_sample, "sdf");
//!
//! let ctx = request::get("/items?ids=1,2");
//! let ids: Vec<i64> = ctx.integer_list("ids").unwrap().collect();
//! assert_eq!(ids, vec![1, 2]);
//! ```

#![doc(html_root_url = "https://docs.rs/reqkit-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod request;
mod sample;

pub use sample::{mother, sample_rules, SampleDto, SampleDtoBuilder};
