//! Sample DTO fixtures.

use reqkit::RuleSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A model exercising identity, integer, double, and string fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDto {
    /// Unique identifier.
    pub id: Uuid,
    /// An integer-valued field.
    pub integer_sample: i64,
    /// A double-valued field.
    pub double_sample: f64,
    /// A string-valued field.
    pub string_sample: String,
}

/// Builder for [`SampleDto`] values.
#[derive(Debug, Default)]
#[must_use]
pub struct SampleDtoBuilder {
    id: Option<Uuid>,
    integer_sample: i64,
    double_sample: f64,
    string_sample: String,
}

impl SampleDtoBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills every field with representative sample data.
    pub fn with_sample_data(mut self) -> Self {
        self.id = Some(Uuid::new_v4());
        self.integer_sample = 42;
        self.double_sample = 0.5;
        self.string_sample = "sdf".to_string();
        self
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the integer field.
    pub fn with_integer(mut self, value: i64) -> Self {
        self.integer_sample = value;
        self
    }

    /// Sets the double field.
    pub fn with_double(mut self, value: f64) -> Self {
        self.double_sample = value;
        self
    }

    /// Sets the string field.
    pub fn with_string(mut self, value: impl Into<String>) -> Self {
        self.string_sample = value.into();
        self
    }

    /// Builds the DTO. An unset id defaults to the nil UUID.
    #[must_use]
    pub fn build(self) -> SampleDto {
        SampleDto {
            id: self.id.unwrap_or(Uuid::nil()),
            integer_sample: self.integer_sample,
            double_sample: self.double_sample,
            string_sample: self.string_sample,
        }
    }
}

/// Returns the rule set the sample DTO is validated with: a non-nil id and
/// a non-empty string field.
#[must_use]
pub fn sample_rules() -> RuleSet<SampleDto> {
    RuleSet::new()
        .rule("id", "must not be empty", |dto: &SampleDto| !dto.id.is_nil())
        .rule("string_sample", "must not be empty", |dto: &SampleDto| {
            !dto.string_sample.is_empty()
        })
}

/// Mother-style one-line constructors.
pub mod mother {
    use super::{SampleDto, SampleDtoBuilder};

    /// A fully populated sample DTO.
    #[must_use]
    pub fn sample_dto() -> SampleDto {
        SampleDtoBuilder::new().with_sample_data().build()
    }
}
