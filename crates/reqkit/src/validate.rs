//! Model validation capability.
//!
//! The JSON body parser accepts an optional [`Validator`] that runs against
//! the parsed model. Any rule engine can sit behind the trait; [`RuleSet`]
//! is a small predicate-based implementation for the common case.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field-level rule violation.
///
/// Serializable so handlers can embed violations directly in error
/// response envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    field: String,
    message: String,
}

impl FieldViolation {
    /// Creates a violation for the given field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the name of the violated field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the human-readable violation message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Capability for validating a parsed model.
///
/// Implementations run their configured rules against the value and return
/// every violation found, or `Ok(())` when all rules hold. The body parser
/// turns a non-empty violation list into a validation error.
pub trait Validator<T> {
    /// Validates the value, returning all rule violations.
    ///
    /// # Errors
    ///
    /// Returns the full list of violations when any rule does not hold.
    fn validate(&self, value: &T) -> Result<(), Vec<FieldViolation>>;
}

/// An ordered set of named predicate rules.
///
/// Rules are evaluated in insertion order and all failures are collected,
/// so a caller sees every violated field at once.
///
/// # Example
///
/// ```rust
/// use reqkit::{RuleSet, Validator};
///
/// struct CreateUser {
///     name: String,
///     age: i64,
/// }
///
/// let rules = RuleSet::new()
///     .rule("name", "must not be empty", |u: &CreateUser| !u.name.is_empty())
///     .rule("age", "must be positive", |u: &CreateUser| u.age > 0);
///
/// let user = CreateUser { name: String::new(), age: 30 };
/// let violations = rules.validate(&user).unwrap_err();
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].field(), "name");
/// ```
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

struct Rule<T> {
    field: String,
    message: String,
    check: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> RuleSet<T> {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule for the given field.
    ///
    /// The predicate returns `true` when the rule holds.
    #[must_use]
    pub fn rule(
        mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        check: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(Rule {
            field: field.into(),
            message: message.into(),
            check: Box::new(check),
        });
        self
    }

    /// Returns the number of configured rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.iter().map(|r| &r.field).collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Validator<T> for RuleSet<T> {
    fn validate(&self, value: &T) -> Result<(), Vec<FieldViolation>> {
        let violations: Vec<FieldViolation> = self
            .rules
            .iter()
            .filter(|rule| !(rule.check)(value))
            .map(|rule| FieldViolation::new(rule.field.clone(), rule.message.clone()))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
