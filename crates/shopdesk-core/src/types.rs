//! Validated newtype wrappers for user-entered values.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a domain value fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The value is empty.
    #[error("value must not be empty")]
    Empty,
    /// The value exceeds the maximum length.
    #[error("value exceeds maximum length of {max} characters (got {got})")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length.
        got: usize,
    },
    /// A purchase line is not in `item:quantity:price` form.
    #[error("purchase line must be 'item:quantity:price' (got '{0}')")]
    MalformedLine(String),
    /// A numeric field could not be parsed or is not positive.
    #[error("invalid {field}: '{value}'")]
    InvalidNumber {
        /// Which field was rejected.
        field: &'static str,
        /// The raw input.
        value: String,
    },
}

fn bounded(value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let got = trimmed.chars().count();
    if got > max {
        return Err(ValidationError::TooLong { max, got });
    }
    Ok(trimmed.to_owned())
}

/// An inventory category name (1–20 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Maximum length accepted by the backend.
    pub const MAX_LEN: usize = 20;

    /// Validate and wrap a category name; surrounding whitespace is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the name is blank or longer than
    /// [`Self::MAX_LEN`] characters.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        bounded(name, Self::MAX_LEN).map(Self)
    }

    /// Return the inner name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A repair job identifier as printed on the customer's ticket.
///
/// The backend refuses searches longer than 40 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepairId(String);

impl RepairId {
    /// Maximum length the search endpoint accepts.
    pub const MAX_LEN: usize = 40;

    /// Validate and wrap a repair id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the id is blank or too long.
    pub fn new(id: &str) -> Result<Self, ValidationError> {
        bounded(id, Self::MAX_LEN).map(Self)
    }

    /// Return the inner id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RepairId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<RepairId> for String {
    fn from(value: RepairId) -> Self {
        value.0
    }
}

impl fmt::Display for RepairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
