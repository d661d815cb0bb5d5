//! Result types for the unit lifecycle
//!
//! [`ValidationResult`] is what a validate hook returns; [`SanitizeResult`]
//! is what `run` returns. Both derive success from the error list, so a
//! result cannot claim success while carrying errors.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{Rule, ValidationError};

// ============================================================================
// VALIDATION RESULT
// ============================================================================

/// Outcome of the validate stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A passing result.
    #[must_use]
    pub fn pass() -> Self {
        Self { errors: Vec::new() }
    }

    /// A result carrying `errors`; passing when the list is empty.
    #[must_use]
    pub fn fail(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// A failing result with one error per rule.
    #[must_use]
    pub fn from_rules(rules: &[&Rule]) -> Self {
        Self::fail(rules.iter().map(|rule| rule.to_error()).collect())
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl From<ValidationError> for ValidationResult {
    fn from(error: ValidationError) -> Self {
        Self::fail(vec![error])
    }
}

// ============================================================================
// SANITIZE RESULT
// ============================================================================

/// Outcome of running a unit.
///
/// * success ⇔ no errors;
/// * a failure never carries data;
/// * a success carries data, except when an optional unit let an absent
///   value through (see [`SanitizeResult::passthrough`]).
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizeResult<T> {
    data: Option<T>,
    errors: Vec<ValidationError>,
}

impl<T> SanitizeResult<T> {
    /// A successful run producing `data`.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A successful run that let an absent input through unchanged.
    pub fn passthrough(data: Option<T>) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// A failed run.
    ///
    /// An empty list is replaced by a single generic `invalid` error so the
    /// result still reads as a failure.
    pub fn failure(mut errors: Vec<ValidationError>) -> Self {
        if errors.is_empty() {
            errors.push(ValidationError::new("invalid", "Validation failed"));
        }
        Self { data: None, errors }
    }

    /// A failed run reporting that the value is required.
    pub fn required() -> Self {
        Self::failure(vec![ValidationError::required()])
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Splits into the data of a success or the errors of a failure.
    pub fn into_result(self) -> Result<Option<T>, Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(self.data)
        } else {
            Err(self.errors)
        }
    }
}

impl<T: Serialize> Serialize for SanitizeResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.data.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("SanitizeResult", len)?;
        state.serialize_field("success", &self.is_success())?;
        if let Some(data) = &self.data {
            state.serialize_field("data", data)?;
        } else {
            state.skip_field("data")?;
        }
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}
