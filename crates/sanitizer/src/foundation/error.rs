//! Error types for validation failures
//!
//! Three kinds of errors live here:
//!
//! - [`ValidationError`]: one reported problem with an input. These are
//!   *data*: they travel inside a [`SanitizeResult`](super::SanitizeResult)
//!   and never cross the `run` boundary as `Err`.
//! - [`SanitizeError`]: what a sanitize hook returns when a transform it
//!   expected to succeed did not.
//! - [`BuildError`]: construction-time misuse (an empty pipeline, a regex
//!   that does not compile). Not attributable to any input.
//!
//! Codes and messages use `Cow<'static, str>` so the common case of static
//! strings does not allocate.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation error.
///
/// # Examples
///
/// ```rust
/// use nebula_sanitizer::foundation::ValidationError;
///
/// let error = ValidationError::new("min_length", "Input must be at least 5 characters")
///     .with_field("username")
///     .with_context("min_length", 5)
///     .with_context("actual_length", 2);
///
/// assert_eq!(error.field.as_deref(), Some("username"));
/// assert_eq!(error.context_value("min_length"), Some(&serde_json::json!(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Machine-readable code for programmatic branching and i18n.
    ///
    /// Examples: "required", "email_format", "unexpected_field"
    pub code: Cow<'static, str>,

    /// Human-readable message meant for direct display.
    pub message: Cow<'static, str>,

    /// Path locating the error inside a composite structure.
    ///
    /// Examples: "email", "address.city.population", "[2].age".
    /// Absent for a root-level scalar failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Parameters of the failing rule, e.g. `{"min": 5, "actual": 2}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    ///
    /// `code` must not be empty: callers branch on it, and an empty code
    /// cannot be told apart from a missing one once serialized. The
    /// contract is checked in debug builds only.
    ///
    /// # Panics
    ///
    /// In debug builds, when `code` is empty.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        let code = code.into();
        debug_assert!(!code.is_empty(), "validation error code must not be empty");
        Self {
            code,
            message: message.into(),
            field: None,
            context: None,
        }
    }

    /// Sets the field path for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds one context parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replaces the whole context map.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_context_map(mut self, context: Option<Map<String, Value>>) -> Self {
        self.context = context;
        self
    }

    /// Looks up a context parameter by key.
    #[must_use]
    pub fn context_value(&self, key: &str) -> Option<&Value> {
        self.context.as_ref().and_then(|ctx| ctx.get(key))
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Code reported when a required value is missing.
    pub const REQUIRED: &'static str = "required";

    /// Code reported when a sanitize hook fails.
    pub const SANITIZE_ERROR: &'static str = "SANITIZE_ERROR";

    /// Code reported for keys an object shape does not declare.
    pub const UNEXPECTED_FIELD: &'static str = "unexpected_field";

    /// Creates a "required" error.
    pub fn required() -> Self {
        super::rule::required().to_error()
    }

    /// Creates a sanitize-time failure.
    pub fn sanitize_failed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Self::SANITIZE_ERROR, message)
    }

    /// Creates an "unexpected_field" error for `key`.
    pub fn unexpected_field(key: impl Into<String>) -> Self {
        Self::new(Self::UNEXPECTED_FIELD, "Unexpected field").with_field(key)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if let Some(context) = &self.context {
            write!(f, " (context: [")?;
            for (i, (k, v)) in context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// SANITIZE ERROR
// ============================================================================

/// Error returned by a sanitize hook.
///
/// The lifecycle converts it into a single `SANITIZE_ERROR` validation error
/// whose message is the rendered error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SanitizeError {
    /// The transform failed with a known reason.
    #[error("{0}")]
    Failed(Cow<'static, str>),

    /// The transform failed without a usable reason.
    #[error("Sanitization failed")]
    Unspecified,
}

impl SanitizeError {
    /// Creates a failure with a message.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Failed(message.into())
    }
}

// ============================================================================
// BUILD ERROR
// ============================================================================

/// Construction-time misuse of a unit.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// A pipeline was given no steps.
    #[error("pipeline requires at least one step")]
    EmptyPipeline,

    /// A pattern option did not compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Options are inconsistent with each other.
    #[error("invalid options: {0}")]
    InvalidOptions(Cow<'static, str>),
}

// ============================================================================
// TESTS
// ============================================================================
