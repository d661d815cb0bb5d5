//! Rule metadata
//!
//! A [`Rule`] names one failure kind a unit can report, together with the
//! hints a UI shows before (`helper_text`) and after (`error_message`) the
//! user gets it wrong. Units expose their rules through
//! [`UnitInfo::rules`](super::UnitInfo::rules); failures are built from them with
//! [`Rule::to_error`] or [`ValidationResult::from_rules`](super::ValidationResult::from_rules).

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ValidationError;

/// User- or developer-facing copy for a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleHint {
    pub helper_text: Cow<'static, str>,
    pub error_message: Cow<'static, str>,
}

impl RuleHint {
    pub fn new(
        helper_text: impl Into<Cow<'static, str>>,
        error_message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            helper_text: helper_text.into(),
            error_message: error_message.into(),
        }
    }
}

/// Named failure metadata.
///
/// # Examples
///
/// ```rust
/// use nebula_sanitizer::foundation::{Rule, RuleHint};
///
/// let rule = Rule::new("number_range", RuleHint::new("Range", "Number must be between 1 and 10"))
///     .with_context("min", 1)
///     .with_context("max", 10);
///
/// let error = rule.to_error();
/// assert_eq!(error.code, "number_range");
/// assert_eq!(error.message, "Number must be between 1 and 10");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub code: Cow<'static, str>,
    pub user: RuleHint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev: Option<RuleHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

impl Rule {
    /// Creates a rule reporting `code`.
    ///
    /// # Panics
    ///
    /// In debug builds, when `code` is empty. Codes are what callers branch
    /// on and must be non-empty.
    pub fn new(code: impl Into<Cow<'static, str>>, user: RuleHint) -> Self {
        let code = code.into();
        debug_assert!(!code.is_empty(), "rule code must not be empty");
        Self {
            code,
            user,
            dev: None,
            context: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_dev(mut self, dev: RuleHint) -> Self {
        self.dev = Some(dev);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the error this rule reports.
    pub fn to_error(&self) -> ValidationError {
        ValidationError::new(self.code.clone(), self.user.error_message.clone())
            .with_context_map(self.context.clone())
    }
}

/// Rules exposed by a unit, keyed by rule name, in declaration order.
pub type RuleSet = IndexMap<String, Rule>;

/// Inserts every rule of `other` whose name is not already present.
///
/// The first definition of a name wins.
pub fn merge_first_wins(into: &mut RuleSet, other: RuleSet) {
    for (name, rule) in other {
        into.entry(name).or_insert(rule);
    }
}

// ============================================================================
// BUILT-IN RULES
// ============================================================================

/// Value was null or absent.
pub fn required() -> Rule {
    Rule::new(
        ValidationError::REQUIRED,
        RuleHint::new("Required", "Value is required"),
    )
}

/// Value was not an object.
pub fn object() -> Rule {
    Rule::new(
        "object",
        RuleHint::new("Must be a valid object", "Value must be a valid object"),
    )
}

/// Value was not an array.
pub fn array() -> Rule {
    Rule::new(
        "array",
        RuleHint::new("Must be a valid array", "Value must be a valid array"),
    )
}

/// Value was not text.
pub fn string() -> Rule {
    Rule::new("string", RuleHint::new("Text", "Value is not valid text"))
        .with_dev(RuleHint::new("string", "Value is not of type string"))
}

/// Value was not a number.
pub fn number() -> Rule {
    Rule::new(
        "number",
        RuleHint::new("Number", "Value is not a valid number"),
    )
}

/// Value had a shape the unit cannot decode.
pub fn type_mismatch() -> Rule {
    Rule::new(
        "type",
        RuleHint::new("Value", "Value has an unsupported type"),
    )
}
