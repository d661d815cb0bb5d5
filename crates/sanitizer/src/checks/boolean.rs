//! Boolean text conversion

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::foundation::{
    BuildError, Check, Reconfigure, Rule, RuleHint, RuleSet, SanitizeError, UnitInfo, UnitKind,
    UnitOptions, ValidationResult, rule,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringToBooleanOptions {
    #[serde(flatten)]
    pub base: UnitOptions,
    /// Spellings of `true`, matched case-insensitively.
    pub true_values: Vec<String>,
    /// Spellings of `false`, matched case-insensitively.
    pub false_values: Vec<String>,
}

impl Default for StringToBooleanOptions {
    fn default() -> Self {
        let words = |words: &[&str]| words.iter().map(|w| (*w).to_owned()).collect();
        Self {
            base: UnitOptions::default(),
            true_values: words(&["true", "1", "yes", "on"]),
            false_values: words(&["false", "0", "no", "off"]),
        }
    }
}

/// Converts `"yes"`, `"Off"`, `" 1 "` and the like into a boolean.
///
/// A spelling listed as both true and false reads as `true`.
#[derive(Debug, Clone)]
pub struct StringToBoolean {
    options: StringToBooleanOptions,
    true_values: Vec<String>,
    false_values: Vec<String>,
}

impl StringToBoolean {
    #[must_use]
    pub fn new(options: StringToBooleanOptions) -> Self {
        let lower = |values: &[String]| values.iter().map(|v| v.trim().to_lowercase()).collect();
        Self {
            true_values: lower(&options.true_values),
            false_values: lower(&options.false_values),
            options,
        }
    }

    fn rule(&self) -> Rule {
        Rule::new(
            "boolean",
            RuleHint::new("True or false", "Input must be true or false"),
        )
        .with_dev(RuleHint::new(
            format!(
                "Boolean string ({} / {})",
                self.true_values.join(", "),
                self.false_values.join(", ")
            ),
            "Input must be a valid boolean string",
        ))
        .with_context("true_values", self.true_values.clone())
        .with_context("false_values", self.false_values.clone())
    }
}

impl Default for StringToBoolean {
    fn default() -> Self {
        Self::new(StringToBooleanOptions::default())
    }
}

impl UnitInfo for StringToBoolean {
    fn options(&self) -> &UnitOptions {
        &self.options.base
    }

    fn rules(&self) -> RuleSet {
        RuleSet::from([
            ("string".to_owned(), rule::string()),
            ("boolean".to_owned(), self.rule()),
        ])
    }

    fn type_rule(&self) -> Rule {
        rule::string()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::Boolean
    }
}

#[async_trait]
impl Check for StringToBoolean {
    type Input = String;
    type Output = bool;

    async fn normalize(&self, input: String) -> String {
        input.trim().to_lowercase()
    }

    async fn validate(&self, input: &String) -> ValidationResult {
        if self.true_values.contains(input) || self.false_values.contains(input) {
            ValidationResult::pass()
        } else {
            self.rule().to_error().into()
        }
    }

    async fn sanitize(&self, input: String) -> Result<bool, SanitizeError> {
        Ok(self.true_values.contains(&input))
    }
}

impl Reconfigure for StringToBoolean {
    type Options = StringToBooleanOptions;

    fn config(&self) -> &StringToBooleanOptions {
        &self.options
    }

    fn with_config(&self, options: StringToBooleanOptions) -> Result<Self, BuildError> {
        Ok(Self::new(options))
    }
}

#[must_use]
pub fn string_to_boolean() -> StringToBoolean {
    StringToBoolean::default()
}
