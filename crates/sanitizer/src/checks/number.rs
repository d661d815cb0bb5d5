//! Numeric checks
//!
//! Numbers are [`serde_json::Number`]s, so integers stay integral through a
//! pipeline (`"42"` becomes `42`, not `42.0`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::foundation::{
    BuildError, Check, Reconfigure, Rule, RuleHint, RuleSet, SanitizeError, UnitInfo, UnitKind,
    UnitOptions, ValidationResult, rule,
};

/// Parses decimal text into a JSON number.
///
/// Integers are tried first so they keep an exact representation. Text that
/// parses to a non-finite float (`inf`, `NaN`) is rejected.
pub fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(int.into());
    }
    if let Ok(uint) = text.parse::<u64>() {
        return Some(uint.into());
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn is_integer(number: &Number) -> bool {
    number.is_i64() || number.is_u64() || number.as_f64().is_some_and(|f| f.fract() == 0.0)
}

// ============================================================================
// STRING TO NUMBER
// ============================================================================

/// Converts numeric text into a number.
///
/// Surrounding whitespace is ignored. Empty text is not a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringToNumber {
    options: UnitOptions,
}

impl StringToNumber {
    #[must_use]
    pub const fn new(options: UnitOptions) -> Self {
        Self { options }
    }
}

impl UnitInfo for StringToNumber {
    fn options(&self) -> &UnitOptions {
        &self.options
    }

    fn rules(&self) -> RuleSet {
        RuleSet::from([("number".to_owned(), rule::number())])
    }

    fn type_rule(&self) -> Rule {
        rule::string()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::Number
    }
}

#[async_trait]
impl Check for StringToNumber {
    type Input = String;
    type Output = Number;

    async fn normalize(&self, input: String) -> String {
        input.trim().to_owned()
    }

    async fn validate(&self, input: &String) -> ValidationResult {
        match parse_number(input) {
            Some(_) => ValidationResult::pass(),
            None => rule::number().to_error().into(),
        }
    }

    async fn sanitize(&self, input: String) -> Result<Number, SanitizeError> {
        parse_number(&input).ok_or_else(|| SanitizeError::new(format!("`{input}` is not a number")))
    }
}

impl Reconfigure for StringToNumber {
    type Options = UnitOptions;

    fn config(&self) -> &UnitOptions {
        &self.options
    }

    fn with_config(&self, options: UnitOptions) -> Result<Self, BuildError> {
        Ok(Self::new(options))
    }
}

#[must_use]
pub const fn string_to_number() -> StringToNumber {
    StringToNumber::new(UnitOptions::required())
}

// ============================================================================
// INTEGER
// ============================================================================

/// Requires a whole number. `3.0` counts as whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Integer {
    options: UnitOptions,
}

impl Integer {
    #[must_use]
    pub const fn new(options: UnitOptions) -> Self {
        Self { options }
    }

    fn rule() -> Rule {
        Rule::new(
            "integer",
            RuleHint::new("Whole number", "Number must be an integer"),
        )
    }
}

impl UnitInfo for Integer {
    fn options(&self) -> &UnitOptions {
        &self.options
    }

    fn rules(&self) -> RuleSet {
        RuleSet::from([
            ("number".to_owned(), rule::number()),
            ("integer".to_owned(), Self::rule()),
        ])
    }

    fn type_rule(&self) -> Rule {
        rule::number()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::Integer
    }
}

#[async_trait]
impl Check for Integer {
    type Input = Number;
    type Output = Number;

    async fn validate(&self, input: &Number) -> ValidationResult {
        if is_integer(input) {
            ValidationResult::pass()
        } else {
            Self::rule().to_error().with_context("actual", input.clone()).into()
        }
    }

    async fn sanitize(&self, input: Number) -> Result<Number, SanitizeError> {
        Ok(input)
    }
}

impl Reconfigure for Integer {
    type Options = UnitOptions;

    fn config(&self) -> &UnitOptions {
        &self.options
    }

    fn with_config(&self, options: UnitOptions) -> Result<Self, BuildError> {
        Ok(Self::new(options))
    }
}

#[must_use]
pub const fn integer() -> Integer {
    Integer::new(UnitOptions::required())
}

// ============================================================================
// RANGE
// ============================================================================

/// Inclusive bounds; a missing bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    #[serde(flatten)]
    pub base: UnitOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Requires a number within inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    options: RangeOptions,
}

impl Range {
    /// # Errors
    ///
    /// [`BuildError::InvalidOptions`] when a bound is not finite or
    /// `min > max`.
    pub fn new(options: RangeOptions) -> Result<Self, BuildError> {
        let finite = |bound: Option<f64>| bound.is_none_or(f64::is_finite);
        if !finite(options.min) || !finite(options.max) {
            return Err(BuildError::InvalidOptions("range bounds must be finite".into()));
        }
        match (options.min, options.max) {
            (Some(min), Some(max)) if min > max => Err(BuildError::InvalidOptions(
                format!("range minimum {min} exceeds maximum {max}").into(),
            )),
            _ => Ok(Self { options }),
        }
    }

    fn rule(&self) -> Rule {
        let message = match (self.options.min, self.options.max) {
            (Some(min), Some(max)) => format!("Number must be between {min} and {max}"),
            (Some(min), None) => format!("Number must be at least {min}"),
            (None, Some(max)) => format!("Number must be at most {max}"),
            (None, None) => "Number is out of range".to_owned(),
        };
        let mut rule = Rule::new("number_range", RuleHint::new("Range", message));
        if let Some(min) = self.options.min {
            rule = rule.with_context("min", min);
        }
        if let Some(max) = self.options.max {
            rule = rule.with_context("max", max);
        }
        rule
    }
}

impl UnitInfo for Range {
    fn options(&self) -> &UnitOptions {
        &self.options.base
    }

    fn rules(&self) -> RuleSet {
        RuleSet::from([
            ("number".to_owned(), rule::number()),
            ("range".to_owned(), self.rule()),
        ])
    }

    fn type_rule(&self) -> Rule {
        rule::number()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::Number
    }
}

#[async_trait]
impl Check for Range {
    type Input = Number;
    type Output = Number;

    async fn validate(&self, input: &Number) -> ValidationResult {
        let Some(value) = input.as_f64() else {
            return rule::number().to_error().into();
        };
        let below = self.options.min.is_some_and(|min| value < min);
        let above = self.options.max.is_some_and(|max| value > max);
        if below || above {
            self.rule().to_error().with_context("actual", input.clone()).into()
        } else {
            ValidationResult::pass()
        }
    }

    async fn sanitize(&self, input: Number) -> Result<Number, SanitizeError> {
        Ok(input)
    }
}

impl Reconfigure for Range {
    type Options = RangeOptions;

    fn config(&self) -> &RangeOptions {
        &self.options
    }

    fn with_config(&self, options: RangeOptions) -> Result<Self, BuildError> {
        Self::new(options)
    }
}

/// Shorthand for a required [`Range`] with both bounds.
pub fn range(min: f64, max: f64) -> Result<Range, BuildError> {
    Range::new(RangeOptions {
        min: Some(min),
        max: Some(max),
        ..RangeOptions::default()
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{IntoShared, Unit};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("42", Some(json!(42)))]
    #[case("-7", Some(json!(-7)))]
    #[case("3.5", Some(json!(3.5)))]
    #[case("18446744073709551615", Some(json!(u64::MAX)))]
    #[case("1e3", Some(json!(1000.0)))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    fn test_parse_number(#[case] text: &str, #[case] expected: Option<serde_json::Value>) {
        assert_eq!(parse_number(text).map(serde_json::Value::Number), expected);
    }

    #[tokio::test]
    async fn test_string_to_number_trims() {
        let result = string_to_number().run(Some(" 12 ".into())).await;
        assert_eq!(result.into_data(), Some(Number::from(12)));
    }

    #[tokio::test]
    async fn test_string_to_number_rejects_text() {
        let result = string_to_number().run(Some("twelve".into())).await;
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].code, "number");
        assert_eq!(result.errors()[0].message, "Value is not a valid number");
    }

    #[tokio::test]
    async fn test_string_to_number_reports_string_type() {
        let result = string_to_number().shared().run(Some(json!(12))).await;
        assert_eq!(result.errors()[0].code, "string");
    }

    #[rstest]
    #[case(json!(3), true)]
    #[case(json!(-3), true)]
    #[case(json!(3.0), true)]
    #[case(json!(3.5), false)]
    #[tokio::test]
    async fn test_integer(#[case] input: serde_json::Value, #[case] ok: bool) {
        let result = integer().shared().run(Some(input)).await;
        assert_eq!(result.is_success(), ok);
    }

    #[tokio::test]
    async fn test_integer_error_context() {
        let result = integer().shared().run(Some(json!(1.5))).await;
        let error = &result.errors()[0];
        assert_eq!(error.code, "integer");
        assert_eq!(error.message, "Number must be an integer");
        assert_eq!(error.context_value("actual"), Some(&json!(1.5)));
    }

    #[tokio::test]
    async fn test_integer_reports_number_type() {
        let result = integer().shared().run(Some(json!("3"))).await;
        assert_eq!(result.errors()[0].code, "number");
        assert_eq!(result.errors()[0].context_value("actual"), Some(&json!("string")));
    }

    #[rstest]
    #[case(json!(1), true)]
    #[case(json!(10), true)]
    #[case(json!(5.5), true)]
    #[case(json!(0), false)]
    #[case(json!(10.01), false)]
    #[tokio::test]
    async fn test_range_is_inclusive(#[case] input: serde_json::Value, #[case] ok: bool) {
        let unit = range(1.0, 10.0).unwrap().shared();
        assert_eq!(unit.run(Some(input)).await.is_success(), ok);
    }

    #[tokio::test]
    async fn test_range_error() {
        let result = range(1.0, 10.0).unwrap().shared().run(Some(json!(11))).await;
        let error = &result.errors()[0];
        assert_eq!(error.code, "number_range");
        assert_eq!(error.message, "Number must be between 1 and 10");
        assert_eq!(error.context_value("min"), Some(&json!(1.0)));
        assert_eq!(error.context_value("actual"), Some(&json!(11)));
    }

    #[tokio::test]
    async fn test_half_open_range() {
        let at_least = Range::new(RangeOptions {
            min: Some(0.0),
            ..RangeOptions::default()
        })
        .unwrap();
        assert!(at_least.run(Some(Number::from(u64::MAX))).await.is_success());
        let result = at_least.run(Some(Number::from(-1))).await;
        assert_eq!(result.errors()[0].message, "Number must be at least 0");
    }

    #[test]
    fn test_inverted_range_is_a_build_error() {
        assert!(matches!(range(10.0, 1.0), Err(BuildError::InvalidOptions(_))));
        assert!(matches!(range(f64::NAN, 1.0), Err(BuildError::InvalidOptions(_))));
    }

    #[test]
    fn test_range_options_from_json() {
        let options: RangeOptions = serde_json::from_value(json!({"min": 1, "max": 5})).unwrap();
        let unit = Range::new(options).unwrap();
        assert_eq!(unit.config().max, Some(5.0));
    }
}
