//! Membership in a fixed set of values

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::{
    BuildError, Check, Reconfigure, Rule, RuleHint, RuleSet, SanitizeError, UnitInfo,
    UnitOptions, ValidationResult,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneOfOptions<T> {
    #[serde(flatten)]
    pub base: UnitOptions,
    pub allowed_values: Vec<T>,
}

/// Accepts only the listed values, compared with `==`.
///
/// # Examples
///
/// ```rust
/// use nebula_sanitizer::prelude::*;
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let role = one_of(["admin", "editor"].map(String::from)).unwrap();
/// assert!(role.run(Some("admin".to_owned())).await.is_success());
///
/// let result = role.run(Some("root".to_owned())).await;
/// assert_eq!(result.errors()[0].code, "one_of");
/// assert_eq!(result.errors()[0].message, "Value must be one of: admin, editor");
/// assert_eq!(result.errors()[0].context_value("received"), Some(&json!("root")));
/// # });
/// ```
#[derive(Clone)]
pub struct OneOf<T> {
    options: OneOfOptions<T>,
    allowed: Value,
}

impl<T> OneOf<T>
where
    T: Serialize,
{
    /// # Errors
    ///
    /// [`BuildError::InvalidOptions`] when no value is allowed.
    pub fn new(options: OneOfOptions<T>) -> Result<Self, BuildError> {
        if options.allowed_values.is_empty() {
            return Err(BuildError::InvalidOptions(
                "one_of requires at least one allowed value".into(),
            ));
        }
        let allowed = serde_json::to_value(&options.allowed_values)
            .map_err(|error| BuildError::InvalidOptions(error.to_string().into()))?;
        Ok(Self { options, allowed })
    }

    fn rule(&self) -> Rule {
        let listed = match &self.allowed {
            Value::Array(values) => values.iter().map(display).collect::<Vec<_>>().join(", "),
            other => display(other),
        };
        Rule::new(
            "one_of",
            RuleHint::new(
                format!("One of: {listed}"),
                format!("Value must be one of: {listed}"),
            ),
        )
        .with_context("allowed_values", self.allowed.clone())
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl<T> fmt::Debug for OneOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneOf")
            .field("allowed_values", &self.allowed)
            .field("options", &self.options.base)
            .finish()
    }
}

impl<T> UnitInfo for OneOf<T>
where
    T: Serialize + Send + Sync,
{
    fn options(&self) -> &UnitOptions {
        &self.options.base
    }

    fn rules(&self) -> RuleSet {
        RuleSet::from([("one_of".to_owned(), self.rule())])
    }
}

#[async_trait]
impl<T> Check for OneOf<T>
where
    T: PartialEq + Serialize + Send + Sync + 'static,
{
    type Input = T;
    type Output = T;

    async fn validate(&self, input: &T) -> ValidationResult {
        if self.options.allowed_values.contains(input) {
            ValidationResult::pass()
        } else {
            let received = serde_json::to_value(input).unwrap_or(Value::Null);
            self.rule().to_error().with_context("received", received).into()
        }
    }

    async fn sanitize(&self, input: T) -> Result<T, SanitizeError> {
        Ok(input)
    }
}

impl<T> Reconfigure for OneOf<T>
where
    T: Clone + Serialize,
{
    type Options = OneOfOptions<T>;

    fn config(&self) -> &OneOfOptions<T> {
        &self.options
    }

    fn with_config(&self, options: OneOfOptions<T>) -> Result<Self, BuildError> {
        Self::new(options)
    }
}

/// Shorthand for a required [`OneOf`].
pub fn one_of<T: Serialize>(allowed_values: impl IntoIterator<Item = T>) -> Result<OneOf<T>, BuildError> {
    OneOf::new(OneOfOptions {
        base: UnitOptions::default(),
        allowed_values: allowed_values.into_iter().collect(),
    })
}
