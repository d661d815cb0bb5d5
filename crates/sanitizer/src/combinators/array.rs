//! Array shapes

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::foundation::{
    BuildError, PathSegment, Reconfigure, RuleSet, SanitizeResult, SharedUnit, Unit, UnitInfo,
    UnitKind, UnitOptions, json_type_name, merge_first_wins, require_value, rule,
};

/// Runs one unit over every element of an array.
///
/// All elements run; errors are reported under `[index]` in index order.
/// On success the output has the same length and order as the input, with
/// `null` where an optional item let an absent value through.
///
/// # Examples
///
/// ```rust
/// use nebula_sanitizer::prelude::*;
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let tags = ArrayShape::new(pipeline![trim(), lowercase()].unwrap().shared(), UnitOptions::default());
///
/// let result = tags.run(Some(json!([" Rust ", "ASYNC"]))).await;
/// assert_eq!(result.into_data(), Some(json!(["rust", "async"])));
///
/// let result = tags.run(Some(json!(["ok", 1, false]))).await;
/// assert_eq!(result.errors()[0].field.as_deref(), Some("[1]"));
/// assert_eq!(result.errors()[1].field.as_deref(), Some("[2]"));
/// # });
/// ```
#[derive(Clone)]
pub struct ArrayShape {
    item: SharedUnit,
    options: UnitOptions,
}

impl ArrayShape {
    pub fn new(item: SharedUnit, options: UnitOptions) -> Self {
        Self { item, options }
    }

    /// Returns the unit applied to each element.
    #[must_use]
    pub fn item(&self) -> &SharedUnit {
        &self.item
    }
}

impl fmt::Debug for ArrayShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayShape")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl UnitInfo for ArrayShape {
    fn options(&self) -> &UnitOptions {
        &self.options
    }

    fn rules(&self) -> RuleSet {
        let mut rules = RuleSet::new();
        rules.insert("array".into(), rule::array());
        merge_first_wins(&mut rules, self.item.rules());
        rules
    }

    fn type_rule(&self) -> rule::Rule {
        rule::array()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::Array
    }
}

#[async_trait]
impl Unit for ArrayShape {
    type Input = Value;
    type Output = Value;

    async fn run(&self, input: Option<Value>) -> SanitizeResult<Value> {
        let value = match require_value(&self.options, input) {
            Ok(value) => value,
            Err(gated) => return gated,
        };
        let items = match value {
            Value::Array(items) => items,
            other => {
                return SanitizeResult::failure(vec![
                    rule::array()
                        .to_error()
                        .with_context("actual", json_type_name(&other)),
                ]);
            }
        };

        let len = items.len();
        let mut output = Vec::with_capacity(len);
        let mut errors = Vec::new();
        let mut failed_items = 0usize;
        for (index, item) in items.into_iter().enumerate() {
            match self.item.run(Some(item)).await.into_result() {
                Ok(data) => output.push(data.unwrap_or(Value::Null)),
                Err(child) => {
                    failed_items += 1;
                    let segment = PathSegment::Index(index);
                    errors.extend(child.into_iter().map(|error| segment.prefix(error)));
                }
            }
        }

        if errors.is_empty() {
            SanitizeResult::success(Value::Array(output))
        } else {
            debug!(failed_items, len, "array shape rejected input");
            SanitizeResult::failure(errors)
        }
    }
}

impl Reconfigure for ArrayShape {
    type Options = UnitOptions;

    fn config(&self) -> &UnitOptions {
        &self.options
    }

    fn with_config(&self, options: UnitOptions) -> Result<Self, BuildError> {
        Ok(Self::new(self.item.clone(), options))
    }
}
