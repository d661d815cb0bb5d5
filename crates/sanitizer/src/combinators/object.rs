//! Object shapes
//!
//! An [`ObjectShape`] runs one child unit per declared key and rebuilds the
//! object from their outputs. Child errors are reported under the key they
//! came from, so a failure deep inside nested shapes reads
//! `address.city.population`.

use std::fmt;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::foundation::{
    BuildError, PathSegment, Reconfigure, RuleSet, SanitizeResult, SharedUnit, Unit, UnitInfo,
    UnitKind, UnitOptions, ValidationError, json_type_name, merge_first_wins, require_value,
    rule,
};

/// Child units keyed by field name, in declaration order.
///
/// Build one with the [`schema!`](crate::schema) macro.
pub type Schema = IndexMap<String, SharedUnit>;

/// Options of an [`ObjectShape`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectShapeOptions {
    #[serde(flatten)]
    pub base: UnitOptions,

    /// Keep keys the schema does not declare instead of reporting them as
    /// `unexpected_field`.
    pub allow_additional_properties: bool,
}

// ============================================================================
// OBJECT SHAPE
// ============================================================================

/// Validates an object field by field.
///
/// Every declared field runs, even after an earlier one failed, and the
/// errors of all of them are collected. Undeclared keys are reported as
/// `unexpected_field` unless
/// [`allow_additional_properties`](ObjectShapeOptions::allow_additional_properties)
/// is set. A failed run carries no partial object.
///
/// # Examples
///
/// ```rust
/// use nebula_sanitizer::prelude::*;
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let user = ObjectShape::new(
///     schema! {
///         "name" => pipeline![trim(), min_length(2)].unwrap(),
///         "age" => integer(),
///     },
///     ObjectShapeOptions::default(),
/// );
///
/// let result = user.run(Some(json!({"name": "  Ada ", "age": 36}))).await;
/// assert_eq!(result.into_data(), Some(json!({"name": "Ada", "age": 36})));
///
/// let result = user.run(Some(json!({"name": "A", "age": 36, "admin": true}))).await;
/// let fields: Vec<_> = result.errors().iter().filter_map(|e| e.field.as_deref()).collect();
/// assert_eq!(fields, ["name", "admin"]);
/// # });
/// ```
#[derive(Clone)]
pub struct ObjectShape {
    schema: Schema,
    options: ObjectShapeOptions,
}

impl ObjectShape {
    pub fn new(schema: Schema, options: ObjectShapeOptions) -> Self {
        Self { schema, options }
    }

    /// Returns the declared fields.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl fmt::Debug for ObjectShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectShape")
            .field("fields", &self.schema.keys().collect::<Vec<_>>())
            .field("options", &self.options)
            .finish()
    }
}

impl UnitInfo for ObjectShape {
    fn options(&self) -> &UnitOptions {
        &self.options.base
    }

    fn rules(&self) -> RuleSet {
        let mut rules = RuleSet::new();
        rules.insert("object".into(), rule::object());
        for unit in self.schema.values() {
            merge_first_wins(&mut rules, unit.rules());
        }
        rules
    }

    fn type_rule(&self) -> rule::Rule {
        rule::object()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::Object
    }
}

#[async_trait]
impl Unit for ObjectShape {
    type Input = Value;
    type Output = Value;

    async fn run(&self, input: Option<Value>) -> SanitizeResult<Value> {
        let value = match require_value(&self.options.base, input) {
            Ok(value) => value,
            Err(gated) => return gated,
        };
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return SanitizeResult::failure(vec![
                    rule::object()
                        .to_error()
                        .with_context("actual", json_type_name(&other)),
                ]);
            }
        };

        let mut errors = Vec::new();
        let mut failed_fields = 0usize;
        for (key, unit) in &self.schema {
            let field = object.get_mut(key).map(Value::take);
            match unit.run(field).await.into_result() {
                Ok(Some(data)) => {
                    object.insert(key.clone(), data);
                }
                Ok(None) => {}
                Err(child) => {
                    failed_fields += 1;
                    let segment = PathSegment::Key(key);
                    errors.extend(child.into_iter().map(|error| segment.prefix(error)));
                }
            }
        }

        let mut unexpected = 0usize;
        if !self.options.allow_additional_properties {
            for key in object.keys() {
                if !self.schema.contains_key(key) {
                    unexpected += 1;
                    errors.push(ValidationError::unexpected_field(key.clone()));
                }
            }
        }

        if errors.is_empty() {
            SanitizeResult::success(Value::Object(object))
        } else {
            debug!(failed_fields, unexpected, "object shape rejected input");
            SanitizeResult::failure(errors)
        }
    }
}

impl Reconfigure for ObjectShape {
    type Options = ObjectShapeOptions;

    fn config(&self) -> &ObjectShapeOptions {
        &self.options
    }

    fn with_config(&self, options: ObjectShapeOptions) -> Result<Self, BuildError> {
        Ok(Self::new(self.schema.clone(), options))
    }
}

// ============================================================================
// TESTS
// ============================================================================
