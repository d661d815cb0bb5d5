//! Core traits for the unit system
//!
//! - [`UnitInfo`]: options and rule metadata every unit exposes.
//! - [`Unit`]: the typed execution contract: `run(Option<Input>)`.
//! - [`Check`]: the lifecycle hooks (normalize, validate, sanitize) leaf
//!   units implement. Every `Check` is a `Unit` through a blanket impl that
//!   runs the hooks in order behind the required gate.
//! - [`DynUnit`]: the type-erased seam over [`serde_json::Value`] that
//!   pipelines and structural composites hold their children through.

use std::any::Any;
use std::borrow::Cow;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use super::rule::{self, Rule, RuleSet};
use super::{
    SanitizeError, SanitizeResult, UnitKind, UnitOptions, ValidationError, ValidationResult,
};

// ============================================================================
// UNIT METADATA
// ============================================================================

/// Options and rule metadata shared by every unit.
pub trait UnitInfo: Send + Sync {
    /// The options recognized by every unit.
    fn options(&self) -> &UnitOptions;

    /// Named rules this unit can report, for UI hints and introspection.
    fn rules(&self) -> RuleSet {
        RuleSet::new()
    }

    /// Rule reported when erased input cannot be decoded into the unit's
    /// input type.
    fn type_rule(&self) -> Rule {
        rule::type_mismatch()
    }

    /// Kind of value the unit produces.
    fn kind(&self) -> UnitKind {
        UnitKind::Unknown
    }

    /// A sample accepted input, for placeholders and docs.
    fn example(&self) -> Option<&'static str> {
        None
    }

    /// Name of the textual format the unit expects, e.g. `email`.
    fn format(&self) -> Option<&'static str> {
        None
    }
}

// ============================================================================
// UNIT
// ============================================================================

/// The execution contract shared by leaves, pipelines and composites.
///
/// `None` stands for a null or absent value. It never reaches the unit's
/// own logic: the required gate either lets it through (optional units) or
/// reports `required`.
#[async_trait]
pub trait Unit: UnitInfo {
    type Input: Send + 'static;
    type Output: Send + 'static;

    /// Validates and sanitizes `input`.
    ///
    /// Input-dependent failures are returned as data, never as panics.
    async fn run(&self, input: Option<Self::Input>) -> SanitizeResult<Self::Output>;
}

/// The required gate: what a unit returns for a null or absent input.
pub fn check_required<T>(options: &UnitOptions) -> SanitizeResult<T> {
    if options.is_optional {
        SanitizeResult::passthrough(None)
    } else {
        SanitizeResult::required()
    }
}

/// The required gate at the [`Value`] boundary.
///
/// Returns the present value, or the result to return for a null/absent
/// one. An optional unit hands back the input unchanged (`null` stays
/// `null`, absent stays absent).
pub fn require_value(
    options: &UnitOptions,
    input: Option<Value>,
) -> Result<Value, SanitizeResult<Value>> {
    match input {
        Some(Value::Null) if options.is_optional => {
            Err(SanitizeResult::passthrough(Some(Value::Null)))
        }
        None | Some(Value::Null) => Err(check_required(options)),
        Some(value) => Ok(value),
    }
}

// ============================================================================
// CHECK
// ============================================================================

/// Lifecycle hooks of a leaf unit.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use nebula_sanitizer::prelude::*;
///
/// struct Shout {
///     options: UnitOptions,
/// }
///
/// impl UnitInfo for Shout {
///     fn options(&self) -> &UnitOptions {
///         &self.options
///     }
/// }
///
/// #[async_trait]
/// impl Check for Shout {
///     type Input = String;
///     type Output = String;
///
///     async fn validate(&self, input: &String) -> ValidationResult {
///         if input.is_empty() {
///             ValidationError::new("empty", "Nothing to shout").into()
///         } else {
///             ValidationResult::pass()
///         }
///     }
///
///     async fn sanitize(&self, input: String) -> Result<String, SanitizeError> {
///         Ok(input.to_uppercase())
///     }
/// }
///
/// # futures::executor::block_on(async {
/// let shout = Shout { options: UnitOptions::default() };
/// let result = shout.run(Some("hey".to_owned())).await;
/// assert_eq!(result.data().map(String::as_str), Some("HEY"));
/// # });
/// ```
#[async_trait]
pub trait Check: UnitInfo {
    type Input: Send + Sync + 'static;
    type Output: Send + 'static;

    /// Brings the input into canonical form ahead of validation.
    ///
    /// Must not fail: produce a best-effort value that `validate` rejects.
    async fn normalize(&self, input: Self::Input) -> Self::Input {
        input
    }

    /// Decides whether the normalized input passes.
    async fn validate(&self, input: &Self::Input) -> ValidationResult;

    /// Transforms a validated input into the output.
    async fn sanitize(&self, input: Self::Input) -> Result<Self::Output, SanitizeError>;
}

#[async_trait]
impl<C> Unit for C
where
    C: Check,
{
    type Input = <C as Check>::Input;
    type Output = <C as Check>::Output;

    async fn run(&self, input: Option<<C as Check>::Input>) -> SanitizeResult<<C as Check>::Output> {
        let Some(input) = input else {
            return check_required(self.options());
        };
        trace!(unit = std::any::type_name::<C>(), "running check");

        let normalized = self.normalize(input).await;
        let validation = self.validate(&normalized).await;
        if !validation.is_valid() {
            return SanitizeResult::failure(validation.into_errors());
        }

        match AssertUnwindSafe(self.sanitize(normalized)).catch_unwind().await {
            Ok(Ok(data)) => SanitizeResult::success(data),
            Ok(Err(error)) => {
                debug!(unit = std::any::type_name::<C>(), %error, "sanitize failed");
                SanitizeResult::failure(vec![ValidationError::sanitize_failed(error.to_string())])
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                debug!(unit = std::any::type_name::<C>(), %message, "sanitize panicked");
                SanitizeResult::failure(vec![ValidationError::sanitize_failed(message)])
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> Cow<'static, str> {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        Cow::Borrowed(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        Cow::Owned(message.clone())
    } else {
        Cow::Borrowed("Sanitization failed")
    }
}

// ============================================================================
// TYPE-ERASED UNIT
// ============================================================================

/// A unit over [`serde_json::Value`], as held by pipelines and composites.
///
/// `None` is an absent value (e.g. a missing object key); `Some(Value::Null)`
/// is an explicit null. Both hit the required gate, and an optional unit
/// passes either through unchanged.
#[async_trait]
pub trait DynUnit: Send + Sync {
    async fn run(&self, input: Option<Value>) -> SanitizeResult<Value>;

    fn rules(&self) -> RuleSet;

    fn options(&self) -> UnitOptions;

    fn kind(&self) -> UnitKind;

    fn example(&self) -> Option<&'static str>;

    fn format(&self) -> Option<&'static str>;
}

/// Shared handle to a type-erased unit.
pub type SharedUnit = Arc<dyn DynUnit>;

/// Adapter running a typed [`Unit`] at the [`Value`] boundary.
///
/// Decoding failures report the unit's [`UnitInfo::type_rule`]; encoding
/// failures report `SANITIZE_ERROR`.
#[derive(Debug, Clone)]
pub struct Erased<U>(U);

#[async_trait]
impl<U> DynUnit for Erased<U>
where
    U: Unit,
    U::Input: DeserializeOwned,
    U::Output: Serialize,
{
    async fn run(&self, input: Option<Value>) -> SanitizeResult<Value> {
        match input {
            None => encode(self.0.run(None).await),
            Some(Value::Null) => {
                let result = self.0.run(None).await;
                if result.is_success() && result.data().is_none() {
                    SanitizeResult::passthrough(Some(Value::Null))
                } else {
                    encode(result)
                }
            }
            Some(value) => {
                let actual = json_type_name(&value);
                match serde_json::from_value::<U::Input>(value) {
                    Ok(input) => encode(self.0.run(Some(input)).await),
                    Err(_) => SanitizeResult::failure(vec![
                        self.0.type_rule().to_error().with_context("actual", actual),
                    ]),
                }
            }
        }
    }

    fn rules(&self) -> RuleSet {
        self.0.rules()
    }

    fn options(&self) -> UnitOptions {
        *self.0.options()
    }

    fn kind(&self) -> UnitKind {
        self.0.kind()
    }

    fn example(&self) -> Option<&'static str> {
        self.0.example()
    }

    fn format(&self) -> Option<&'static str> {
        self.0.format()
    }
}

fn encode<T: Serialize>(result: SanitizeResult<T>) -> SanitizeResult<Value> {
    match result.into_result() {
        Ok(None) => SanitizeResult::passthrough(None),
        Ok(Some(data)) => match serde_json::to_value(data) {
            Ok(value) => SanitizeResult::success(value),
            Err(error) => SanitizeResult::failure(vec![ValidationError::sanitize_failed(
                error.to_string(),
            )]),
        },
        Err(errors) => SanitizeResult::failure(errors),
    }
}

/// Name of the JSON type of `value`, as reported in error context.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// CONVERSION INTO SHARED UNITS
// ============================================================================

/// Conversion into a [`SharedUnit`].
///
/// Implemented for every typed unit whose input and output cross the
/// [`Value`] boundary, and for shared units themselves.
pub trait IntoShared {
    fn shared(self) -> SharedUnit;
}

impl<U> IntoShared for U
where
    U: Unit + 'static,
    U::Input: DeserializeOwned,
    U::Output: Serialize,
{
    fn shared(self) -> SharedUnit {
        Arc::new(Erased(self))
    }
}

impl IntoShared for SharedUnit {
    fn shared(self) -> SharedUnit {
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================
