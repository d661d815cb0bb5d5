//! Sequential composition of units
//!
//! A [`Pipeline`] threads one value through its steps in order. Each step
//! receives the previous step's output, so a pipeline may change the
//! representation of the value along the way (text to number, say).
//!
//! # Examples
//!
//! ```rust
//! use nebula_sanitizer::prelude::*;
//! use serde_json::json;
//!
//! # futures::executor::block_on(async {
//! let age = pipeline![trim(), string_to_number(), integer()].unwrap();
//!
//! let ok = age.run(Some(json!(" 42 "))).await;
//! assert_eq!(ok.into_data(), Some(json!(42)));
//!
//! let failed = age.run(Some(json!("4.5"))).await;
//! assert_eq!(failed.errors()[0].code, "integer");
//! # });
//! ```

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::foundation::{
    BuildError, Reconfigure, RuleSet, SanitizeResult, SharedUnit, Unit, UnitInfo, UnitOptions,
    merge_first_wins, require_value,
};

// ============================================================================
// PIPELINE
// ============================================================================

/// Runs its steps in order and stops at the first failure.
///
/// The errors of a failed run are exactly the errors of the first failing
/// step; later steps never run. The required gate is the pipeline's own:
/// a null or absent input never reaches the first step.
#[derive(Clone)]
pub struct Pipeline {
    steps: Vec<SharedUnit>,
    options: UnitOptions,
}

impl Pipeline {
    /// Creates a pipeline over `steps`.
    ///
    /// # Errors
    ///
    /// [`BuildError::EmptyPipeline`] when `steps` is empty, whatever the
    /// options say.
    pub fn new(steps: Vec<SharedUnit>, options: UnitOptions) -> Result<Self, BuildError> {
        if steps.is_empty() {
            return Err(BuildError::EmptyPipeline);
        }
        Ok(Self { steps, options })
    }

    /// Returns the steps, in execution order.
    ///
    /// The returned list is a copy; changing it does not affect the pipeline.
    #[must_use]
    pub fn steps(&self) -> Vec<SharedUnit> {
        self.steps.clone()
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`: a pipeline cannot be built without steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.steps.len())
            .field("options", &self.options)
            .finish()
    }
}

impl UnitInfo for Pipeline {
    fn options(&self) -> &UnitOptions {
        &self.options
    }

    fn rules(&self) -> RuleSet {
        let mut rules = RuleSet::new();
        for step in &self.steps {
            merge_first_wins(&mut rules, step.rules());
        }
        rules
    }
}

#[async_trait]
impl Unit for Pipeline {
    type Input = Value;
    type Output = Value;

    async fn run(&self, input: Option<Value>) -> SanitizeResult<Value> {
        let mut current = match require_value(&self.options, input) {
            Ok(value) => Some(value),
            Err(gated) => return gated,
        };

        for (step, unit) in self.steps.iter().enumerate() {
            match unit.run(current.take()).await.into_result() {
                Ok(data) => current = data,
                Err(errors) => {
                    debug!(step, errors = errors.len(), "pipeline short-circuited");
                    return SanitizeResult::failure(errors);
                }
            }
        }

        SanitizeResult::passthrough(current)
    }
}

impl Reconfigure for Pipeline {
    type Options = UnitOptions;

    fn config(&self) -> &UnitOptions {
        &self.options
    }

    fn with_config(&self, options: UnitOptions) -> Result<Self, BuildError> {
        Self::new(self.steps.clone(), options)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{
        Check, IntoShared, Rule, RuleHint, SanitizeError, ValidationError, ValidationResult,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Appends a suffix; fails on inputs containing `reject`.
    struct Suffix {
        suffix: &'static str,
        reject: &'static str,
        calls: Arc<AtomicUsize>,
    }

    impl Suffix {
        fn new(suffix: &'static str, reject: &'static str) -> Self {
            Self {
                suffix,
                reject,
                calls: Arc::default(),
            }
        }
    }

    impl UnitInfo for Suffix {
        fn options(&self) -> &UnitOptions {
            const OPTIONS: UnitOptions = UnitOptions::required();
            &OPTIONS
        }

        fn rules(&self) -> RuleSet {
            let mut rules = RuleSet::new();
            rules.insert(
                "reject".into(),
                Rule::new(self.suffix, RuleHint::new("", "rejected")),
            );
            rules
        }
    }

    #[async_trait]
    impl Check for Suffix {
        type Input = String;
        type Output = String;

        async fn validate(&self, input: &String) -> ValidationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if input.contains(self.reject) {
                ValidationResult::fail(vec![
                    ValidationError::new("first", "first problem"),
                    ValidationError::new("second", "second problem"),
                ])
            } else {
                ValidationResult::pass()
            }
        }

        async fn sanitize(&self, input: String) -> Result<String, SanitizeError> {
            Ok(input + self.suffix)
        }
    }

    #[test]
    fn test_empty_pipeline_is_rejected() {
        assert!(matches!(
            Pipeline::new(Vec::new(), UnitOptions::default()),
            Err(BuildError::EmptyPipeline)
        ));
        assert!(matches!(
            Pipeline::new(Vec::new(), UnitOptions::optional()),
            Err(BuildError::EmptyPipeline)
        ));
    }

    #[tokio::test]
    async fn test_threads_value_through_steps() {
        let pipeline = Pipeline::new(
            vec![Suffix::new("-a", "!").shared(), Suffix::new("-b", "!").shared()],
            UnitOptions::default(),
        )
        .unwrap();

        let result = pipeline.run(Some(json!("x"))).await;
        assert_eq!(result.into_data(), Some(json!("x-a-b")));
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let last = Suffix::new("-c", "!");
        let calls = Arc::clone(&last.calls);
        let pipeline = Pipeline::new(
            vec![
                Suffix::new("-a", "!").shared(),
                Suffix::new("-b", "-a").shared(),
                last.shared(),
            ],
            UnitOptions::default(),
        )
        .unwrap();

        let result = pipeline.run(Some(json!("x"))).await;
        assert!(!result.is_success());
        assert!(result.data().is_none());
        assert_eq!(
            result.errors(),
            &[
                ValidationError::new("first", "first problem"),
                ValidationError::new("second", "second problem"),
            ]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_gate_runs_before_steps() {
        let step = Suffix::new("-a", "!");
        let calls = Arc::clone(&step.calls);
        let required = Pipeline::new(vec![step.shared()], UnitOptions::default()).unwrap();

        assert_eq!(required.run(None).await.errors(), &[ValidationError::required()]);
        assert_eq!(
            required.run(Some(Value::Null)).await.errors(),
            &[ValidationError::required()]
        );

        let optional = required.copy_with(|o| o.is_optional = true).unwrap();
        let result = optional.run(None).await;
        assert!(result.is_success());
        assert_eq!(result.into_data(), None);

        let result = optional.run(Some(Value::Null)).await;
        assert_eq!(result.into_data(), Some(Value::Null));

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rules_merge_first_wins() {
        let pipeline = Pipeline::new(
            vec![Suffix::new("-a", "!").shared(), Suffix::new("-b", "!").shared()],
            UnitOptions::default(),
        )
        .unwrap();

        let rules = pipeline.rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules["reject"].code, "-a");
    }

    #[test]
    fn test_steps_is_a_copy() {
        let pipeline =
            Pipeline::new(vec![Suffix::new("-a", "!").shared()], UnitOptions::default()).unwrap();
        let mut steps = pipeline.steps();
        steps.clear();
        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline.steps().len(), 1);
    }

    #[test]
    fn test_copy_with_keeps_original() {
        let pipeline =
            Pipeline::new(vec![Suffix::new("-a", "!").shared()], UnitOptions::default()).unwrap();
        let optional = pipeline.copy_with(|o| o.is_optional = true).unwrap();
        assert!(!pipeline.options().is_optional);
        assert!(optional.options().is_optional);
        assert_eq!(optional.len(), 1);
    }
}
