//! Prelude module for convenient imports.
//!
//! `use nebula_sanitizer::prelude::*;` brings in the unit traits, result
//! and error types, every built-in check, the composites and the
//! construction macros.

// ============================================================================
// FOUNDATION: Core traits, results, errors
// ============================================================================

pub use crate::foundation::{
    BuildError, Check, DynUnit, IntoShared, Reconfigure, Rule, RuleHint, RuleSet, SanitizeError,
    SanitizeResult, SharedUnit, Unit, UnitInfo, UnitKind, UnitOptions, ValidationError,
    ValidationResult,
};

// ============================================================================
// CHECKS: Built-in leaves
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::checks::*;

// ============================================================================
// COMBINATORS: Composites and macros
// ============================================================================

pub use crate::combinators::{ArrayShape, ObjectShape, ObjectShapeOptions, Pipeline, Schema};
pub use crate::{pipeline, schema};
