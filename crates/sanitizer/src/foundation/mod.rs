//! Core unit types and traits
//!
//! This module contains the building blocks every unit is made of:
//!
//! - **Traits**: [`Unit`], [`Check`], [`DynUnit`], [`Reconfigure`]
//! - **Results**: [`ValidationResult`], [`SanitizeResult`]
//! - **Errors**: [`ValidationError`], [`SanitizeError`], [`BuildError`]
//! - **Metadata**: [`Rule`], [`RuleSet`], [`UnitOptions`], [`UnitKind`]
//!
//! # Lifecycle
//!
//! Running a unit goes through four stages, in order:
//!
//! 1. **Required gate**: a null/absent input either passes through
//!    (optional units) or fails with `required`. Nothing else runs.
//! 2. **Normalize**: canonicalize the input (identity by default).
//! 3. **Validate**: decide pass/fail; failures return immediately.
//! 4. **Sanitize**: transform into the output; a failing transform is
//!    reported as `SANITIZE_ERROR`.
//!
//! ```rust
//! use nebula_sanitizer::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let email = pipeline![trim(), lowercase(), email()].unwrap();
//! let result = email.run(Some("  User@Example.COM  ".into())).await;
//! assert_eq!(result.into_data(), Some("user@example.com".into()));
//! # });
//! ```
//!
//! # Composition
//!
//! Composites hold their children as [`SharedUnit`]s: typed units erased to
//! [`serde_json::Value`] at the boundary. The conversion decodes the input
//! into the child's own type and reports the child's
//! [`UnitInfo::type_rule`] when the JSON has the wrong shape.

pub mod error;
pub mod kind;
pub mod options;
pub mod path;
pub mod result;
pub mod rule;
pub mod traits;

pub use error::{BuildError, SanitizeError, ValidationError};
pub use kind::UnitKind;
pub use options::{Reconfigure, UnitOptions};
pub use path::PathSegment;
pub use result::{SanitizeResult, ValidationResult};
pub use rule::{Rule, RuleHint, RuleSet, merge_first_wins};
pub use traits::{
    Check, DynUnit, Erased, IntoShared, SharedUnit, Unit, UnitInfo, check_required,
    json_type_name, require_value,
};
