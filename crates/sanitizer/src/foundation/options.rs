//! Unit configuration
//!
//! Every unit carries a typed options struct. The only option all units
//! share is [`UnitOptions::is_optional`]; concrete units embed
//! [`UnitOptions`] as a flattened `base` field next to their own settings,
//! so an options struct deserializes from a flat JSON object:
//!
//! ```rust
//! use nebula_sanitizer::checks::MinLengthOptions;
//!
//! let options: MinLengthOptions =
//!     serde_json::from_str(r#"{"is_optional": true, "min_length": 3}"#).unwrap();
//! assert!(options.base.is_optional);
//! assert_eq!(options.min_length, 3);
//! ```

use serde::{Deserialize, Serialize};

use super::BuildError;

/// Options recognized by every unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitOptions {
    /// Let null/absent input through instead of reporting `required`.
    pub is_optional: bool,
}

impl UnitOptions {
    /// Options for a unit that requires a value.
    #[must_use]
    pub const fn required() -> Self {
        Self { is_optional: false }
    }

    /// Options for a unit that lets null/absent input through.
    #[must_use]
    pub const fn optional() -> Self {
        Self { is_optional: true }
    }
}

/// Units whose options can be copied with overrides.
///
/// The copy is an independent instance: the original keeps its options.
///
/// # Examples
///
/// ```rust
/// use nebula_sanitizer::checks::Trim;
/// use nebula_sanitizer::foundation::{Reconfigure, UnitInfo};
///
/// let trim = Trim::default();
/// let optional = trim.copy_with(|o| o.is_optional = true).unwrap();
///
/// assert!(!trim.options().is_optional);
/// assert!(optional.options().is_optional);
/// ```
pub trait Reconfigure: Sized {
    /// The typed options struct of this unit.
    type Options: Clone;

    /// Returns the full options this instance was built with.
    fn config(&self) -> &Self::Options;

    /// Builds an equivalent instance from `options`.
    fn with_config(&self, options: Self::Options) -> Result<Self, BuildError>;

    /// Clones the options, applies `overrides` and rebuilds.
    fn copy_with(&self, overrides: impl FnOnce(&mut Self::Options)) -> Result<Self, BuildError> {
        let mut options = self.config().clone();
        overrides(&mut options);
        self.with_config(options)
    }
}
