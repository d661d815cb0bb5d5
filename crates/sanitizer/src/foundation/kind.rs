//! Value kinds
//!
//! Introspection hint describing what a unit produces, for form builders
//! and generated documentation. Reported by [`UnitInfo::kind`](super::UnitInfo::kind).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of value a unit produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    #[default]
    Unknown,
}

impl UnitKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
