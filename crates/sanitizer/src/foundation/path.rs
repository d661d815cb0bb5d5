//! Field paths for errors reported by composites
//!
//! Composites rewrite the `field` of every child error before passing it up:
//!
//! | segment | child field | result |
//! |---|---|---|
//! | key `address` | none | `address` |
//! | key `address` | `city.population` | `address.city.population` |
//! | index `2` | none | `[2]` |
//! | index `2` | `age` | `[2].age` |

use std::fmt;

use super::ValidationError;

/// One step from a composite into one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// A field of an object shape.
    Key(&'a str),
    /// An element of an array shape.
    Index(usize),
}

impl PathSegment<'_> {
    /// Joins this segment in front of a child path.
    pub fn join(self, child: Option<&str>) -> String {
        match child {
            Some(child) => format!("{self}.{child}"),
            None => self.to_string(),
        }
    }

    /// Rewrites the field of `error` to sit under this segment.
    pub fn prefix(self, mut error: ValidationError) -> ValidationError {
        error.field = Some(self.join(error.field.as_deref()));
        error
    }
}

impl fmt::Display for PathSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PathSegment::Key("address"), None, "address")]
    #[case(PathSegment::Key("address"), Some("city.population"), "address.city.population")]
    #[case(PathSegment::Index(2), None, "[2]")]
    #[case(PathSegment::Index(2), Some("age"), "[2].age")]
    #[case(PathSegment::Key("tags"), Some("[0]"), "tags.[0]")]
    fn test_join(#[case] segment: PathSegment<'_>, #[case] child: Option<&str>, #[case] expected: &str) {
        assert_eq!(segment.join(child), expected);
    }

    #[test]
    fn test_prefix_keeps_code_and_message() {
        let error = ValidationError::new("integer", "Number must be an integer").with_field("age");
        let prefixed = PathSegment::Index(1).prefix(error);
        assert_eq!(prefixed.field.as_deref(), Some("[1].age"));
        assert_eq!(prefixed.code, "integer");
    }
}
