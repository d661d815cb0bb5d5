//! Construction macros
//!
//! - [`schema!`] builds an object shape [`Schema`](crate::combinators::Schema)
//! - [`pipeline!`] builds a [`Pipeline`](crate::combinators::Pipeline)
//!
//! Both accept any typed unit, or an already shared one, and erase it to a
//! [`SharedUnit`](crate::foundation::SharedUnit).

// ============================================================================
// SCHEMA MACRO
// ============================================================================

/// Builds a [`Schema`](crate::combinators::Schema) from `key => unit` pairs,
/// keeping declaration order.
///
/// ```rust
/// use nebula_sanitizer::prelude::*;
///
/// let schema = schema! {
///     "email" => pipeline![trim(), email()].unwrap(),
///     "age" => integer(),
/// };
/// assert_eq!(schema.keys().collect::<Vec<_>>(), ["email", "age"]);
/// ```
#[macro_export]
macro_rules! schema {
    () => {
        $crate::combinators::Schema::new()
    };
    ($($key:expr => $unit:expr),+ $(,)?) => {{
        let mut schema = $crate::combinators::Schema::new();
        $(
            schema.insert(
                ::std::string::String::from($key),
                $crate::foundation::IntoShared::shared($unit),
            );
        )+
        schema
    }};
}

// ============================================================================
// PIPELINE MACRO
// ============================================================================

/// Builds a required [`Pipeline`](crate::combinators::Pipeline) from a list
/// of units. Evaluates to `Result<Pipeline, BuildError>`.
///
/// Pass options after a `;` to build an optional one:
///
/// ```rust
/// use nebula_sanitizer::prelude::*;
///
/// let required = pipeline![trim(), lowercase()].unwrap();
/// let optional = pipeline![trim(); UnitOptions::optional()].unwrap();
///
/// assert!(!required.options().is_optional);
/// assert!(optional.options().is_optional);
/// ```
#[macro_export]
macro_rules! pipeline {
    ($($unit:expr),* $(,)?) => {
        $crate::pipeline![$($unit),* ; $crate::foundation::UnitOptions::required()]
    };
    ($($unit:expr),* ; $options:expr) => {
        $crate::combinators::Pipeline::new(
            ::std::vec![$($crate::foundation::IntoShared::shared($unit)),*],
            $options,
        )
    };
}

// ============================================================================
// TRANSFORM MACRO
// ============================================================================

// Declares a leaf that never fails validation and only rewrites its input:
// struct, `Check`, `Reconfigure` and a factory fn.
macro_rules! transform {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty => $output:ty;
        type_rule($type_rule:expr);
        kind($kind:ident);
        sanitize($inp:ident) => $body:expr;
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        $vis struct $name {
            options: $crate::foundation::UnitOptions,
        }

        impl $name {
            #[must_use]
            pub const fn new(options: $crate::foundation::UnitOptions) -> Self {
                Self { options }
            }

            /// A copy that lets null/absent input through.
            #[must_use]
            pub const fn optional() -> Self {
                Self::new($crate::foundation::UnitOptions::optional())
            }
        }

        impl $crate::foundation::UnitInfo for $name {
            fn options(&self) -> &$crate::foundation::UnitOptions {
                &self.options
            }

            fn type_rule(&self) -> $crate::foundation::Rule {
                $type_rule
            }

            fn kind(&self) -> $crate::foundation::UnitKind {
                $crate::foundation::UnitKind::$kind
            }
        }

        #[async_trait::async_trait]
        impl $crate::foundation::Check for $name {
            type Input = $input;
            type Output = $output;

            async fn validate(&self, _input: &$input) -> $crate::foundation::ValidationResult {
                $crate::foundation::ValidationResult::pass()
            }

            async fn sanitize(
                &self,
                $inp: $input,
            ) -> Result<$output, $crate::foundation::SanitizeError> {
                Ok($body)
            }
        }

        impl $crate::foundation::Reconfigure for $name {
            type Options = $crate::foundation::UnitOptions;

            fn config(&self) -> &$crate::foundation::UnitOptions {
                &self.options
            }

            fn with_config(
                &self,
                options: $crate::foundation::UnitOptions,
            ) -> Result<Self, $crate::foundation::BuildError> {
                Ok(Self::new(options))
            }
        }

        #[must_use]
        $vis const fn $factory() -> $name {
            $name::new($crate::foundation::UnitOptions::required())
        }
    };
}
