//! # nebula-sanitizer
//!
//! Composable validation and sanitization of untrusted input.
//!
//! A *unit* takes a possibly missing value, checks it and turns it into a
//! clean output, reporting structured errors instead of panicking. Units
//! compose linearly into [`Pipeline`](combinators::Pipeline)s and
//! recursively into [`ObjectShape`](combinators::ObjectShape)s and
//! [`ArrayShape`](combinators::ArrayShape)s.
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_sanitizer::prelude::*;
//! use serde_json::json;
//!
//! # futures::executor::block_on(async {
//! let signup = ObjectShape::new(
//!     schema! {
//!         "email" => pipeline![trim(), lowercase(), email()].unwrap(),
//!         "age" => pipeline![string_to_number(), integer(), range(13.0, 120.0).unwrap()].unwrap(),
//!     },
//!     ObjectShapeOptions::default(),
//! );
//!
//! let result = signup
//!     .run(Some(json!({"email": " Ada@Example.com ", "age": "36"})))
//!     .await;
//! assert_eq!(result.into_data(), Some(json!({"email": "ada@example.com", "age": 36})));
//!
//! let result = signup.run(Some(json!({"email": "nope", "age": "7"}))).await;
//! let fields: Vec<_> = result.errors().iter().filter_map(|e| e.field.as_deref()).collect();
//! assert_eq!(fields, ["email", "age"]);
//! # });
//! ```
//!
//! ## Writing Units
//!
//! Implement [`Check`](foundation::Check) for a leaf: normalize, validate and
//! sanitize hooks behind the required gate. Anything implementing
//! [`Unit`](foundation::Unit) over serde types can be placed in a composite.

#[macro_use]
mod macros;

pub mod checks;
pub mod combinators;
pub mod foundation;
pub mod prelude;
