//! Composite units
//!
//! - [`Pipeline`]: sequential, short-circuits on the first failure
//! - [`ObjectShape`]: one child per declared key, errors under `key`
//! - [`ArrayShape`]: one child over every element, errors under `[i]`
//!
//! All three work on [`serde_json::Value`] and hold their children as
//! [`SharedUnit`](crate::foundation::SharedUnit)s, so they nest freely.

pub mod array;
pub mod object;
pub mod pipeline;

pub use array::ArrayShape;
pub use object::{ObjectShape, ObjectShapeOptions, Schema};
pub use pipeline::Pipeline;
