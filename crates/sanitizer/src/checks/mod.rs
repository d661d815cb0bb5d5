//! Built-in leaf units
//!
//! Each leaf is a [`Check`](crate::foundation::Check) with a typed options
//! struct and a lowercase factory fn for the common case.
//!
//! # Categories
//!
//! - **Text**: [`Trim`], [`Lowercase`], [`Uppercase`], [`MinLength`],
//!   [`MaxLength`], [`Pattern`], [`Email`]
//! - **Numeric**: [`StringToNumber`], [`Integer`], [`Range`]
//! - **Boolean**: [`StringToBoolean`]
//! - **Choice**: [`OneOf`]
//!
//! Leaves that take text report `string` when handed another JSON type;
//! numeric leaves report `number`.

pub mod boolean;
pub mod choice;
pub mod number;
pub mod string;

pub use boolean::{StringToBoolean, StringToBooleanOptions, string_to_boolean};
pub use choice::{OneOf, OneOfOptions, one_of};
pub use number::{
    Integer, Range, RangeOptions, StringToNumber, integer, parse_number, range, string_to_number,
};
pub use string::{
    Email, EmailOptions, Lowercase, MaxLength, MaxLengthOptions, MinLength, MinLengthOptions,
    Pattern, PatternOptions, Trim, Uppercase, email, lowercase, max_length, min_length, pattern,
    trim, uppercase,
};
