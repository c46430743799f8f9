//! Built-in leaf validators
//!
//! # Categories
//!
//! - **Primitive kinds**: `string`, `number`, `boolean`, `symbol`, `bigint`, `null`, `undefined`
//! - **Universal**: `any` / `unknown`, `never`
//! - **Literals**: `is`, `enum_of`
//! - **Emptiness**: `is_empty_array`, `is_empty_object`
//! - **Optional primitives**: `maybe_string`, `maybe_number`, ... , `null_or_undefined`
//!
//! # Examples
//!
//! ```rust
//! use shapeguard::validators::{enum_of, number, string};
//! use shapeguard::value::Value;
//!
//! let id = string().or(number());
//! assert!(id.validate(&Value::from(7)));
//!
//! let level = enum_of(["debug", "info", "warn"]);
//! assert!(!level.validate(&Value::from("trace")));
//! ```

pub mod empty;
pub mod literal;
pub mod primitives;

pub use empty::{IsEmptyArray, IsEmptyObject, is_empty_array, is_empty_object};
pub use literal::{EnumOf, Is, enum_of, is};
pub use primitives::{
    IsAny, IsBigInt, IsBoolean, IsNever, IsNull, IsNumber, IsString, IsSymbol, IsUndefined, any,
    bigint, boolean, maybe_bigint, maybe_boolean, maybe_number, maybe_string, maybe_symbol, never,
    null, null_or_undefined, nullable_string, number, string, symbol, undefined, unknown,
};
