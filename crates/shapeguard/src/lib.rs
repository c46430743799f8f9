//! # shapeguard
//!
//! Composable runtime type validation for dynamically-typed values.
//!
//! Validators are small, shareable nodes combined into trees that describe
//! a data shape. Checking a value yields a verdict and, on request, a list
//! of path-qualified [`Rejection`](foundation::Rejection)s explaining the
//! failure.
//!
//! ## Quick Start
//!
//! ```rust
//! use shapeguard::prelude::*;
//! use serde_json::json;
//!
//! let user = object_of([
//!     ("name", string()),
//!     ("role", enum_of(["admin", "member"])),
//!     ("tags", array_of(string())),
//! ]);
//!
//! assert!(user.validate(&json!({ "name": "ada", "role": "admin", "tags": [] }).into()));
//!
//! let rejections = user
//!     .collect(&json!({ "name": "ada", "role": "root", "tags": [] }).into())
//!     .unwrap_err();
//! assert_eq!(rejections.first().unwrap().dotted_path(), "role");
//! assert_eq!(user.describe(), "{ name: string, role: 'admin' | 'member', tags: ArrayOf(string), [*]: * }");
//! ```
//!
//! ## Building Blocks
//!
//! - **Leaves** ([`validators`]): primitive kinds, literals, enums, emptiness
//! - **Combinators** ([`combinators`]): unions, intersections, optionals,
//!   arrays, records, object and tuple shapes, tagged unions, recursion
//! - **Transformations** ([`foundation::Transformation`]): bulk rewrites of
//!   strictness and recursion depth limits across a whole tree
//! - **Assertions** ([`assertion`]): failures turned into error values
//!
//! ## Creating Validators
//!
//! Use the [`leaf_validator!`] macro for stateless leaves, lift closures with
//! [`combinators::predicate`] or [`combinators::register`], or implement
//! [`Validate`](foundation::Validate) for anything else.

pub mod assertion;
pub mod combinators;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod render;
pub mod validators;
pub mod value;
