//! Validators built from other validators
//!
//! # Categories
//!
//! - **Logical**: [`all_of`], [`any_of`], [`maybe`], [`maybe_or_null`], [`single_or_array`]
//! - **Collections**: [`array_of`], [`record_of`], [`record_of_keyed`]
//! - **Shapes**: [`object_of`], [`object_of_with`], [`tuple_of`], [`tuple_of_with`]
//! - **Dispatch**: [`tagged_union_of`]
//! - **Recursion**: [`with_recursion`], [`with_recursion_limit`], [`with_recursion_options`]
//! - **Custom**: [`predicate`], [`predicate_named`], [`register`], [`set_rejection`], [`map_rejections`]
//!
//! Every combinator accepts anything implementing
//! [`IntoValidator`](crate::foundation::IntoValidator): validators, typed
//! handles such as [`ObjectValidator`], and bare `Fn(&Value) -> bool`
//! closures.
//!
//! # Examples
//!
//! ```rust
//! use shapeguard::combinators::{array_of, maybe, object_of};
//! use shapeguard::validators::{number, string};
//! use serde_json::json;
//!
//! let post = object_of([
//!     ("title", string()),
//!     ("tags", array_of(string())),
//!     ("score", maybe(number())),
//! ]);
//!
//! let rejections = post
//!     .collect(&json!({ "title": "x", "tags": ["a", 2] }).into())
//!     .unwrap_err();
//! assert_eq!(rejections.first().unwrap().dotted_path(), "tags.1");
//! ```

pub mod collection;
pub mod custom;
pub mod logical;
pub mod object;
pub mod recursion;
pub mod tagged_union;

pub use collection::{ArrayOf, RecordOf, array_of, record_of, record_of_keyed};
pub use custom::{
    CUSTOM_TYPE, MapRejections, PredicateValidator, Registered, WithRejection, map_rejections,
    predicate, predicate_named, register, set_rejection,
};
pub use logical::{AllOf, AnyOf, Maybe, all_of, any_of, maybe, maybe_or_null, single_or_array};
pub use object::{
    ObjectOf, ObjectValidator, PropertySpec, object_of, object_of_with, tuple_of, tuple_of_with,
};
pub use recursion::{
    Recursive, RecursiveRef, RecursiveValidator, current_depth, with_recursion,
    with_recursion_limit, with_recursion_options,
};
pub use tagged_union::{TaggedUnionOf, TaggedUnionValidator, tagged_union_of};
