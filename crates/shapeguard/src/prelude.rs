//! Prelude module for convenient imports.
//!
//! Provides a single `use shapeguard::prelude::*;` import that brings in the
//! value model, core types, every built-in validator and every combinator.
//!
//! # Examples
//!
//! ```rust
//! use shapeguard::prelude::*;
//!
//! let id = maybe(string().or(number()));
//! assert!(id.validate(&Value::Undefined));
//! assert_eq!(id.describe(), "?(string | number)");
//! ```

// ============================================================================
// FOUNDATION: Core traits, handles, rejections
// ============================================================================

pub use crate::foundation::{
    AssertionError, ConfigError, DepthLimit, Discard, IntoValidator, ObjectOptions, PathKey,
    Predicate, RecursionOptions, Rejection, RejectionSink, Rejections, Strictness, Transformation,
    Validate, Validator,
};
pub use crate::value::{Object, Symbol, Value, ValueKind};

// ============================================================================
// VALIDATORS: All built-in leaves
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// COMBINATORS: Composition functions and typed handles
// ============================================================================

pub use crate::combinators::{
    ObjectValidator, PropertySpec, RecursiveValidator, TaggedUnionValidator, all_of, any_of,
    array_of, map_rejections, maybe, maybe_or_null, object_of, object_of_with, predicate,
    predicate_named, record_of, record_of_keyed, register, set_rejection, single_or_array,
    tagged_union_of, tuple_of, tuple_of_with, with_recursion, with_recursion_limit,
    with_recursion_options,
};

// ============================================================================
// ASSERTIONS
// ============================================================================

pub use crate::assertion::{Assertion, assert_by, assertion};
