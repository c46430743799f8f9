//! Core validation types and traits
//!
//! - **Traits**: [`Validate`], [`IntoValidator`]
//! - **Handles**: [`Validator`], [`Predicate`]
//! - **Rejections**: [`Rejection`], [`RejectionSink`], [`Rejections`]
//! - **Transformations**: [`Transformation`], [`Strictness`], [`DepthLimit`]
//! - **Errors**: [`ConfigError`], [`AssertionError`]
//!
//! # Architecture
//!
//! Validators are trees of shared, immutable nodes. A node never changes after
//! construction: transformations build a new tree and reuse every subtree
//! they leave untouched.
//!
//! Rejections flow outwards through a sink chain. Containers wrap the caller's
//! sink to append their key, so a rejection arriving at the caller carries the
//! full path of the failing property.
//!
//! ```rust
//! use shapeguard::prelude::*;
//! use serde_json::json;
//!
//! let user = object_of([("name", string()), ("age", number())]);
//! let rejections = user.collect(&json!({ "name": "ada", "age": "x" }).into()).unwrap_err();
//! assert_eq!(rejections.first().unwrap().dotted_path(), "age");
//! ```

pub mod error;
pub mod rejection;
pub mod traits;
pub mod transform;

pub use error::{AssertionError, ConfigError};
pub use rejection::{Discard, Path, PathKey, Rejection, RejectionSink, Rejections};
pub use traits::{IntoValidator, Predicate, Validate, Validator};
pub use transform::{
    DepthLimit, ObjectOptions, RecursionOptions, StrictState, Strictness, Transformation,
};

pub(crate) use rejection::{MapSink, PathSink, TrackingSink};
pub(crate) use traits::{Node, transform_children};
