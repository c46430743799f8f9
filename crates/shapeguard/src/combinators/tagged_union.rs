//! Tagged (discriminated) unions
//!
//! A [`TaggedUnionOf`] reads one discriminant property and dispatches to the
//! branch registered for its value, so only one branch is ever evaluated.
//!
//! ```rust
//! use shapeguard::combinators::{object_of, tagged_union_of};
//! use shapeguard::validators::{is, number, string};
//! use serde_json::json;
//!
//! let shape = tagged_union_of(
//!     "kind",
//!     [
//!         ("circle", object_of([("kind", is("circle")), ("radius", number())])),
//!         ("label", object_of([("kind", is("label")), ("text", string())])),
//!     ],
//! );
//! assert!(shape.validate(&json!({ "kind": "circle", "radius": 2 }).into()));
//! assert!(!shape.validate(&json!({ "kind": "label", "radius": 2 }).into()));
//! ```

use std::ops::Deref;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::foundation::{
    IntoValidator, MapSink, Rejection, RejectionSink, Transformation, Validate, Validator,
    transform_children,
};
use crate::render::{inspect, join_types};
use crate::value::{LiteralKey, Value};

/// Dispatches on the value of a discriminant property.
#[derive(Debug, Clone)]
pub struct TaggedUnionOf {
    tag_key: String,
    branches: IndexMap<LiteralKey, (Value, Validator)>,
}

impl TaggedUnionOf {
    /// Creates a union. A later branch for an already registered tag
    /// replaces the earlier one.
    pub fn new<I>(tag_key: impl Into<String>, branches: I) -> Self
    where
        I: IntoIterator<Item = (Value, Validator)>,
    {
        let branches = branches
            .into_iter()
            .map(|(tag, validator)| (LiteralKey::of(&tag), (tag, validator)))
            .collect();
        Self {
            tag_key: tag_key.into(),
            branches,
        }
    }

    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    /// Branch validator registered for `tag`.
    pub fn branch(&self, tag: &Value) -> Option<&Validator> {
        self.branches.get(&LiteralKey::of(tag)).map(|(_, validator)| validator)
    }

    fn reject(&self, reason: String, sink: &mut dyn RejectionSink) {
        sink.reject(Rejection::new(reason, self.describe()));
    }
}

impl Validate for TaggedUnionOf {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        if !value.is_object() {
            if sink.is_collecting() {
                self.reject(format!("Value {} is not an object", inspect(value)), sink);
            }
            return false;
        }

        let tag = value.get(&self.tag_key);
        let Some(branch) = self.branch(tag) else {
            if sink.is_collecting() {
                self.reject(
                    format!("Value {} has an invalid tag {}", inspect(value), inspect(tag)),
                    sink,
                );
            }
            return false;
        };

        let tag_text = inspect(tag);
        let mut rewrap = MapSink::new(sink, |mut rejection: Rejection| {
            rejection.reason = format!(
                "Validation for tag {tag_text} failed:\n{}",
                rejection.reason
            );
            rejection
        });
        branch.validate_with(value, &mut rewrap)
    }

    fn describe(&self) -> String {
        join_types(
            self.branches
                .values()
                .map(|(_, validator)| validator.describe().to_owned())
                .collect(),
            " | ",
        )
    }

    fn transform(&self, transformation: &Transformation) -> Option<Validator> {
        let validators: Vec<Validator> = self.branches.values().map(|(_, v)| v.clone()).collect();
        let transformed = transform_children(&validators, transformation)?;
        let branches = self
            .branches
            .values()
            .map(|(tag, _)| tag.clone())
            .zip(transformed);
        Some(Validator::new(Self::new(self.tag_key.clone(), branches)))
    }
}

// ============================================================================
// TAGGED UNION HANDLE
// ============================================================================

/// Handle to a [`TaggedUnionOf`] node. Dereferences to [`Validator`].
#[derive(Clone)]
pub struct TaggedUnionValidator {
    node: Arc<TaggedUnionOf>,
    validator: Validator,
}

impl TaggedUnionValidator {
    fn from_node(node: TaggedUnionOf) -> Self {
        let node = Arc::new(node);
        let validator = Validator::from_arc(node.clone());
        Self { node, validator }
    }

    pub fn tag_key(&self) -> &str {
        self.node.tag_key()
    }

    /// Registered `(tag, validator)` pairs, in registration order.
    ///
    /// Feeding the specs of several unions into [`tagged_union_of`] builds
    /// their combination.
    pub fn union_spec(&self) -> Vec<(Value, Validator)> {
        self.node.branches.values().cloned().collect()
    }

    pub fn as_validator(&self) -> &Validator {
        &self.validator
    }
}

impl Deref for TaggedUnionValidator {
    type Target = Validator;

    fn deref(&self) -> &Validator {
        &self.validator
    }
}

impl std::fmt::Debug for TaggedUnionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggedUnionValidator")
            .field("tag_key", &self.node.tag_key)
            .field("type", &self.validator.describe())
            .finish()
    }
}

impl IntoValidator for TaggedUnionValidator {
    fn into_validator(self) -> Validator {
        self.validator
    }
}

impl IntoValidator for &TaggedUnionValidator {
    fn into_validator(self) -> Validator {
        self.validator.clone()
    }
}

impl From<TaggedUnionValidator> for Validator {
    fn from(union: TaggedUnionValidator) -> Self {
        union.validator
    }
}

/// Creates a tagged union dispatching on the property `tag_key`.
#[must_use]
pub fn tagged_union_of<I, T, V>(tag_key: impl Into<String>, branches: I) -> TaggedUnionValidator
where
    I: IntoIterator<Item = (T, V)>,
    T: Into<Value>,
    V: IntoValidator,
{
    TaggedUnionValidator::from_node(TaggedUnionOf::new(
        tag_key,
        branches
            .into_iter()
            .map(|(tag, validator)| (tag.into(), validator.into_validator())),
    ))
}
