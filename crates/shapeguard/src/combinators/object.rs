//! Object and tuple shape validators
//!
//! An [`ObjectOf`] checks a fixed set of properties: named properties of an
//! object (keyed mode) or positions of an array (tuple mode).
//!
//! # Strictness
//!
//! A strict keyed validator rejects every key it does not specify; a strict
//! tuple validator rejects arrays whose length differs from the tuple's.
//! Non-strict validators ignore extra keys and elements.
//!
//! Strictness can be rewritten for a whole tree with
//! [`Validator::strict`]/[`Validator::unstrict`]. A [locked](ObjectValidator::lock)
//! validator ignores such bulk rewrites until it is unlocked again.
//!
//! ```rust
//! use shapeguard::combinators::object_of;
//! use shapeguard::validators::number;
//! use serde_json::json;
//!
//! let point = object_of([("x", number()), ("y", number())]);
//! let extra = json!({ "x": 1, "y": 2, "z": 3 }).into();
//! assert!(point.validate(&extra));
//! assert!(!point.strict().validate(&extra));
//! ```

use std::ops::Deref;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::foundation::{
    IntoValidator, ObjectOptions, PathKey, PathSink, Rejection, RejectionSink, StrictState,
    Strictness, Transformation, Validate, Validator, transform_children,
};
use crate::render::{elide, inspect, number, property_key};
use crate::value::{Object, Value};

/// Property validators of an [`ObjectOf`].
#[derive(Debug, Clone)]
pub enum PropertySpec {
    /// Named properties of an object.
    Keyed(IndexMap<String, Validator>),
    /// Positions of an array.
    Tuple(Vec<Validator>),
}

impl PropertySpec {
    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(properties) => properties.len(),
            Self::Tuple(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validator of a named property (keyed) or a position (tuple).
    pub fn get(&self, key: &PathKey) -> Option<&Validator> {
        match (self, key) {
            (Self::Keyed(properties), PathKey::Key(key)) => properties.get(key),
            (Self::Keyed(properties), PathKey::Index(index)) => {
                properties.get(index.to_string().as_str())
            }
            (Self::Tuple(items), PathKey::Index(index)) => items.get(*index),
            (Self::Tuple(_), PathKey::Key(_)) => None,
        }
    }

    fn validators(&self) -> Vec<Validator> {
        match self {
            Self::Keyed(properties) => properties.values().cloned().collect(),
            Self::Tuple(items) => items.clone(),
        }
    }

    fn with_validators(&self, validators: Vec<Validator>) -> Self {
        match self {
            Self::Keyed(properties) => Self::Keyed(properties.keys().cloned().zip(validators).collect()),
            Self::Tuple(_) => Self::Tuple(validators),
        }
    }
}

// ============================================================================
// OBJECT OF
// ============================================================================

/// Shape validator over a [`PropertySpec`].
#[derive(Debug, Clone)]
pub struct ObjectOf {
    spec: PropertySpec,
    state: StrictState,
}

impl ObjectOf {
    pub fn new(spec: PropertySpec, strictness: Strictness) -> Self {
        Self {
            spec,
            state: strictness.into(),
        }
    }

    pub fn spec(&self) -> &PropertySpec {
        &self.spec
    }

    pub fn state(&self) -> StrictState {
        self.state
    }

    /// Applies `transformation` to every property validator and, for
    /// strictness rewrites, to this validator.
    ///
    /// `None` when nothing changed.
    fn rebuild(&self, transformation: &Transformation) -> Option<Self> {
        let spec = transform_children(&self.spec.validators(), transformation)
            .map(|validators| self.spec.with_validators(validators));

        let state = match transformation {
            Transformation::Strictness(request) => {
                let next = request.apply(self.state);
                if self.state.locked && next == self.state {
                    tracing::debug!(
                        strictness = %request,
                        strict = self.state.strict,
                        "locked object validator ignores strictness rewrite"
                    );
                }
                next
            }
            Transformation::DepthLimit(_) => self.state,
        };

        if spec.is_none() && state == self.state {
            return None;
        }
        Some(Self {
            spec: spec.unwrap_or_else(|| self.spec.clone()),
            state,
        })
    }

    fn check_keyed(
        &self,
        properties: &IndexMap<String, Validator>,
        value: &Value,
        sink: &mut dyn RejectionSink,
    ) -> bool {
        let Some(entries) = value.as_object() else {
            self.reject_kind(value, "object", sink);
            return false;
        };

        let collecting = sink.is_collecting();
        let mut valid = true;
        for (key, validator) in properties {
            if !validator.validate_with(value.get(key), &mut PathSink::new(sink, PathKey::from_key(key))) {
                if !collecting {
                    return false;
                }
                valid = false;
            }
        }

        if !valid || !self.state.strict {
            return valid;
        }
        self.check_redundant_keys(properties, entries, sink)
    }

    fn check_redundant_keys(
        &self,
        properties: &IndexMap<String, Validator>,
        entries: &Object,
        sink: &mut dyn RejectionSink,
    ) -> bool {
        let mut redundant = entries
            .keys()
            .filter(|key| !properties.contains_key(key.as_str()));

        if !sink.is_collecting() {
            return redundant.next().is_none();
        }

        let mut valid = true;
        for key in redundant {
            valid = false;
            sink.reject(
                Rejection::new(
                    format!(
                        "Object has redundant key {}, and failed strict validation",
                        inspect(&Value::from(key.as_str()))
                    ),
                    self.describe(),
                )
                .at(PathKey::from_key(key)),
            );
        }
        valid
    }

    fn check_tuple(&self, items: &[Validator], value: &Value, sink: &mut dyn RejectionSink) -> bool {
        let Some(elements) = value.as_array() else {
            self.reject_kind(value, "array", sink);
            return false;
        };

        let collecting = sink.is_collecting();
        let undefined = Value::Undefined;
        let mut valid = true;
        for (index, validator) in items.iter().enumerate() {
            let element = elements.get(index).unwrap_or(&undefined);
            if !validator.validate_with(element, &mut PathSink::new(sink, index)) {
                if !collecting {
                    return false;
                }
                valid = false;
            }
        }

        if self.state.strict && elements.len() != items.len() {
            if collecting {
                let expected = number(items.len() as f64);
                sink.reject(
                    Rejection::new(
                        format!(
                            "Value {} is not equal to <{expected}>",
                            inspect(&Value::from(elements.len() as f64))
                        ),
                        expected,
                    )
                    .at("length"),
                );
            }
            valid = false;
        }
        valid
    }

    fn reject_kind(&self, value: &Value, kind: &str, sink: &mut dyn RejectionSink) {
        if sink.is_collecting() {
            sink.reject(Rejection::new(
                format!("Value {} is not an {kind}", inspect(value)),
                self.describe(),
            ));
        }
    }
}

impl Validate for ObjectOf {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        match &self.spec {
            PropertySpec::Keyed(properties) => self.check_keyed(properties, value, sink),
            PropertySpec::Tuple(items) => self.check_tuple(items, value, sink),
        }
    }

    fn describe(&self) -> String {
        match &self.spec {
            PropertySpec::Keyed(properties) => {
                let mut entries = elide(
                    properties
                        .iter()
                        .map(|(key, validator)| {
                            format!("{}: {}", property_key(key), validator.describe())
                        })
                        .collect(),
                );
                if !self.state.strict {
                    entries.push("[*]: *".to_owned());
                }
                if entries.is_empty() {
                    "{}".to_owned()
                } else {
                    format!("{{ {} }}", entries.join(", "))
                }
            }
            PropertySpec::Tuple(items) => {
                let mut entries = elide(items.iter().map(|v| v.describe().to_owned()).collect());
                if !self.state.strict {
                    entries.push("...*[]".to_owned());
                }
                if entries.is_empty() {
                    "[]".to_owned()
                } else {
                    format!("[ {} ]", entries.join(", "))
                }
            }
        }
    }

    fn transform(&self, transformation: &Transformation) -> Option<Validator> {
        self.rebuild(transformation).map(Validator::new)
    }
}

// ============================================================================
// OBJECT VALIDATOR HANDLE
// ============================================================================

/// Handle to an [`ObjectOf`] node with strictness and lock controls.
///
/// Dereferences to [`Validator`].
#[derive(Clone)]
pub struct ObjectValidator {
    node: Arc<ObjectOf>,
    validator: Validator,
}

impl ObjectValidator {
    fn from_node(node: ObjectOf) -> Self {
        let node = Arc::new(node);
        let validator = Validator::from_arc(node.clone());
        Self { node, validator }
    }

    pub fn is_strict(&self) -> bool {
        self.node.state.strict
    }

    pub fn is_locked(&self) -> bool {
        self.node.state.locked
    }

    /// Copy of the property validators.
    pub fn property_spec(&self) -> PropertySpec {
        self.node.spec.clone()
    }

    pub fn as_validator(&self) -> &Validator {
        &self.validator
    }

    /// Rebuilds this validator and its properties under `transformation`.
    #[must_use = "transformations build a new validator"]
    pub fn transform_object(&self, transformation: &Transformation) -> Self {
        self.node
            .rebuild(transformation)
            .map_or_else(|| self.clone(), Self::from_node)
    }

    /// Makes this validator and every unlocked nested object validator strict.
    #[must_use = "transformations build a new validator"]
    pub fn strict(&self) -> Self {
        self.transform_object(&Transformation::Strictness(Strictness::Strict))
    }

    /// Makes this validator and every unlocked nested object validator
    /// non-strict.
    #[must_use = "transformations build a new validator"]
    pub fn unstrict(&self) -> Self {
        self.transform_object(&Transformation::Strictness(Strictness::Unstrict))
    }

    /// Shields the current strictness from bulk rewrites. Nested validators
    /// are untouched.
    #[must_use = "builder methods must be chained or built"]
    pub fn lock(&self) -> Self {
        self.with_state(self.node.state.locked())
    }

    /// Lets bulk rewrites change the strictness again.
    #[must_use = "builder methods must be chained or built"]
    pub fn unlock(&self) -> Self {
        self.with_state(self.node.state.unlocked())
    }

    fn with_state(&self, state: StrictState) -> Self {
        if state == self.node.state {
            return self.clone();
        }
        Self::from_node(ObjectOf {
            spec: self.node.spec.clone(),
            state,
        })
    }
}

impl Deref for ObjectValidator {
    type Target = Validator;

    fn deref(&self) -> &Validator {
        &self.validator
    }
}

impl std::fmt::Debug for ObjectValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectValidator")
            .field("type", &self.validator.describe())
            .field("state", &self.node.state)
            .finish()
    }
}

impl IntoValidator for ObjectValidator {
    fn into_validator(self) -> Validator {
        self.validator
    }
}

impl IntoValidator for &ObjectValidator {
    fn into_validator(self) -> Validator {
        self.validator.clone()
    }
}

impl From<ObjectValidator> for Validator {
    fn from(object: ObjectValidator) -> Self {
        object.validator
    }
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

fn keyed<I, K, V>(properties: I) -> PropertySpec
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: IntoValidator,
{
    PropertySpec::Keyed(
        properties
            .into_iter()
            .map(|(key, validator)| (key.into(), validator.into_validator()))
            .collect(),
    )
}

fn positional<I>(items: I) -> PropertySpec
where
    I: IntoIterator,
    I::Item: IntoValidator,
{
    PropertySpec::Tuple(items.into_iter().map(IntoValidator::into_validator).collect())
}

/// Creates a non-strict object shape validator.
#[must_use]
pub fn object_of<I, K, V>(properties: I) -> ObjectValidator
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: IntoValidator,
{
    object_of_with(properties, ObjectOptions::default())
}

/// Creates an object shape validator with explicit options.
///
/// `options` may be an [`ObjectOptions`], a [`Strictness`] or a `bool`.
#[must_use]
pub fn object_of_with<I, K, V>(properties: I, options: impl Into<ObjectOptions>) -> ObjectValidator
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: IntoValidator,
{
    ObjectValidator::from_node(ObjectOf::new(keyed(properties), options.into().strict))
}

/// Creates a strict tuple validator.
#[must_use]
pub fn tuple_of<I>(items: I) -> ObjectValidator
where
    I: IntoIterator,
    I::Item: IntoValidator,
{
    tuple_of_with(items, Strictness::Strict)
}

/// Creates a tuple validator with explicit options.
#[must_use]
pub fn tuple_of_with<I>(items: I, options: impl Into<ObjectOptions>) -> ObjectValidator
where
    I: IntoIterator,
    I::Item: IntoValidator,
{
    ObjectValidator::from_node(ObjectOf::new(positional(items), options.into().strict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::maybe;
    use crate::validators::{boolean, number, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn value(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn strict_rejects_redundant_keys() {
        let strict = object_of_with([("n", number())], true);
        let loose = object_of_with([("n", number())], false);
        let input = value(json!({ "n": 1, "extra": true }));
        assert!(!strict.validate(&input));
        assert!(loose.validate(&input));

        let rejections = strict.collect(&input).unwrap_err();
        assert_eq!(rejections.len(), 1);
        let rejection = rejections.first().unwrap();
        assert_eq!(rejection.path.as_slice(), [PathKey::from("extra")]);
        assert_eq!(
            rejection.reason,
            "Object has redundant key <'extra'>, and failed strict validation"
        );
    }

    #[test]
    fn every_redundant_key_is_reported() {
        let strict = object_of_with([("n", number())], true);
        let rejections = strict
            .collect(&value(json!({ "n": 1, "a": 1, "2": 2 })))
            .unwrap_err();
        let paths: Vec<PathKey> = rejections.iter().map(|r| r.path[0].clone()).collect();
        assert_eq!(paths, [PathKey::from("a"), PathKey::Index(2)]);
    }

    #[test]
    fn redundant_keys_are_only_checked_after_properties_pass() {
        let strict = object_of_with([("n", number())], true);
        let rejections = strict
            .collect(&value(json!({ "n": "x", "extra": 1 })))
            .unwrap_err();
        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections.first().unwrap().path.as_slice(), [PathKey::from("n")]);
    }

    #[test]
    fn properties_are_reported_eagerly() {
        let shape = object_of([("a", string()), ("b", number()), ("c", boolean())]);
        let rejections = shape.collect(&value(json!({ "a": 1, "c": 2 }))).unwrap_err();
        let paths: Vec<String> = rejections.iter().map(|r| r.dotted_path()).collect();
        assert_eq!(paths, ["a", "b", "c"]);
    }

    #[test]
    fn missing_properties_read_as_undefined() {
        let shape = object_of([("name", string()), ("nick", maybe(string()))]);
        assert!(shape.validate(&value(json!({ "name": "ada" }))));
        assert!(!shape.validate(&value(json!({ "nick": "a" }))));
    }

    #[test]
    fn keyed_mode_requires_objects() {
        let shape = object_of([("0", number())]);
        assert!(!shape.validate(&value(json!([1]))));
        let rejections = shape.collect(&Value::Null).unwrap_err();
        assert_eq!(rejections.first().unwrap().reason, "Value <null> is not an object");
    }

    #[test]
    fn tuple_checks_positions_and_length() {
        let pair = tuple_of([string(), number()]);
        assert!(pair.validate(&value(json!(["a", 1]))));
        assert!(!pair.validate(&value(json!([1, "a"]))));
        assert!(!pair.validate(&value(json!({ "0": "a", "1": 1 }))));

        let rejections = pair.collect(&value(json!(["a", 1, true]))).unwrap_err();
        let rejection = rejections.first().unwrap();
        assert_eq!(rejection.path.as_slice(), [PathKey::from("length")]);
        assert_eq!(rejection.reason, "Value <3> is not equal to <2>");

        let loose = tuple_of_with([string(), number()], false);
        assert!(loose.validate(&value(json!(["a", 1, true]))));
    }

    #[test]
    fn descriptors() {
        let shape = object_of([("a", number()), ("first name", string())]);
        assert_eq!(shape.describe(), "{ a: number, \"first name\": string, [*]: * }");
        assert_eq!(shape.strict().describe(), "{ a: number, \"first name\": string }");
        assert_eq!(tuple_of([string(), number()]).describe(), "[ string, number ]");
        assert_eq!(
            tuple_of_with([string()], false).describe(),
            "[ string, ...*[] ]"
        );
        assert_eq!(object_of_with(Vec::<(String, Validator)>::new(), true).describe(), "{}");
        assert_eq!(tuple_of(Vec::<Validator>::new()).describe(), "[]");

        let wide = object_of((0..7).map(|i| (format!("k{i}"), number())));
        assert_eq!(
            wide.describe(),
            "{ k0: number, k1: number, ..., k5: number, k6: number, [*]: * }"
        );
    }

    #[test]
    fn lock_and_unlock_take_effect() {
        let shape = object_of_with([("a", number())], true).lock();
        assert!(shape.is_locked());
        assert!(shape.unstrict().is_strict());
        assert!(shape.lock().ptr_eq(&shape));

        let unlocked = shape.unlock();
        assert!(!unlocked.is_locked());
        assert!(!unlocked.unstrict().is_strict());
    }

    #[test]
    fn unlocking_rewrites_ignore_locks() {
        let shape = object_of_with([("a", number())], Strictness::StrictLocked);
        let rewritten = shape.transform_object(&Transformation::Strictness(
            Strictness::UnstrictUnlocked,
        ));
        assert!(!rewritten.is_strict());
        assert!(!rewritten.is_locked());
    }

    #[test]
    fn unchanged_rewrite_keeps_identity() {
        let shape = object_of_with([("a", number())], true);
        assert!(shape.strict().ptr_eq(&shape));
        assert!(shape.without_depth_limit().ptr_eq(&shape));
    }

    #[test]
    fn property_spec_is_introspectable() {
        let shape = object_of([("a", number()), ("b", string())]);
        let spec = shape.property_spec();
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.get(&PathKey::from("b")).map(Validator::describe), Some("string"));
        assert!(spec.get(&PathKey::from("c")).is_none());
    }
}
