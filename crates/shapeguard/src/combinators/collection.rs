//! Homogeneous collection validators
//!
//! - [`array_of`]: every element satisfies one validator
//! - [`record_of`] / [`record_of_keyed`]: every entry value (and key) satisfies
//!   one validator
//!
//! Element rejections carry the element position (or record key) as an
//! outer path segment. Both validators stop at the first failing entry.

use crate::foundation::{
    IntoValidator, MapSink, PathKey, PathSink, Rejection, RejectionSink, Transformation, Validate,
    Validator, transform_children,
};
use crate::render::inspect;
use crate::value::Value;

// ============================================================================
// ARRAY OF
// ============================================================================

/// Accepts arrays whose elements all satisfy `element`.
#[derive(Debug, Clone)]
pub struct ArrayOf {
    element: Validator,
}

impl ArrayOf {
    pub fn new(element: Validator) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Validator {
        &self.element
    }
}

impl Validate for ArrayOf {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        let Some(items) = value.as_array() else {
            if sink.is_collecting() {
                sink.reject(Rejection::new(
                    format!("Value {} is not an array", inspect(value)),
                    self.describe(),
                ));
            }
            return false;
        };

        items.iter().enumerate().all(|(index, item)| {
            self.element
                .validate_with(item, &mut PathSink::new(sink, index))
        })
    }

    fn describe(&self) -> String {
        format!("ArrayOf({})", self.element.describe())
    }

    fn transform(&self, transformation: &Transformation) -> Option<Validator> {
        let element = self.element.transform(transformation);
        (!element.ptr_eq(&self.element)).then(|| Validator::new(Self::new(element)))
    }
}

/// Creates a validator for arrays of `element`.
///
/// ```rust
/// use shapeguard::combinators::array_of;
/// use shapeguard::foundation::PathKey;
/// use shapeguard::validators::string;
/// use serde_json::json;
///
/// let names = array_of(string());
/// let rejections = names.collect(&json!(["a", "b", 3]).into()).unwrap_err();
/// assert_eq!(rejections.first().unwrap().path.as_slice(), [PathKey::Index(2)]);
/// ```
#[must_use]
pub fn array_of(element: impl IntoValidator) -> Validator {
    Validator::new(ArrayOf::new(element.into_validator()))
}

// ============================================================================
// RECORD OF
// ============================================================================

/// Accepts objects whose entry values (and optionally keys) all satisfy a
/// validator.
#[derive(Debug, Clone)]
pub struct RecordOf {
    value: Validator,
    key: Option<Validator>,
}

impl RecordOf {
    pub fn new(value: Validator, key: Option<Validator>) -> Self {
        Self { value, key }
    }

    pub fn value_validator(&self) -> &Validator {
        &self.value
    }

    pub fn key_validator(&self) -> Option<&Validator> {
        self.key.as_ref()
    }

    fn check_key(&self, key: &str, sink: &mut dyn RejectionSink) -> bool {
        let Some(validator) = &self.key else {
            return true;
        };
        let key_value = Value::from(key);
        let mut rewrap = MapSink::new(sink, |mut rejection: Rejection| {
            rejection.reason = format!(
                "Invalid record key {}: {}",
                inspect(&key_value),
                rejection.reason
            );
            rejection
        });
        validator.validate_with(&key_value, &mut rewrap)
    }
}

impl Validate for RecordOf {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        let Some(entries) = value.as_object() else {
            if sink.is_collecting() {
                sink.reject(Rejection::new(
                    format!("Value {} is not an object", inspect(value)),
                    self.describe(),
                ));
            }
            return false;
        };

        entries.iter().all(|(key, item)| {
            self.check_key(key, sink)
                && self
                    .value
                    .validate_with(item, &mut PathSink::new(sink, PathKey::from_key(key)))
        })
    }

    fn describe(&self) -> String {
        let key = self.key.as_ref().map_or("*", Validator::describe);
        format!("{{ [{key}]: {} }}", self.value.describe())
    }

    fn transform(&self, transformation: &Transformation) -> Option<Validator> {
        let mut children = vec![self.value.clone()];
        children.extend(self.key.clone());
        let mut transformed = transform_children(&children, transformation)?.into_iter();
        let value = transformed.next()?;
        Some(Validator::new(Self::new(value, transformed.next())))
    }
}

/// Creates a validator for records whose values satisfy `value`.
#[must_use]
pub fn record_of(value: impl IntoValidator) -> Validator {
    Validator::new(RecordOf::new(value.into_validator(), None))
}

/// Creates a validator for records whose values satisfy `value` and whose
/// keys satisfy `key`.
///
/// Key rejections keep their path and have their reason prefixed with
/// `Invalid record key <key>:`.
#[must_use]
pub fn record_of_keyed(value: impl IntoValidator, key: impl IntoValidator) -> Validator {
    Validator::new(RecordOf::new(
        value.into_validator(),
        Some(key.into_validator()),
    ))
}
