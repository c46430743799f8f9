//! Logical combinators
//!
//! - [`all_of`]: intersection, every validator must accept
//! - [`any_of`]: union, at least one validator must accept
//! - [`maybe`] / [`maybe_or_null`]: also accept `undefined` (and `null`)
//!
//! # Examples
//!
//! ```rust
//! use shapeguard::combinators::{any_of, maybe};
//! use shapeguard::validators::{number, string};
//! use shapeguard::value::Value;
//!
//! let id = maybe(any_of([string(), number()]));
//! assert!(id.validate(&Value::Undefined));
//! assert!(id.validate(&Value::from("a1")));
//! assert!(!id.validate(&Value::Null));
//! assert_eq!(id.describe(), "?(string | number)");
//! ```

use crate::foundation::{
    IntoValidator, Rejection, RejectionSink, Rejections, Transformation, Validate, Validator,
    transform_children,
};
use crate::render::{inspect, join_types};
use crate::value::Value;

fn collect_validators<I>(validators: I) -> Vec<Validator>
where
    I: IntoIterator,
    I::Item: IntoValidator,
{
    validators
        .into_iter()
        .map(IntoValidator::into_validator)
        .collect()
}

fn descriptors(validators: &[Validator]) -> Vec<String> {
    validators.iter().map(|v| v.describe().to_owned()).collect()
}

// ============================================================================
// ALL OF
// ============================================================================

/// Accepts values accepted by every inner validator.
///
/// With a collecting sink every validator runs so that all failures are
/// reported; otherwise evaluation stops at the first failure.
#[derive(Debug, Clone)]
pub struct AllOf {
    validators: Vec<Validator>,
}

impl AllOf {
    pub fn new(validators: Vec<Validator>) -> Self {
        Self { validators }
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }
}

impl Validate for AllOf {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        if !sink.is_collecting() {
            return self
                .validators
                .iter()
                .all(|validator| validator.validate_with(value, sink));
        }

        let mut valid = true;
        for validator in &self.validators {
            valid &= validator.validate_with(value, sink);
        }
        valid
    }

    fn describe(&self) -> String {
        if self.validators.is_empty() {
            return "*".to_owned();
        }
        join_types(descriptors(&self.validators), " & ")
    }

    fn transform(&self, transformation: &Transformation) -> Option<Validator> {
        transform_children(&self.validators, transformation)
            .map(|validators| Validator::new(Self::new(validators)))
    }
}

/// Creates an intersection of validators.
#[must_use]
pub fn all_of<I>(validators: I) -> Validator
where
    I: IntoIterator,
    I::Item: IntoValidator,
{
    Validator::new(AllOf::new(collect_validators(validators)))
}

// ============================================================================
// ANY OF
// ============================================================================

/// Accepts values accepted by at least one inner validator.
///
/// Validators run left to right until one accepts. Rejections of the failed
/// branches are buffered and only reported when every branch fails, deepest
/// paths first.
#[derive(Debug, Clone)]
pub struct AnyOf {
    validators: Vec<Validator>,
}

impl AnyOf {
    pub fn new(validators: Vec<Validator>) -> Self {
        Self { validators }
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }
}

impl Validate for AnyOf {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        if !sink.is_collecting() {
            return self
                .validators
                .iter()
                .any(|validator| validator.validate_with(value, sink));
        }

        let mut buffered = Rejections::new();
        if self
            .validators
            .iter()
            .any(|validator| validator.validate_with(value, &mut buffered))
        {
            return true;
        }

        if buffered.is_empty() {
            let descriptor = self.describe();
            sink.reject(Rejection::new(
                format!("Value {} is not {descriptor}", inspect(value)),
                descriptor,
            ));
        } else {
            buffered.sort_deepest_first();
            buffered.flush_into(sink);
        }
        false
    }

    fn describe(&self) -> String {
        if self.validators.is_empty() {
            return "X (never)".to_owned();
        }
        join_types(descriptors(&self.validators), " | ")
    }

    fn transform(&self, transformation: &Transformation) -> Option<Validator> {
        transform_children(&self.validators, transformation)
            .map(|validators| Validator::new(Self::new(validators)))
    }
}

/// Creates a union of validators.
#[must_use]
pub fn any_of<I>(validators: I) -> Validator
where
    I: IntoIterator,
    I::Item: IntoValidator,
{
    Validator::new(AnyOf::new(collect_validators(validators)))
}

/// Accepts a single `T` or an array of `T`.
#[must_use]
pub fn single_or_array(validator: impl IntoValidator) -> Validator {
    let validator = validator.into_validator();
    any_of([validator.clone(), super::array_of(validator)])
}

// ============================================================================
// MAYBE
// ============================================================================

/// Accepts `undefined`, optionally `null`, or whatever the inner validator
/// accepts.
#[derive(Debug, Clone)]
pub struct Maybe {
    inner: Validator,
    include_null: bool,
}

impl Maybe {
    pub fn new(inner: Validator, include_null: bool) -> Self {
        Self {
            inner,
            include_null,
        }
    }

    pub fn inner(&self) -> &Validator {
        &self.inner
    }

    fn accepted_type(&self) -> String {
        if self.include_null {
            format!("{} | null", self.inner.describe())
        } else {
            self.inner.describe().to_owned()
        }
    }
}

impl Validate for Maybe {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        if value.is_undefined() || (self.include_null && value.is_null()) {
            return true;
        }
        if !sink.is_collecting() {
            return self.inner.validate_with(value, sink);
        }

        let mut inner_rejections = Rejections::new();
        if self.inner.validate_with(value, &mut inner_rejections) {
            return true;
        }

        let reason = if self.include_null {
            format!(
                "Value {} is not <undefined>, <null>, nor {}",
                inspect(value),
                self.accepted_type()
            )
        } else {
            format!(
                "Value {} is not <undefined> nor {}",
                inspect(value),
                self.accepted_type()
            )
        };
        sink.reject(Rejection::new(reason, self.describe()));
        inner_rejections.flush_into(sink);
        false
    }

    fn describe(&self) -> String {
        format!("?({})", self.accepted_type())
    }

    fn transform(&self, transformation: &Transformation) -> Option<Validator> {
        let inner = self.inner.transform(transformation);
        (!inner.ptr_eq(&self.inner)).then(|| Validator::new(Self::new(inner, self.include_null)))
    }
}

/// Accepts `undefined` or whatever `validator` accepts.
#[must_use]
pub fn maybe(validator: impl IntoValidator) -> Validator {
    Validator::new(Maybe::new(validator.into_validator(), false))
}

/// Accepts `undefined`, `null`, or whatever `validator` accepts.
#[must_use]
pub fn maybe_or_null(validator: impl IntoValidator) -> Validator {
    Validator::new(Maybe::new(validator.into_validator(), true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::PathKey;
    use crate::validators::{boolean, is, number, string};
    use serde_json::json;

    #[test]
    fn all_of_reports_every_failure() {
        let validator = all_of([string(), number(), boolean()]);
        assert_eq!(validator.describe(), "string & number & boolean");
        let rejections = validator.collect(&Value::Null).unwrap_err();
        assert_eq!(rejections.len(), 3);
        assert!(rejections.iter().all(|r| r.path.is_empty()));
    }

    #[test]
    fn all_of_accepts_when_every_branch_accepts() {
        let validator = all_of([string(), is("x")]);
        assert!(validator.validate(&Value::from("x")));
        assert!(!validator.validate(&Value::from("y")));
        assert_eq!(all_of(Vec::<Validator>::new()).describe(), "*");
    }

    #[test]
    fn any_of_buffers_until_all_fail() {
        let validator = any_of([string(), number()]);
        let mut count = 0;
        assert!(validator.validate_with(&Value::from(1), &mut |_: Rejection| count += 1));
        assert_eq!(count, 0);

        let rejections = validator.collect(&Value::Null).unwrap_err();
        let reasons: Vec<&str> = rejections.iter().map(|r| r.reason.as_str()).collect();
        assert_eq!(
            reasons,
            ["Value <null> is not a string", "Value <null> is not a number"]
        );
    }

    #[test]
    fn any_of_orders_deepest_first() {
        let shallow = string();
        let deep = crate::combinators::array_of(string());
        let validator = any_of([shallow, deep]);
        let rejections = validator.collect(&Value::from(json!([1]))).unwrap_err();
        assert_eq!(rejections.len(), 2);
        assert_eq!(rejections.as_slice()[0].path.as_slice(), [PathKey::Index(0)]);
        assert!(rejections.as_slice()[1].path.is_empty());
    }

    #[test]
    fn empty_any_of_rejects_with_reason() {
        let validator = any_of(Vec::<Validator>::new());
        assert_eq!(validator.describe(), "X (never)");
        assert_eq!(validator.collect(&Value::from(1)).unwrap_err().len(), 1);
    }

    #[test]
    fn wide_union_descriptor_is_elided() {
        let validator = any_of((0..7).map(|n| is(n)));
        assert_eq!(validator.describe(), "0 | 1 | ... | 5 | 6");
    }

    #[test]
    fn maybe_reports_outer_then_inner() {
        let validator = maybe(string());
        assert_eq!(validator.describe(), "?(string)");
        let rejections = validator.collect(&Value::from(5)).unwrap_err();
        let reasons: Vec<&str> = rejections.iter().map(|r| r.reason.as_str()).collect();
        assert_eq!(
            reasons,
            [
                "Value <5> is not <undefined> nor string",
                "Value <5> is not a string"
            ]
        );
        assert_eq!(rejections.first().unwrap().property_type, "?(string)");
    }

    #[test]
    fn maybe_or_null_accepts_null() {
        let validator = maybe_or_null(number());
        assert!(validator.validate(&Value::Null));
        assert!(validator.validate(&Value::Undefined));
        let rejections = validator.collect(&Value::from("x")).unwrap_err();
        assert_eq!(
            rejections.first().unwrap().reason,
            "Value <'x'> is not <undefined>, <null>, nor number | null"
        );
    }

    #[test]
    fn single_or_array_accepts_both_forms() {
        let validator = single_or_array(number());
        assert!(validator.validate(&Value::from(1)));
        assert!(validator.validate(&Value::from(json!([1, 2]))));
        assert!(!validator.validate(&Value::from(json!([1, "2"]))));
        assert_eq!(validator.describe(), "number | ArrayOf(number)");
    }
}
