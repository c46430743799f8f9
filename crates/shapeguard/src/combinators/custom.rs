//! Closure-backed validators and rejection rewriting
//!
//! - [`predicate`] / [`predicate_named`]: lift a `Fn(&Value) -> bool`
//! - [`register`]: lift a closure that reports its own rejections
//! - [`set_rejection`]: replace a validator's rejections with a single one
//! - [`map_rejections`]: rewrite every rejection a validator reports
//!
//! Closures are also accepted directly wherever a validator is expected,
//! through [`IntoValidator`].
//!
//! ```rust
//! use shapeguard::combinators::{all_of, predicate_named};
//! use shapeguard::validators::number;
//! use shapeguard::value::Value;
//!
//! let positive = predicate_named("positive", |v: &Value| matches!(v, Value::Number(n) if *n > 0.0));
//! let count = all_of([number(), positive]);
//! assert!(count.validate(&Value::from(3)));
//! assert_eq!(count.describe(), "number & * (positive)");
//! ```

use std::sync::Arc;

use crate::foundation::{
    Discard, IntoValidator, MapSink, Rejection, RejectionSink, TrackingSink, Transformation,
    Validate, Validator,
};
use crate::render::inspect;
use crate::value::Value;

/// Descriptor of validators built from anonymous closures.
pub const CUSTOM_TYPE: &str = "* (Custom type)";

type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type CheckFn = Arc<dyn Fn(&Value, &mut dyn RejectionSink) -> bool + Send + Sync>;
type RejectionFn = Arc<dyn Fn(&Value) -> Rejection + Send + Sync>;
type MapFn = Arc<dyn Fn(&Value, Rejection) -> Rejection + Send + Sync>;

fn generic_rejection(value: &Value, descriptor: &str) -> Rejection {
    Rejection::new(format!("Value {} failed validation", inspect(value)), descriptor)
}

// ============================================================================
// PREDICATES
// ============================================================================

/// Validator backed by a boolean predicate.
pub struct PredicateValidator {
    name: Option<String>,
    predicate: PredicateFn,
}

impl Validate for PredicateValidator {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        if (self.predicate)(value) {
            return true;
        }
        if sink.is_collecting() {
            sink.reject(generic_rejection(value, &self.describe()));
        }
        false
    }

    fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("* ({name})"),
            None => CUSTOM_TYPE.to_owned(),
        }
    }
}

impl std::fmt::Debug for PredicateValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Lifts a predicate into a validator described as `* (Custom type)`.
#[must_use]
pub fn predicate<F>(predicate: F) -> Validator
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Validator::new(PredicateValidator {
        name: None,
        predicate: Arc::new(predicate),
    })
}

/// Lifts a predicate into a validator described as `* (<name>)`.
#[must_use]
pub fn predicate_named<F>(name: impl Into<String>, predicate: F) -> Validator
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Validator::new(PredicateValidator {
        name: Some(name.into()),
        predicate: Arc::new(predicate),
    })
}

// ============================================================================
// REGISTERED
// ============================================================================

/// Validator backed by a closure that reports its own rejections.
pub struct Registered {
    descriptor: String,
    check: CheckFn,
}

impl Validate for Registered {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        let mut tracking = TrackingSink::new(sink);
        let valid = (self.check)(value, &mut tracking);
        if !valid && !tracking.reported && tracking.is_collecting() {
            tracking.reject(generic_rejection(value, &self.descriptor));
        }
        valid
    }

    fn describe(&self) -> String {
        self.descriptor.clone()
    }
}

impl std::fmt::Debug for Registered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registered")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Registers a closure as a validator.
///
/// The closure may report rejections to the sink it receives. A failure
/// without any report gets a generic `Value <x> failed validation`
/// rejection.
///
/// ```rust
/// use shapeguard::combinators::register;
/// use shapeguard::foundation::{Rejection, RejectionSink};
/// use shapeguard::value::Value;
///
/// let short = register("short string", |value, sink| {
///     let ok = value.as_str().is_some_and(|s| s.len() < 4);
///     if !ok && sink.is_collecting() {
///         sink.reject(Rejection::new("too long", "short string"));
///     }
///     ok
/// });
/// let rejections = short.collect(&Value::from("lengthy")).unwrap_err();
/// assert_eq!(rejections.first().unwrap().reason, "too long");
/// ```
#[must_use]
pub fn register<F>(descriptor: impl Into<String>, check: F) -> Validator
where
    F: Fn(&Value, &mut dyn RejectionSink) -> bool + Send + Sync + 'static,
{
    Validator::new(Registered {
        descriptor: descriptor.into(),
        check: Arc::new(check),
    })
}

// ============================================================================
// REJECTION REWRITING
// ============================================================================

/// Reports one generated rejection instead of the inner validator's own.
pub struct WithRejection {
    inner: Validator,
    generate: RejectionFn,
}

impl Validate for WithRejection {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        if self.inner.validate_with(value, &mut Discard) {
            return true;
        }
        if sink.is_collecting() {
            sink.reject((self.generate)(value));
        }
        false
    }

    fn describe(&self) -> String {
        self.inner.describe().to_owned()
    }

    fn transform(&self, transformation: &Transformation) -> Option<Validator> {
        let inner = self.inner.transform(transformation);
        (!inner.ptr_eq(&self.inner)).then(|| {
            Validator::new(Self {
                inner,
                generate: self.generate.clone(),
            })
        })
    }
}

impl std::fmt::Debug for WithRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithRejection")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Replaces the rejections of `validator` with the one built by `generate`.
#[must_use]
pub fn set_rejection<F>(validator: impl IntoValidator, generate: F) -> Validator
where
    F: Fn(&Value) -> Rejection + Send + Sync + 'static,
{
    Validator::new(WithRejection {
        inner: validator.into_validator(),
        generate: Arc::new(generate),
    })
}

/// Rewrites every rejection reported by the inner validator.
pub struct MapRejections {
    inner: Validator,
    map: MapFn,
}

impl Validate for MapRejections {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        let mut mapped = MapSink::new(sink, |rejection: Rejection| (self.map)(value, rejection));
        self.inner.validate_with(value, &mut mapped)
    }

    fn describe(&self) -> String {
        self.inner.describe().to_owned()
    }

    fn transform(&self, transformation: &Transformation) -> Option<Validator> {
        let inner = self.inner.transform(transformation);
        (!inner.ptr_eq(&self.inner)).then(|| {
            Validator::new(Self {
                inner,
                map: self.map.clone(),
            })
        })
    }
}

impl std::fmt::Debug for MapRejections {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapRejections")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Rewrites every rejection of `validator` through `map`, which also
/// receives the validated value.
#[must_use]
pub fn map_rejections<F>(validator: impl IntoValidator, map: F) -> Validator
where
    F: Fn(&Value, Rejection) -> Rejection + Send + Sync + 'static,
{
    Validator::new(MapRejections {
        inner: validator.into_validator(),
        map: Arc::new(map),
    })
}
