//! Core traits for the validation system
//!
//! [`Validate`] is implemented by every validator node. Nodes are shared
//! behind [`Validator`] handles, which memoize descriptors and provide the
//! public entry points (`validate`, `collect`, `transform`, ...).

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use super::error::AssertionError;
use super::rejection::{Discard, RejectionSink, Rejections};
use super::transform::{DepthLimit, Strictness, Transformation};
use crate::render;
use crate::value::Value;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The contract every validator node implements.
///
/// # Examples
///
/// ```rust
/// use shapeguard::foundation::{Rejection, RejectionSink, Validate, Validator};
/// use shapeguard::value::Value;
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl Validate for Even {
///     fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
///         let ok = matches!(value, Value::Number(n) if n % 2.0 == 0.0);
///         if !ok {
///             sink.reject(Rejection::new("Value is not even", "even"));
///         }
///         ok
///     }
///
///     fn describe(&self) -> String {
///         "even".to_owned()
///     }
/// }
///
/// let even = Validator::new(Even);
/// assert!(even.validate(&Value::from(4)));
/// assert!(even.collect(&Value::from(3)).is_err());
/// ```
pub trait Validate: Send + Sync + fmt::Debug {
    /// Classifies `value`.
    ///
    /// On `false` at least one rejection must reach `sink`; on `true` none
    /// may. Must not retain `sink` past the call.
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool;

    /// Human-readable type descriptor. Called at most once per node.
    fn describe(&self) -> String;

    /// Rebuilds this node under `transformation`.
    ///
    /// Composite validators forward the transformation to their children.
    /// `None` means the node is unaffected and may be reused as-is.
    fn transform(&self, transformation: &Transformation) -> Option<Validator> {
        let _ = transformation;
        None
    }
}

// ============================================================================
// VALIDATOR HANDLE
// ============================================================================

pub(crate) struct Node {
    imp: Arc<dyn Validate>,
    descriptor: OnceLock<String>,
}

/// Shared handle to a validator node.
///
/// Cloning is cheap. Handles compare by node identity through
/// [`Validator::ptr_eq`].
#[derive(Clone)]
pub struct Validator {
    node: Arc<Node>,
}

impl Validator {
    /// Wraps a validator node.
    pub fn new<V: Validate + 'static>(imp: V) -> Self {
        Self::from_arc(Arc::new(imp))
    }

    pub(crate) fn from_arc(imp: Arc<dyn Validate>) -> Self {
        Self {
            node: Arc::new(Node {
                imp,
                descriptor: OnceLock::new(),
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<Node> {
        Arc::downgrade(&self.node)
    }

    pub(crate) fn upgrade(node: &Weak<Node>) -> Option<Self> {
        node.upgrade().map(|node| Self { node })
    }

    /// Checks `value`, discarding rejections.
    pub fn validate(&self, value: &Value) -> bool {
        self.node.imp.check(value, &mut Discard)
    }

    /// Checks `value`, reporting rejections to `sink`.
    pub fn validate_with(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        self.node.imp.check(value, sink)
    }

    /// Checks `value`, returning every rejection on failure.
    pub fn collect(&self, value: &Value) -> Result<(), Rejections> {
        let mut rejections = Rejections::new();
        if self.validate_with(value, &mut rejections) {
            Ok(())
        } else {
            Err(rejections)
        }
    }

    /// Checks `value`, turning a failure into an [`AssertionError`].
    pub fn assert(&self, value: &Value) -> Result<(), AssertionError> {
        self.collect(value).map_err(|rejections| AssertionError {
            value: render::inspect(value),
            expected: self.describe().to_owned(),
            rejections,
        })
    }

    /// The memoized type descriptor.
    pub fn describe(&self) -> &str {
        self.node
            .descriptor
            .get_or_init(|| self.node.imp.describe())
    }

    /// A plain predicate bound to this validator.
    pub fn as_predicate(&self) -> Predicate {
        Predicate {
            validator: self.clone(),
        }
    }

    /// Rebuilds the validator tree under `transformation`.
    ///
    /// Returns a handle to the same node when nothing in the tree changed.
    #[must_use = "transformations build a new validator"]
    pub fn transform(&self, transformation: &Transformation) -> Self {
        self.node
            .imp
            .transform(transformation)
            .unwrap_or_else(|| self.clone())
    }

    /// Makes every unlocked object/tuple validator in the tree strict.
    #[must_use = "transformations build a new validator"]
    pub fn strict(&self) -> Self {
        self.transform(&Transformation::Strictness(Strictness::Strict))
    }

    /// Makes every unlocked object/tuple validator in the tree non-strict.
    #[must_use = "transformations build a new validator"]
    pub fn unstrict(&self) -> Self {
        self.transform(&Transformation::Strictness(Strictness::Unstrict))
    }

    /// Rebinds the depth policy of every recursive validator in the tree.
    #[must_use = "transformations build a new validator"]
    pub fn with_depth_limit(&self, limit: DepthLimit) -> Self {
        self.transform(&Transformation::DepthLimit(limit))
    }

    /// Rejects recursion at `depth`. Zero removes the limit.
    #[must_use = "transformations build a new validator"]
    pub fn with_max_depth(&self, depth: usize) -> Self {
        self.with_depth_limit(DepthLimit::max(depth))
    }

    /// Prunes recursion at `depth`. Zero removes the limit.
    #[must_use = "transformations build a new validator"]
    pub fn with_skip_depth(&self, depth: usize) -> Self {
        self.with_depth_limit(DepthLimit::skip(depth))
    }

    /// Removes any depth policy.
    #[must_use = "transformations build a new validator"]
    pub fn without_depth_limit(&self) -> Self {
        self.with_depth_limit(DepthLimit::Unlimited)
    }

    /// Both handles point to the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Accepts values matching both validators.
    #[must_use = "builder methods must be chained or built"]
    pub fn and(&self, other: impl IntoValidator) -> Self {
        crate::combinators::all_of([self.clone(), other.into_validator()])
    }

    /// Accepts values matching either validator.
    #[must_use = "builder methods must be chained or built"]
    pub fn or(&self, other: impl IntoValidator) -> Self {
        crate::combinators::any_of([self.clone(), other.into_validator()])
    }

    /// Also accepts `undefined`.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(&self) -> Self {
        crate::combinators::maybe(self.clone())
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.describe()).finish()
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Rebuilds `children` under `transformation`.
///
/// `None` when every child came back unchanged.
pub(crate) fn transform_children(
    children: &[Validator],
    transformation: &Transformation,
) -> Option<Vec<Validator>> {
    let transformed: Vec<Validator> = children
        .iter()
        .map(|child| child.transform(transformation))
        .collect();
    let changed = transformed
        .iter()
        .zip(children)
        .any(|(new, old)| !new.ptr_eq(old));
    changed.then_some(transformed)
}

// ============================================================================
// PREDICATE
// ============================================================================

/// A plain boolean view of a validator.
///
/// Obtained through [`Validator::as_predicate`]. Two predicates of the same
/// validator handle compare equal.
#[derive(Clone)]
pub struct Predicate {
    validator: Validator,
}

impl Predicate {
    pub fn test(&self, value: &Value) -> bool {
        self.validator.validate(value)
    }

    /// The validator this predicate is bound to.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Converts into an owned closure.
    pub fn into_fn(self) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
        move |value| self.test(value)
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.validator.ptr_eq(&other.validator)
    }
}

impl Eq for Predicate {}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate")
            .field(&self.validator.describe())
            .finish()
    }
}

// ============================================================================
// CONVERSION
// ============================================================================

/// Anything usable where a validator is expected.
///
/// Bare predicates `Fn(&Value) -> bool` are adapted into validators that
/// describe themselves as `* (Custom type)`.
pub trait IntoValidator {
    fn into_validator(self) -> Validator;
}

impl IntoValidator for Validator {
    fn into_validator(self) -> Validator {
        self
    }
}

impl IntoValidator for &Validator {
    fn into_validator(self) -> Validator {
        self.clone()
    }
}

impl IntoValidator for Predicate {
    fn into_validator(self) -> Validator {
        self.validator
    }
}

impl<F> IntoValidator for F
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    fn into_validator(self) -> Validator {
        crate::combinators::predicate(self)
    }
}
