//! Recursive validators
//!
//! [`with_recursion`] builds a validator from a factory that receives a
//! reference to the validator being built. The reference may be embedded
//! anywhere in the factory's output but must not be used to validate before
//! the factory returns.
//!
//! # Depth limits
//!
//! Every evaluation of a recursive reference increments a depth counter
//! shared by all recursive validators on the current thread, and decrements
//! it on exit (also on unwind). A [`DepthLimit`] decides what happens once
//! the counter reaches its bound:
//!
//! - [`DepthLimit::Max`]: the value is rejected
//! - [`DepthLimit::Skip`]: the value is accepted without further checks
//!
//! ```rust
//! use shapeguard::combinators::{any_of, record_of, with_recursion};
//! use shapeguard::validators::string;
//! use serde_json::json;
//!
//! let tree = with_recursion(|node| record_of(any_of([string(), node])));
//! let deep = json!({ "a": { "b": { "c": 5 } } }).into();
//! assert!(!tree.validate(&deep));
//! assert!(tree.set_skip_depth(2).validate(&deep));
//! ```

use std::cell::Cell;
use std::ops::Deref;
use std::sync::{Arc, OnceLock, Weak};

use crate::foundation::{
    ConfigError, DepthLimit, IntoValidator, Node, RecursionOptions, Rejection, RejectionSink,
    Transformation, Validate, Validator,
};
use crate::value::Value;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Number of recursive references currently being evaluated on this thread.
pub fn current_depth() -> usize {
    DEPTH.with(Cell::get)
}

/// Holds one level of the shared depth counter.
struct DepthGuard {
    depth: usize,
}

impl DepthGuard {
    fn enter() -> Self {
        let depth = DEPTH.with(|counter| {
            let depth = counter.get() + 1;
            counter.set(depth);
            depth
        });
        Self { depth }
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|counter| counter.set(counter.get().saturating_sub(1)));
    }
}

type Factory = Arc<dyn Fn(Validator) -> Validator + Send + Sync>;

// ============================================================================
// RECURSIVE REFERENCE
// ============================================================================

/// The self-reference handed to a recursion factory.
pub struct RecursiveRef {
    target: OnceLock<Weak<Node>>,
    limit: DepthLimit,
}

impl RecursiveRef {
    /// # Panics
    ///
    /// When the reference is evaluated before its recursive validator is
    /// built, or after it was dropped.
    fn target(&self) -> Validator {
        match self.target.get().and_then(Validator::upgrade) {
            Some(target) => target,
            None => panic!(
                "recursive reference evaluated outside the lifetime of its recursive validator"
            ),
        }
    }
}

impl Validate for RecursiveRef {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        let target = self.target();
        let guard = DepthGuard::enter();

        match self.limit {
            DepthLimit::Max(max) if guard.depth >= max.get() => {
                tracing::trace!(
                    depth = guard.depth,
                    max_depth = max.get(),
                    "recursion max depth reached"
                );
                if sink.is_collecting() {
                    sink.reject(Rejection::new(
                        format!("Recursion max depth has reached at {max}"),
                        target.describe(),
                    ));
                }
                false
            }
            DepthLimit::Skip(skip) if guard.depth >= skip.get() => {
                tracing::trace!(
                    depth = guard.depth,
                    skip_depth = skip.get(),
                    "recursion skip depth reached"
                );
                true
            }
            _ => target.validate_with(value, sink),
        }
    }

    fn describe(&self) -> String {
        "↻(Recursive)".to_owned()
    }
}

impl std::fmt::Debug for RecursiveRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecursiveRef")
            .field("limit", &self.limit)
            .field("bound", &self.target.get().is_some())
            .finish()
    }
}

// ============================================================================
// RECURSIVE WRAPPER
// ============================================================================

/// The validator built by a recursion factory.
pub struct Recursive {
    inner: Validator,
    factory: Factory,
    limit: DepthLimit,
    // Transformations replayed on the factory output whenever it runs again.
    applied: Vec<Transformation>,
}

impl Recursive {
    pub fn inner(&self) -> &Validator {
        &self.inner
    }

    pub fn limit(&self) -> DepthLimit {
        self.limit
    }

    /// Rebuilds with `limit`, also rebinding every recursive validator the
    /// factory output contains. `None` when nothing changed.
    fn rebind(&self, limit: DepthLimit) -> Option<RecursiveValidator> {
        let transformation = Transformation::DepthLimit(limit);
        let nested_changed = !self.inner.transform(&transformation).ptr_eq(&self.inner);
        if limit == self.limit && !nested_changed {
            return None;
        }
        tracing::debug!(?limit, previous = ?self.limit, "rebuilding recursive validator");

        let mut applied: Vec<Transformation> = self
            .applied
            .iter()
            .filter(|applied| !matches!(applied, Transformation::DepthLimit(_)))
            .copied()
            .collect();
        applied.push(transformation);
        Some(build(self.factory.clone(), limit, applied))
    }
}

fn build(factory: Factory, limit: DepthLimit, applied: Vec<Transformation>) -> RecursiveValidator {
    let reference = Arc::new(RecursiveRef {
        target: OnceLock::new(),
        limit,
    });

    let mut inner = factory(Validator::from_arc(reference.clone()));
    for transformation in &applied {
        inner = inner.transform(transformation);
    }

    let handle = RecursiveValidator::from_node(Recursive {
        inner,
        factory,
        limit,
        applied,
    });
    // A fresh OnceLock is always empty here.
    let _ = reference.target.set(handle.validator.downgrade());
    handle
}

impl Validate for Recursive {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        self.inner.validate_with(value, sink)
    }

    fn describe(&self) -> String {
        format!("↻({})", self.inner.describe())
    }

    fn transform(&self, transformation: &Transformation) -> Option<Validator> {
        match transformation {
            Transformation::DepthLimit(limit) => {
                self.rebind(*limit).map(|rebuilt| rebuilt.validator)
            }
            Transformation::Strictness(_) => {
                if self.inner.transform(transformation).ptr_eq(&self.inner) {
                    return None;
                }
                let mut applied = self.applied.clone();
                applied.push(*transformation);
                Some(build(self.factory.clone(), self.limit, applied).validator)
            }
        }
    }
}

impl std::fmt::Debug for Recursive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recursive")
            .field("inner", &self.inner)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// RECURSIVE VALIDATOR HANDLE
// ============================================================================

/// Handle to a [`Recursive`] node with depth-limit controls.
///
/// Dereferences to [`Validator`]. Depth-limit methods return a rebuilt
/// validator and leave `self` unchanged.
#[derive(Clone)]
pub struct RecursiveValidator {
    node: Arc<Recursive>,
    validator: Validator,
}

impl RecursiveValidator {
    fn from_node(node: Recursive) -> Self {
        let node = Arc::new(node);
        let validator = Validator::from_arc(node.clone());
        Self { node, validator }
    }

    pub fn depth_limit(&self) -> DepthLimit {
        self.node.limit
    }

    pub fn as_validator(&self) -> &Validator {
        &self.validator
    }

    /// Rebuilds with `limit`, rebinding nested recursive validators too.
    /// Returns a clone when nothing changed.
    #[must_use = "transformations build a new validator"]
    pub fn with_limit(&self, limit: DepthLimit) -> Self {
        self.node.rebind(limit).unwrap_or_else(|| self.clone())
    }

    /// Rejects values nested `depth` or more recursive references deep.
    /// Zero removes the limit.
    #[must_use = "transformations build a new validator"]
    pub fn set_max_depth(&self, depth: usize) -> Self {
        self.with_limit(DepthLimit::max(depth))
    }

    /// Accepts values nested `depth` or more recursive references deep.
    /// Zero removes the limit.
    #[must_use = "transformations build a new validator"]
    pub fn set_skip_depth(&self, depth: usize) -> Self {
        self.with_limit(DepthLimit::skip(depth))
    }

    #[must_use = "transformations build a new validator"]
    pub fn reset_depth_limitation(&self) -> Self {
        self.with_limit(DepthLimit::Unlimited)
    }

    /// Rebuilds with limits taken from `options`.
    pub fn with_options(&self, options: RecursionOptions) -> Result<Self, ConfigError> {
        Ok(self.with_limit(options.limit()?))
    }
}

impl Deref for RecursiveValidator {
    type Target = Validator;

    fn deref(&self) -> &Validator {
        &self.validator
    }
}

impl std::fmt::Debug for RecursiveValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecursiveValidator")
            .field("type", &self.validator.describe())
            .field("limit", &self.node.limit)
            .finish()
    }
}

impl IntoValidator for RecursiveValidator {
    fn into_validator(self) -> Validator {
        self.validator
    }
}

impl IntoValidator for &RecursiveValidator {
    fn into_validator(self) -> Validator {
        self.validator.clone()
    }
}

impl From<RecursiveValidator> for Validator {
    fn from(recursive: RecursiveValidator) -> Self {
        recursive.validator
    }
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// Builds a recursive validator without depth limits.
#[must_use]
pub fn with_recursion<F, V>(factory: F) -> RecursiveValidator
where
    F: Fn(Validator) -> V + Send + Sync + 'static,
    V: IntoValidator,
{
    with_recursion_limit(DepthLimit::Unlimited, factory)
}

/// Builds a recursive validator with a depth limit.
#[must_use]
pub fn with_recursion_limit<F, V>(limit: DepthLimit, factory: F) -> RecursiveValidator
where
    F: Fn(Validator) -> V + Send + Sync + 'static,
    V: IntoValidator,
{
    let factory: Factory = Arc::new(move |reference| factory(reference).into_validator());
    build(factory, limit, Vec::new())
}

/// Builds a recursive validator with limits taken from `options`.
pub fn with_recursion_options<F, V>(
    options: RecursionOptions,
    factory: F,
) -> Result<RecursiveValidator, ConfigError>
where
    F: Fn(Validator) -> V + Send + Sync + 'static,
    V: IntoValidator,
{
    Ok(with_recursion_limit(options.limit()?, factory))
}
