//! Assertions built from validators
//!
//! An [`Assertion`] turns a validation failure into an error value built by a
//! caller-supplied factory, which receives the rejected value and every
//! collected rejection.
//!
//! ```rust
//! use shapeguard::assertion::assert_by;
//! use shapeguard::validators::string;
//! use shapeguard::value::Value;
//!
//! let name = assert_by(string(), |value, rejections| {
//!     format!("bad name {value:?}: {} problem(s)", rejections.len())
//! });
//! assert!(name.check(&Value::from("ada")).is_ok());
//! assert_eq!(name.check(&Value::Null).unwrap_err(), "bad name Null: 1 problem(s)");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::foundation::{AssertionError, IntoValidator, Rejections, Validator};
use crate::render::inspect;
use crate::value::Value;

type ErrorFactory<E> = Arc<dyn Fn(&Value, Rejections) -> E + Send + Sync>;

/// A validator paired with an error factory.
pub struct Assertion<E> {
    validator: Validator,
    factory: ErrorFactory<E>,
}

impl<E> Assertion<E> {
    /// `Ok` when `value` is accepted, otherwise the factory's error.
    pub fn check(&self, value: &Value) -> Result<(), E> {
        self.validator
            .collect(value)
            .map_err(|rejections| (self.factory)(value, rejections))
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

impl<E> Clone for Assertion<E> {
    fn clone(&self) -> Self {
        Self {
            validator: self.validator.clone(),
            factory: self.factory.clone(),
        }
    }
}

impl<E> fmt::Debug for Assertion<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

/// Builds an assertion whose failures are produced by `factory`.
#[must_use]
pub fn assert_by<E, F>(validator: impl IntoValidator, factory: F) -> Assertion<E>
where
    F: Fn(&Value, Rejections) -> E + Send + Sync + 'static,
{
    Assertion {
        validator: validator.into_validator(),
        factory: Arc::new(factory),
    }
}

/// Builds an assertion failing with [`AssertionError`].
#[must_use]
pub fn assertion(validator: impl IntoValidator) -> Assertion<AssertionError> {
    let validator = validator.into_validator();
    let expected = validator.describe().to_owned();
    assert_by(validator, move |value, rejections| AssertionError {
        value: inspect(value),
        expected: expected.clone(),
        rejections,
    })
}
