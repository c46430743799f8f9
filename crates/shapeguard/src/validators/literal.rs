//! Literal-equality validators

use std::collections::HashSet;

use crate::foundation::{Rejection, RejectionSink, Validate, Validator};
use crate::render::{inspect, join_types, literal_type};
use crate::value::{LiteralKey, Value};

// ============================================================================
// IS
// ============================================================================

/// Accepts values that are the same value as `expected`.
#[derive(Debug, Clone)]
pub struct Is {
    expected: Value,
}

impl Is {
    pub fn new(expected: impl Into<Value>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Validate for Is {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        if value.same_value(&self.expected) {
            return true;
        }
        if sink.is_collecting() {
            sink.reject(Rejection::new(
                format!(
                    "Value {} is not equal to {}",
                    inspect(value),
                    inspect(&self.expected)
                ),
                literal_type(&self.expected),
            ));
        }
        false
    }

    fn describe(&self) -> String {
        literal_type(&self.expected)
    }
}

/// Creates a validator accepting only `expected`, by SameValue equality.
///
/// ```rust
/// use shapeguard::validators::is;
/// use shapeguard::value::Value;
///
/// let zero = is(0);
/// assert!(zero.validate(&Value::from(0)));
/// assert!(!zero.validate(&Value::Number(-0.0)));
/// assert_eq!(zero.describe(), "0");
/// ```
#[must_use]
pub fn is(expected: impl Into<Value>) -> Validator {
    Validator::new(Is::new(expected))
}

// ============================================================================
// ENUM OF
// ============================================================================

/// Accepts values that are the same value as one of a fixed set of literals.
#[derive(Debug, Clone)]
pub struct EnumOf {
    // Keeps composite literals alive so their identity keys stay valid.
    literals: Vec<Value>,
    keys: HashSet<LiteralKey>,
}

impl EnumOf {
    pub fn new<I, T>(literals: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut keys = HashSet::new();
        let literals = literals
            .into_iter()
            .map(Into::<Value>::into)
            .filter(|literal| keys.insert(LiteralKey::of(literal)))
            .collect();
        Self { literals, keys }
    }

    pub fn literals(&self) -> &[Value] {
        &self.literals
    }
}

impl Validate for EnumOf {
    fn check(&self, value: &Value, sink: &mut dyn RejectionSink) -> bool {
        if self.keys.contains(&LiteralKey::of(value)) {
            return true;
        }
        if sink.is_collecting() {
            let accepted: Vec<String> = self.literals.iter().map(literal_type).collect();
            sink.reject(Rejection::new(
                format!(
                    "Value {} is not one of {}",
                    inspect(value),
                    accepted.join(", ")
                ),
                self.describe(),
            ));
        }
        false
    }

    fn describe(&self) -> String {
        if self.literals.is_empty() {
            return "X (never)".to_owned();
        }
        join_types(self.literals.iter().map(literal_type).collect(), " | ")
    }
}

/// Creates a validator accepting any of `literals`, by SameValue equality.
///
/// Membership is a hash lookup. Duplicate literals are ignored.
#[must_use]
pub fn enum_of<I, T>(literals: I) -> Validator
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Validator::new(EnumOf::new(literals))
}
