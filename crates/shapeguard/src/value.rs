//! Dynamic value model
//!
//! Every validator classifies a [`Value`]. The model mirrors the runtime kinds
//! a loosely-typed host exposes: `undefined`, `null`, booleans, IEEE numbers,
//! big integers, strings, symbols, arrays and keyed objects.
//!
//! Arrays and objects are reference-counted. Cloning a `Value` shares the
//! allocation, and literal-equality checks compare composite values by
//! identity (see [`Value::same_value`]).
//!
//! # Examples
//!
//! ```rust
//! use shapeguard::value::Value;
//! use serde_json::json;
//!
//! let value = Value::from(json!({ "name": "ada", "tags": ["x"] }));
//! assert!(value.is_object());
//! assert!(value.get("missing").is_undefined());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

/// Ordered property map of an object value.
pub type Object = IndexMap<String, Value>;

static UNDEFINED: Value = Value::Undefined;
static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// VALUE
// ============================================================================

/// A dynamically-typed candidate value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absent value. Missing object properties read as `Undefined`.
    #[default]
    Undefined,
    /// The explicit null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An IEEE-754 double.
    Number(f64),
    /// An arbitrary-size integer (bounded to `i128` here).
    BigInt(i128),
    /// A string.
    String(String),
    /// A unique symbol.
    Symbol(Symbol),
    /// An ordered sequence, shared by reference.
    Array(Arc<Vec<Value>>),
    /// A keyed map, shared by reference.
    Object(Arc<Object>),
}

/// The runtime kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    BigInt,
    String,
    Symbol,
    Array,
    Object,
}

impl ValueKind {
    /// The lowercase name used in type descriptors.
    pub fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Builds an array value from any iterator of convertible items.
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Array(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Builds an object value from `(key, value)` pairs, keeping their order.
    pub fn object<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Value>,
    {
        Self::Object(Arc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }

    /// Returns the runtime kind of the value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::String(_) => ValueKind::String,
            Self::Symbol(_) => ValueKind::Symbol,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Reads an object property; anything absent reads as `Undefined`.
    pub fn get(&self, key: &str) -> &Value {
        self.as_object()
            .and_then(|map| map.get(key))
            .unwrap_or(&UNDEFINED)
    }

    /// SameValue equality.
    ///
    /// `NaN` equals `NaN`, `+0` and `-0` differ, symbols compare by id and
    /// arrays/objects compare by allocation identity.
    pub fn same_value(&self, other: &Value) -> bool {
        LiteralKey::of(self) == LiteralKey::of(other)
    }
}

// ============================================================================
// SYMBOL
// ============================================================================

/// A process-unique symbol with an optional description.
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Creates a fresh symbol distinct from every other symbol.
    pub fn new(description: Option<&str>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.map(Arc::from),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}

// ============================================================================
// LITERAL KEY
// ============================================================================

/// Hashable SameValue identity of a [`Value`].
///
/// Composite values are keyed by their allocation address, so a key is only
/// meaningful while the value it was taken from is alive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum LiteralKey {
    Undefined,
    Null,
    Bool(bool),
    Number(u64),
    BigInt(i128),
    String(String),
    Symbol(u64),
    Array(usize),
    Object(usize),
}

impl LiteralKey {
    pub(crate) fn of(value: &Value) -> Self {
        match value {
            Value::Undefined => Self::Undefined,
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) if n.is_nan() => Self::Number(f64::NAN.to_bits()),
            Value::Number(n) => Self::Number(n.to_bits()),
            Value::BigInt(n) => Self::BigInt(*n),
            Value::String(s) => Self::String(s.clone()),
            Value::Symbol(sym) => Self::Symbol(sym.id),
            Value::Array(items) => Self::Array(Arc::as_ptr(items) as usize),
            Value::Object(map) => Self::Object(Arc::as_ptr(map) as usize),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(Arc::new(items))
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Self::Object(Arc::new(map))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::array(items),
            serde_json::Value::Object(map) => Self::object(map),
        }
    }
}
