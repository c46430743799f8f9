//! Primitive-kind validators
//!
//! Each factory returns a shared handle: `string().ptr_eq(&string())`.

use std::sync::LazyLock;

use crate::combinators::{maybe, maybe_or_null};
use crate::foundation::Validator;
use crate::leaf_validator;
use crate::render::inspect;
use crate::value::{Value, ValueKind};

fn not_a(value: &Value, kind: ValueKind) -> String {
    format!("Value {} is not a {kind}", inspect(value))
}

leaf_validator! {
    /// Accepts strings.
    pub IsString => "string";
    rule(value) { value.kind() == ValueKind::String }
    reason(value) { not_a(value, ValueKind::String) }
    fn string();
}

leaf_validator! {
    /// Accepts numbers, including `NaN` and infinities.
    pub IsNumber => "number";
    rule(value) { value.kind() == ValueKind::Number }
    reason(value) { not_a(value, ValueKind::Number) }
    fn number();
}

leaf_validator! {
    /// Accepts booleans.
    pub IsBoolean => "boolean";
    rule(value) { value.kind() == ValueKind::Boolean }
    reason(value) { not_a(value, ValueKind::Boolean) }
    fn boolean();
}

leaf_validator! {
    /// Accepts symbols.
    pub IsSymbol => "symbol";
    rule(value) { value.kind() == ValueKind::Symbol }
    reason(value) { not_a(value, ValueKind::Symbol) }
    fn symbol();
}

leaf_validator! {
    /// Accepts big integers.
    pub IsBigInt => "bigint";
    rule(value) { value.kind() == ValueKind::BigInt }
    reason(value) { not_a(value, ValueKind::BigInt) }
    fn bigint();
}

leaf_validator! {
    /// Accepts only `null`.
    pub IsNull => "null";
    rule(value) { value.is_null() }
    reason(value) { format!("Value {} is not <null>", inspect(value)) }
    fn null();
}

leaf_validator! {
    /// Accepts only `undefined`.
    pub IsUndefined => "undefined";
    rule(value) { value.is_undefined() }
    reason(value) { format!("Value {} is not <undefined>", inspect(value)) }
    fn undefined();
}

leaf_validator! {
    /// Accepts every value.
    pub IsAny => "*";
    rule(value) { true }
    reason(value) { String::new() }
    fn any();
}

leaf_validator! {
    /// Rejects every value.
    pub IsNever => "X (never)";
    rule(value) { false }
    reason(value) { format!("Value {} exists therefore is not 'never'", inspect(value)) }
    fn never();
}

/// Alias of [`any`].
#[must_use]
pub fn unknown() -> Validator {
    any()
}

macro_rules! shared {
    ($(#[$meta:meta])* $factory:ident = $build:expr) => {
        $(#[$meta])*
        #[must_use]
        pub fn $factory() -> Validator {
            static SHARED: LazyLock<Validator> = LazyLock::new(|| $build);
            SHARED.clone()
        }
    };
}

shared!(
    /// `string` or `undefined`.
    maybe_string = maybe(string())
);
shared!(
    /// `number` or `undefined`.
    maybe_number = maybe(number())
);
shared!(
    /// `boolean` or `undefined`.
    maybe_boolean = maybe(boolean())
);
shared!(
    /// `symbol` or `undefined`.
    maybe_symbol = maybe(symbol())
);
shared!(
    /// `bigint` or `undefined`.
    maybe_bigint = maybe(bigint())
);
shared!(
    /// `null` or `undefined`.
    null_or_undefined = maybe(null())
);
shared!(
    /// `string`, `null` or `undefined`.
    nullable_string = maybe_or_null(string())
);
