//! Property-based tests for shapeguard.

use proptest::prelude::*;
use shapeguard::combinators::{
    all_of, any_of, array_of, maybe, object_of, object_of_with, record_of, tagged_union_of,
    tuple_of, with_recursion,
};
use shapeguard::foundation::{Rejection, Validator};
use shapeguard::validators::{
    bigint, boolean, enum_of, is, is_empty_array, is_empty_object, never, null, number, string,
    undefined,
};
use shapeguard::value::Value;

// ============================================================================
// STRATEGIES
// ============================================================================

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        proptest::bool::ANY.prop_map(Value::from),
        (-100.0..100.0_f64).prop_map(Value::from),
        (0_i32..4).prop_map(Value::from),
        "[a-c]{0,3}".prop_map(Value::from),
        (-5_i64..5).prop_map(|n| Value::BigInt(n.into())),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            proptest::collection::vec(("[a-c]|kind|0", inner), 0..4)
                .prop_map(|entries| Value::object(entries)),
        ]
    })
}

fn pool() -> Vec<Validator> {
    vec![
        string(),
        number(),
        boolean(),
        bigint(),
        null(),
        undefined(),
        never(),
        is("a"),
        enum_of(["a", "b", "kind"]),
        is_empty_array(),
        is_empty_object(),
        maybe(number()),
        array_of(number()),
        array_of(maybe(string())),
        record_of(string()),
        object_of([("a", number())]).into(),
        object_of_with([("a", string()), ("b", maybe(number()))], true).into(),
        object_of([("kind", object_of([("a", boolean())]))]).strict().into(),
        tuple_of([string(), number()]).into(),
        tagged_union_of("kind", [("a", record_of(string())), ("b", record_of(number()))]).into(),
        with_recursion(|node| record_of(any_of([string(), node]))).into(),
        with_recursion(|node| array_of(any_of([number(), node])))
            .set_max_depth(2)
            .into(),
    ]
}

fn pick() -> impl Strategy<Value = usize> {
    0..pool().len()
}

// ============================================================================
// COMBINATOR LAWS
// ============================================================================

proptest! {
    #[test]
    fn all_of_is_commutative_in_verdict(a in pick(), b in pick(), x in value()) {
        let pool = pool();
        let ab = all_of([&pool[a], &pool[b]]);
        let ba = all_of([&pool[b], &pool[a]]);
        prop_assert_eq!(ab.validate(&x), ba.validate(&x));
    }

    #[test]
    fn all_of_accepts_iff_every_branch_accepts(a in pick(), b in pick(), x in value()) {
        let pool = pool();
        let both = all_of([&pool[a], &pool[b]]);
        prop_assert_eq!(both.validate(&x), pool[a].validate(&x) && pool[b].validate(&x));
    }

    #[test]
    fn any_of_accepts_iff_some_branch_accepts(a in pick(), b in pick(), x in value()) {
        let pool = pool();
        let either = any_of([&pool[a], &pool[b]]);
        prop_assert_eq!(either.validate(&x), pool[a].validate(&x) || pool[b].validate(&x));
    }

    #[test]
    fn strict_never_accepts_more(v in pick(), x in value()) {
        let pool = pool();
        let validator = &pool[v];
        if validator.strict().validate(&x) {
            prop_assert!(validator.unstrict().validate(&x));
        }
    }
}

// ============================================================================
// SINK PARITY: the verdict never depends on the sink
// ============================================================================

proptest! {
    #[test]
    fn verdict_is_independent_of_sink(v in pick(), x in value()) {
        let pool = pool();
        let validator = &pool[v];
        let mut calls = 0_usize;
        let counted = validator.validate_with(&x, &mut |_: Rejection| calls += 1);
        let discarded = validator.validate(&x);

        prop_assert_eq!(counted, discarded);
        prop_assert_eq!(validator.collect(&x).is_ok(), discarded);
        prop_assert_eq!(calls == 0, discarded);
    }

    #[test]
    fn composites_report_iff_they_fail(a in pick(), b in pick(), x in value()) {
        let pool = pool();
        for validator in [
            all_of([&pool[a], &pool[b]]),
            any_of([&pool[a], &pool[b]]),
            array_of(&pool[a]),
            maybe(&pool[b]),
            object_of([("a", &pool[a]), ("b", &pool[b])]).into(),
        ] {
            match validator.collect(&x) {
                Ok(()) => prop_assert!(validator.validate(&x)),
                Err(rejections) => {
                    prop_assert!(!validator.validate(&x));
                    prop_assert!(!rejections.is_empty());
                }
            }
        }
    }

    #[test]
    fn validation_is_idempotent(v in pick(), x in value()) {
        let pool = pool();
        let validator = &pool[v];
        prop_assert_eq!(validator.collect(&x), validator.collect(&x));
    }
}
