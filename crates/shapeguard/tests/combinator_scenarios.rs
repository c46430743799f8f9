//! End-to-end scenarios for leaves and combinators.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use shapeguard::combinators::current_depth;
use shapeguard::prelude::*;

fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn dotted(rejections: &Rejections) -> Vec<String> {
    rejections.iter().map(Rejection::dotted_path).collect()
}

// ============================================================================
// LEAVES
// ============================================================================

#[rstest]
#[case::string_accepts_text(string(), Value::from("a"), true)]
#[case::string_rejects_number(string(), Value::from(1), false)]
#[case::number_accepts_nan(number(), Value::from(f64::NAN), true)]
#[case::number_rejects_bigint(number(), Value::BigInt(1), false)]
#[case::bigint_accepts_bigint(bigint(), Value::BigInt(-3), true)]
#[case::boolean_rejects_string(boolean(), Value::from("true"), false)]
#[case::symbol_accepts_symbol(symbol(), Value::from(Symbol::new(Some("s"))), true)]
#[case::null_rejects_undefined(null(), Value::Undefined, false)]
#[case::undefined_accepts_undefined(undefined(), Value::Undefined, true)]
#[case::any_accepts_undefined(any(), Value::Undefined, true)]
#[case::never_rejects_null(never(), Value::Null, false)]
#[case::literal_distinguishes_signed_zero(is(0), Value::Number(-0.0), false)]
#[case::literal_matches_nan(is(f64::NAN), Value::from(f64::NAN), true)]
#[case::enum_hits(enum_of(["a", "b"]), Value::from("b"), true)]
#[case::empty_enum_rejects(enum_of(Vec::<Value>::new()), Value::from("a"), false)]
#[case::empty_array(is_empty_array(), value(json!([])), true)]
#[case::non_empty_array(is_empty_array(), value(json!([1])), false)]
#[case::empty_object(is_empty_object(), value(json!({})), true)]
#[case::array_is_not_empty_object(is_empty_object(), value(json!([])), false)]
fn leaf_verdicts(#[case] validator: Validator, #[case] input: Value, #[case] expected: bool) {
    assert_eq!(validator.validate(&input), expected);

    let collected = validator.collect(&input);
    assert_eq!(collected.is_ok(), expected);
    if let Err(rejections) = collected {
        assert_eq!(rejections.len(), 1);
        assert!(rejections.first().is_some_and(|r| r.path.is_empty()));
    }
}

#[test]
fn leaf_rejection_carries_descriptor() {
    let rejections = number().collect(&Value::from("5")).unwrap_err();
    let rejection = rejections.first().unwrap();
    assert_eq!(rejection.reason, "Value <'5'> is not a number");
    assert_eq!(rejection.property_type, "number");
    assert_eq!(rejection.to_string(), "Value <'5'> is not a number (expected number)");
}

// ============================================================================
// COLLECTIONS
// ============================================================================

#[test]
fn array_rejection_points_at_the_element() {
    let rejections = array_of(string())
        .collect(&value(json!(["a", "b", 3])))
        .unwrap_err();
    assert_eq!(rejections.len(), 1);
    let rejection = rejections.first().unwrap();
    assert_eq!(rejection.path.as_slice(), [PathKey::Index(2)]);
    assert_eq!(rejection.reason, "Value <3> is not a string");
}

#[test]
fn nested_paths_render_outermost_first() {
    let order = object_of([(
        "items",
        array_of(object_of([("sku", string()), ("count", number())])),
    )]);
    let rejections = order
        .collect(&value(json!({ "items": [{ "sku": "a", "count": 1 }, { "sku": 2, "count": 1 }] })))
        .unwrap_err();
    assert_eq!(dotted(&rejections), ["items.1.sku"]);
}

// ============================================================================
// STRICTNESS
// ============================================================================

#[test]
fn strict_objects_reject_redundant_keys() {
    let input = value(json!({ "a": 1, "extra": true }));
    let loose = object_of([("a", number())]);
    let strict = object_of_with([("a", number())], true);

    assert!(loose.validate(&input));
    assert!(!strict.validate(&input));

    let rejections = strict.collect(&input).unwrap_err();
    assert_eq!(dotted(&rejections), ["extra"]);
    assert_eq!(
        rejections.first().unwrap().reason,
        "Object has redundant key <'extra'>, and failed strict validation"
    );
}

#[test]
fn strict_transform_reaches_nested_objects() {
    let shape = object_of([("inner", object_of([("x", number())]))]);
    let input = value(json!({ "inner": { "x": 1, "y": 2 } }));

    let strict = shape.strict();
    assert!(!strict.validate(&input));
    assert_eq!(dotted(&strict.collect(&input).unwrap_err()), ["inner.y"]);

    assert!(shape.validate(&input));
    assert!(!shape.is_strict());
}

#[test]
fn strict_transform_passes_through_combinators() {
    let shape = array_of(maybe(any_of([string(), object_of([("x", number())]).into()])));
    let input = value(json!(["a", { "x": 1, "y": 2 }]));
    assert!(shape.validate(&input));
    assert!(!shape.strict().validate(&input));
    assert!(shape.strict().unstrict().validate(&input));
}

#[test]
fn locked_validators_ignore_bulk_rewrites() {
    let locked = object_of_with([("x", number())], true).lock();
    let sibling = object_of_with([("y", number())], true);
    let outer = object_of([("locked", locked), ("sibling", sibling)]).strict();

    let input = value(json!({
        "locked": { "x": 1, "extra": 0 },
        "sibling": { "y": 1, "extra": 0 },
        "extra": 0,
    }));
    let relaxed = outer.unstrict();

    assert!(!relaxed.is_strict());
    let rejections = relaxed.collect(&input).unwrap_err();
    assert_eq!(dotted(&rejections), ["locked.extra"]);
}

#[test]
fn unlocking_requests_override_locks() {
    let locked = object_of_with([("x", number())], true).lock();
    let input = value(json!({ "x": 1, "extra": 0 }));

    let relaxed = locked.transform(&Transformation::Strictness(Strictness::UnstrictUnlocked));
    assert!(relaxed.validate(&input));
    assert!(!locked.validate(&input));
}

#[test]
fn strict_tuples_check_length() {
    let pair = tuple_of([string(), number()]);
    let input = value(json!(["a", 1, true]));

    let rejections = pair.collect(&input).unwrap_err();
    let rejection = rejections.first().unwrap();
    assert_eq!(dotted(&rejections), ["length"]);
    assert_eq!(rejection.reason, "Value <3> is not equal to <2>");
    assert!(pair.unstrict().validate(&input));
}

// ============================================================================
// TAGGED UNIONS
// ============================================================================

fn event() -> TaggedUnionValidator {
    tagged_union_of(
        "type",
        [
            ("click", object_of([("type", is("click")), ("x", number()), ("y", number())])),
            ("key", object_of([("type", is("key")), ("code", string())])),
        ],
    )
}

#[test]
fn tagged_union_dispatches_on_tag() {
    let union = event();
    assert!(union.validate(&value(json!({ "type": "click", "x": 1, "y": 2 }))));
    assert!(union.validate(&value(json!({ "type": "key", "code": "Enter" }))));
    assert!(!union.validate(&value(json!({ "type": "key", "x": 1, "y": 2 }))));
}

#[test]
fn unknown_tag_is_reported_once() {
    let rejections = event()
        .collect(&value(json!({ "type": "scroll" })))
        .unwrap_err();
    assert_eq!(rejections.len(), 1);
    assert!(rejections.first().unwrap().reason.contains("<'scroll'>"));
}

#[test]
fn branch_rejections_name_the_tag() {
    let rejections = event()
        .collect(&value(json!({ "type": "click", "x": 1, "y": "2" })))
        .unwrap_err();
    assert_eq!(dotted(&rejections), ["y"]);
    assert!(
        rejections
            .first()
            .unwrap()
            .reason
            .starts_with("Validation for tag <'click'> failed:\n")
    );
}

// ============================================================================
// RECURSION
// ============================================================================

fn tree() -> RecursiveValidator {
    with_recursion(|node| record_of(any_of([string(), node])))
}

#[test]
fn max_depth_reports_the_limit() {
    let limited = tree().set_max_depth(2);
    let deep = value(json!({ "key1": { "key2": { "key3": "s" } } }));

    assert!(limited.validate(&value(json!({ "key": "s" }))));
    let rejections = limited.collect(&deep).unwrap_err();
    assert_eq!(rejections.len(), 3);
    let limit = &rejections.as_slice()[1];
    assert_eq!(limit.reason, "Recursion max depth has reached at 2");
    assert_eq!(limit.dotted_path(), "key1.key2");
    assert_eq!(limit.property_type, limited.describe());
}

#[test]
fn skip_depth_accepts_everything_below_the_limit() {
    let pruned = tree().set_skip_depth(2);
    assert!(pruned.validate(&value(json!({ "key1": { "key2": { "key3": 5 } } }))));
    assert!(!pruned.validate(&value(json!({ "key1": 5 }))));
    assert!(!tree().validate(&value(json!({ "key1": { "key2": { "key3": 5 } } }))));
}

#[test]
fn depth_counter_survives_a_panicking_check() {
    let exploding = with_recursion(|node| {
        record_of(any_of([
            predicate(|value: &Value| {
                assert!(!value.is_null(), "null leaf");
                value.as_str().is_some()
            }),
            node,
        ]))
    });
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        exploding.validate(&value(json!({ "a": { "b": { "c": null } } })))
    }));
    assert!(result.is_err());
    assert_eq!(current_depth(), 0);

    let limited = tree().set_max_depth(2);
    let rejections = limited
        .collect(&value(json!({ "key1": { "key2": { "key3": "s" } } })))
        .unwrap_err();
    assert_eq!(rejections.len(), 3);
    assert_eq!(current_depth(), 0);
}

#[test]
fn recursive_shapes_accept_well_formed_trees() {
    let comment = with_recursion(|comment| {
        object_of([
            ("body", string()),
            ("replies", maybe(array_of(comment))),
        ])
    });
    let thread = value(json!({
        "body": "a",
        "replies": [{ "body": "b", "replies": [{ "body": "c" }] }],
    }));
    assert!(comment.validate(&thread));

    let broken = value(json!({ "body": "a", "replies": [{ "body": "b", "replies": [{}] }] }));
    let rejections = comment.collect(&broken).unwrap_err();
    assert!(dotted(&rejections).contains(&"replies.0.replies.0.body".to_owned()));
}

// ============================================================================
// ASSERTIONS
// ============================================================================

#[test]
fn assertion_error_lists_rejections() {
    let error = array_of(number())
        .assert(&value(json!([1, "x"])))
        .unwrap_err();
    assert_eq!(error.rejection_count(), 1);
    assert_eq!(
        error.to_string(),
        "value <[ 1, 'x' ]> is not of type ArrayOf(number)\n1: Value <'x'> is not a number (expected number)"
    );
}
