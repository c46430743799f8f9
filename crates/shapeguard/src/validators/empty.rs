//! Emptiness validators

use crate::leaf_validator;
use crate::render::inspect;
use crate::value::Value;

fn is_empty_array_value(value: &Value) -> bool {
    value.as_array().is_some_and(<[Value]>::is_empty)
}

fn is_empty_object_value(value: &Value) -> bool {
    value.as_object().is_some_and(|map| map.is_empty())
}

leaf_validator! {
    /// Accepts arrays without elements.
    pub IsEmptyArray => "[]";
    rule(value) { is_empty_array_value(value) }
    reason(value) {
        if value.is_array() {
            format!("Array {} is not empty", inspect(value))
        } else {
            format!("Value {} is not an array", inspect(value))
        }
    }
    fn is_empty_array();
}

leaf_validator! {
    /// Accepts objects without own properties.
    pub IsEmptyObject => "{}";
    rule(value) { is_empty_object_value(value) }
    reason(value) {
        if value.is_object() {
            format!("Object {} is not empty", inspect(value))
        } else {
            format!("Value {} is not an object", inspect(value))
        }
    }
    fn is_empty_object();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_array() {
        assert!(is_empty_array().validate(&Value::from(json!([]))));
        let rejections = is_empty_array().collect(&Value::from(json!([1]))).unwrap_err();
        assert_eq!(rejections.first().unwrap().reason, "Array <[ 1 ]> is not empty");
        let rejections = is_empty_array().collect(&Value::from(json!({}))).unwrap_err();
        assert_eq!(rejections.first().unwrap().reason, "Value <{}> is not an array");
    }

    #[test]
    fn empty_object() {
        assert!(is_empty_object().validate(&Value::from(json!({}))));
        assert!(!is_empty_object().validate(&Value::from(json!({ "a": 1 }))));
        assert!(!is_empty_object().validate(&Value::from(json!([]))));
        assert!(!is_empty_object().validate(&Value::Null));
        assert_eq!(is_empty_object().describe(), "{}");
    }
}
