use super::*;

#[test]
fn decode_valid_json() {
    let value = decode_json(r#"{"name": "app", "count": 3}"#).unwrap();
    assert_eq!(value["name"], "app");
    assert_eq!(value["count"], 3);
}

#[test]
fn decode_malformed_json_fails() {
    let err = decode_json(r#"{"name": "#).unwrap_err();
    assert!(err.message.contains("invalid JSON"));
}

#[test]
fn duplicate_keys_detected() {
    let err = check_duplicate_keys(r#"{"a":1,"a":2}"#).unwrap_err();
    assert!(err.contains("duplicate key `a`"));
}

#[test]
fn distinct_keys_pass() {
    assert!(check_duplicate_keys(r#"{"a":1,"b":2}"#).is_ok());
}

#[test]
fn duplicate_keys_detected_in_nested_object() {
    let raw = r#"{"outer": {"x": true, "x": false}}"#;
    let err = check_duplicate_keys(raw).unwrap_err();
    assert!(err.contains("duplicate key `x`"));
}

#[test]
fn duplicate_keys_detected_inside_array_element() {
    let raw = r#"[{"k": 1}, {"k": 1, "k": 2}]"#;
    assert!(check_duplicate_keys(raw).is_err());
}

#[test]
fn same_key_in_sibling_objects_is_not_a_duplicate() {
    let raw = r#"{"a": {"k": 1}, "b": {"k": 2}}"#;
    assert!(check_duplicate_keys(raw).is_ok());
}

#[test]
fn scalars_and_arrays_pass_the_probe() {
    assert!(check_duplicate_keys("42").is_ok());
    assert!(check_duplicate_keys("[1, 2.5, \"s\", null, true]").is_ok());
}
