use super::*;

#[test]
fn decode_valid_yaml() {
    let value = decode_yaml("name: app\nversion: 1.0.0\n").unwrap();
    assert_eq!(value["name"], "app");
}

#[test]
fn decode_malformed_yaml_fails() {
    let err = decode_yaml("items: [one, two\n").unwrap_err();
    assert!(err.message.contains("invalid YAML"));
}

#[test]
fn tagged_node_rejected() {
    let err = decode_yaml("payload: !construct foo\n").unwrap_err();
    assert!(err.message.contains("unsupported YAML tag"));
}

#[test]
fn nested_tagged_node_rejected() {
    let err = decode_yaml("steps:\n  - name: ok\n  - !exec rm\n").unwrap_err();
    assert!(err.message.contains("unsupported YAML tag"));
}

#[test]
fn plain_nested_structures_pass() {
    let value = decode_yaml("deps:\n  flutter:\n    sdk: flutter\n").unwrap();
    assert!(value["deps"]["flutter"]["sdk"].as_str() == Some("flutter"));
}
