use serde_yaml::Value;

use super::DecodeError;

/// Decode a YAML document in safe mode.
///
/// `serde_yaml` never constructs arbitrary objects or executes code; on top
/// of that, any tagged node is rejected so documents relying on
/// decoder-specific construction fail instead of passing through unchecked.
///
/// # Errors
/// Returns a `DecodeError` on malformed syntax or when a tagged node is present.
pub fn decode_yaml(raw: &str) -> Result<Value, DecodeError> {
    let value: Value =
        serde_yaml::from_str(raw).map_err(|e| DecodeError::new(format!("invalid YAML: {e}")))?;

    if let Some(tag) = find_tag(&value) {
        return Err(DecodeError::new(format!("unsupported YAML tag `{tag}`")));
    }

    Ok(value)
}

fn find_tag(value: &Value) -> Option<String> {
    match value {
        Value::Tagged(tagged) => Some(tagged.tag.to_string()),
        Value::Sequence(seq) => seq.iter().find_map(find_tag),
        Value::Mapping(map) => map
            .iter()
            .find_map(|(key, val)| find_tag(key).or_else(|| find_tag(val))),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

#[cfg(test)]
#[path = "yaml_tests.rs"]
mod tests;
