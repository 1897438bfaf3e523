use std::collections::HashSet;
use std::fmt;

use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};

use super::DecodeError;

/// Decode a JSON document into a `serde_json::Value`.
///
/// # Errors
/// Returns a `DecodeError` carrying the parser's message on malformed syntax.
pub fn decode_json(raw: &str) -> Result<serde_json::Value, DecodeError> {
    serde_json::from_str(raw).map_err(|e| DecodeError::new(format!("invalid JSON: {e}")))
}

/// Check a JSON document for repeated keys within one object.
///
/// `Value` parsing silently keeps the last occurrence of a duplicated key,
/// so this runs a second pass that observes every key as it streams by.
///
/// # Errors
/// Returns the first repeated key as an error message.
pub fn check_duplicate_keys(raw: &str) -> Result<(), String> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    DuplicateKeyProbe
        .deserialize(&mut deserializer)
        .map_err(|e| e.to_string())
}

/// Drives the deserializer without building a value, tracking the keys seen
/// inside each object.
struct DuplicateKeyProbe;

impl<'de> DeserializeSeed<'de> for DuplicateKeyProbe {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for DuplicateKeyProbe {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E>(self, _v: bool) -> Result<(), E>
    where
        E: de::Error,
    {
        Ok(())
    }

    fn visit_i64<E>(self, _v: i64) -> Result<(), E>
    where
        E: de::Error,
    {
        Ok(())
    }

    fn visit_u64<E>(self, _v: u64) -> Result<(), E>
    where
        E: de::Error,
    {
        Ok(())
    }

    fn visit_f64<E>(self, _v: f64) -> Result<(), E>
    where
        E: de::Error,
    {
        Ok(())
    }

    fn visit_str<E>(self, _v: &str) -> Result<(), E>
    where
        E: de::Error,
    {
        Ok(())
    }

    fn visit_unit<E>(self) -> Result<(), E>
    where
        E: de::Error,
    {
        Ok(())
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element_seed(DuplicateKeyProbe)?.is_some() {}
        Ok(())
    }

    fn visit_map<A>(self, mut map: A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            if !seen.insert(key.clone()) {
                return Err(de::Error::custom(format!("duplicate key `{key}`")));
            }
            map.next_value_seed(DuplicateKeyProbe)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
