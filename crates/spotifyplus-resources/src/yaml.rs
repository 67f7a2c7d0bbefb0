//! YAML parsing where a repeated mapping key replaces the earlier entry
//!
//! `serde_yaml::Value` rejects duplicate keys. Response documents are
//! hand-edited and routinely carry a repeated key somewhere, which must not
//! hide every other response in the file.

use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};
use std::fmt;

/// Parse YAML text; the last occurrence of a duplicated key wins
pub(crate) fn from_str(content: &str) -> Result<Value, serde_yaml::Error> {
    let LastWins(value) = serde_yaml::from_str(content)?;
    Ok(value)
}

struct LastWins(Value);

impl<'de> Deserialize<'de> for LastWins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LastWinsVisitor).map(LastWins)
    }
}

struct LastWinsVisitor;

impl<'de> Visitor<'de> for LastWinsVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        LastWins::deserialize(deserializer).map(|LastWins(v)| v)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(LastWins(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mapping = Mapping::new();
        while let Some((LastWins(key), LastWins(value))) = map.next_entry()? {
            mapping.insert(key, value);
        }
        Ok(Value::Mapping(mapping))
    }

    fn visit_enum<A>(self, data: A) -> Result<Value, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (tag, variant): (String, _) = data.variant()?;
        let LastWins(value) = variant.newtype_variant()?;
        Ok(Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(tag),
            value,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_last_wins() {
        let value = from_str("greet: first\nother: x\nother: y\n").unwrap();
        assert_eq!(value["greet"], Value::from("first"));
        assert_eq!(value["other"], Value::from("y"));
        assert_eq!(value.as_mapping().map(Mapping::len), Some(2));
    }

    #[test]
    fn test_nested_duplicates() {
        let value = from_str("responses:\n  spotifyplus:\n    a: 1\n    a: 2\n  spotifyplus:\n    b: 3\n").unwrap();
        let platform = &value["responses"]["spotifyplus"];
        assert_eq!(platform["b"], Value::from(3));
        assert!(platform.get("a").is_none());
    }

    #[test]
    fn test_scalars_and_sequences() {
        let value = from_str("n: ~\nf: 1.5\nb: true\nlist: [1, two]\n").unwrap();
        assert!(value["n"].is_null());
        assert_eq!(value["f"].as_f64(), Some(1.5));
        assert_eq!(value["b"], Value::Bool(true));
        assert_eq!(value["list"][1], Value::from("two"));
    }

    #[test]
    fn test_tags_kept() {
        let value = from_str("path: !include other.yaml\n").unwrap();
        match &value["path"] {
            Value::Tagged(tagged) => {
                assert_eq!(tagged.tag, Tag::new("include"));
                assert_eq!(tagged.value, Value::from("other.yaml"));
            }
            other => panic!("expected tagged value, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_still_fails() {
        assert!(from_str("responses: [unclosed").is_err());
    }
}
