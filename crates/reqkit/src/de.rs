//! Case-insensitive JSON field matching.
//!
//! A thin [`serde::Deserializer`] over [`serde_json::Value`] that remaps
//! object keys to a struct's declared field names when they match ASCII
//! case-insensitively. Remapping happens only at struct boundaries, so
//! map-typed fields keep their keys untouched. ASCII comparison keeps the
//! behavior locale-invariant.

use serde::de::{self, DeserializeSeed, IntoDeserializer, MapAccess, SeqAccess, Visitor};
use serde::de::DeserializeOwned;
use serde::Deserializer;
use serde_json::Value;

/// Deserializes a JSON value into `T`, matching object keys against `T`'s
/// field names ASCII case-insensitively.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct CreateUser {
///     name: String,
///     user_name: String,
/// }
///
/// let value = json!({"Name": "Alice", "USER_NAME": "alice01"});
/// let user: CreateUser = reqkit::from_value_case_insensitive(value).unwrap();
/// assert_eq!(user.name, "Alice");
/// assert_eq!(user.user_name, "alice01");
/// ```
///
/// # Errors
///
/// Returns the underlying `serde_json` error when the value does not
/// conform to `T`'s shape.
pub fn from_value_case_insensitive<T: DeserializeOwned>(
    value: Value,
) -> Result<T, serde_json::Error> {
    T::deserialize(CaseInsensitive(value))
}

struct CaseInsensitive(Value);

impl<'de> Deserializer<'de> for CaseInsensitive {
    type Error = serde_json::Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.0 {
            Value::Object(map) => visitor.visit_map(CiMap::new(map.into_iter().collect())),
            Value::Array(items) => visitor.visit_seq(CiSeq::new(items)),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        if self.0.is_null() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.0 {
            Value::Array(items) => visitor.visit_seq(CiSeq::new(items)),
            other => other.deserialize_seq(visitor),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        // Plain maps keep their keys verbatim; only struct fields remap.
        match self.0 {
            Value::Object(map) => visitor.visit_map(CiMap::new(map.into_iter().collect())),
            other => other.deserialize_map(visitor),
        }
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.0 {
            Value::Object(map) => {
                // Keys differing only in case remap to the same field;
                // the later entry wins rather than tripping serde's
                // duplicate-field check.
                let mut entries: Vec<(String, Value)> = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let key = fields
                        .iter()
                        .find(|field| field.eq_ignore_ascii_case(&key))
                        .map_or(key, |field| (*field).to_string());
                    if let Some(entry) = entries.iter_mut().find(|(seen, _)| *seen == key) {
                        entry.1 = value;
                    } else {
                        entries.push((key, value));
                    }
                }
                visitor.visit_map(CiMap::new(entries))
            }
            other => other.deserialize_struct(name, fields, visitor),
        }
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        // Enum payloads keep plain serde_json semantics.
        self.0.deserialize_enum(name, variants, visitor)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct identifier ignored_any
    }
}

struct CiMap {
    entries: std::vec::IntoIter<(String, Value)>,
    value: Option<Value>,
}

impl CiMap {
    fn new(entries: Vec<(String, Value)>) -> Self {
        Self {
            entries: entries.into_iter(),
            value: None,
        }
    }
}

impl<'de> MapAccess<'de> for CiMap {
    type Error = serde_json::Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<S>(&mut self, seed: S) -> Result<S::Value, Self::Error>
    where
        S: DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(CaseInsensitive(value)),
            None => Err(de::Error::custom("value requested before key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

struct CiSeq {
    items: std::vec::IntoIter<Value>,
}

impl CiSeq {
    fn new(items: Vec<Value>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }
}

impl<'de> SeqAccess<'de> for CiSeq {
    type Error = serde_json::Error;

    fn next_element_seed<S>(&mut self, seed: S) -> Result<Option<S::Value>, Self::Error>
    where
        S: DeserializeSeed<'de>,
    {
        match self.items.next() {
            Some(value) => seed.deserialize(CaseInsensitive(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Inner {
        count: i64,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Outer {
        name: String,
        inner: Inner,
        tags: Vec<String>,
    }

    #[test]
    fn test_exact_keys_still_match() {
        let value = json!({"name": "a", "inner": {"count": 1}, "tags": []});

        let outer: Outer = from_value_case_insensitive(value).unwrap();
        assert_eq!(outer.name, "a");
        assert_eq!(outer.inner.count, 1);
    }

    #[test]
    fn test_mixed_case_keys_match() {
        let value = json!({"Name": "a", "INNER": {"Count": 2}, "Tags": ["x"]});

        let outer: Outer = from_value_case_insensitive(value).unwrap();
        assert_eq!(outer.inner.count, 2);
        assert_eq!(outer.tags, vec!["x"]);
    }

    #[test]
    fn test_duplicate_keys_differing_in_case_take_last() {
        #[derive(Debug, Deserialize)]
        struct Dto {
            name: String,
        }

        // Object keys sort ascending, so "name" is visited after "Name".
        let value = json!({"Name": "first", "name": "second"});
        let dto: Dto = from_value_case_insensitive(value).unwrap();
        assert_eq!(dto.name, "second");
    }

    #[test]
    fn test_snake_case_fields_match_any_casing() {
        #[derive(Debug, Deserialize)]
        struct Dto {
            string_sample: String,
        }

        let value = json!({"String_Sample": "sdf"});
        let dto: Dto = from_value_case_insensitive(value).unwrap();
        assert_eq!(dto.string_sample, "sdf");
    }

    #[test]
    fn test_structs_nested_in_sequences() {
        let value = json!([{"Count": 1}, {"count": 2}]);

        let inners: Vec<Inner> = from_value_case_insensitive(value).unwrap();
        assert_eq!(inners, vec![Inner { count: 1 }, Inner { count: 2 }]);
    }

    #[test]
    fn test_map_keys_are_not_remapped() {
        #[derive(Debug, Deserialize)]
        struct WithMap {
            labels: HashMap<String, String>,
        }

        let value = json!({"Labels": {"ENV": "prod"}});
        let parsed: WithMap = from_value_case_insensitive(value).unwrap();

        // The struct field remapped, the map key did not.
        assert_eq!(parsed.labels.get("ENV").map(String::as_str), Some("prod"));
        assert!(!parsed.labels.contains_key("env"));
    }

    #[test]
    fn test_optional_fields() {
        #[derive(Debug, Deserialize)]
        struct Dto {
            required: String,
            #[serde(default)]
            optional: Option<i64>,
        }

        let value = json!({"REQUIRED": "v"});
        let dto: Dto = from_value_case_insensitive(value).unwrap();
        assert_eq!(dto.required, "v");
        assert_eq!(dto.optional, None);

        let value = json!({"Required": "v", "Optional": null});
        let dto: Dto = from_value_case_insensitive(value).unwrap();
        assert_eq!(dto.optional, None);
    }

    #[test]
    fn test_shape_mismatch_still_fails() {
        let value = json!({"name": 12, "inner": {"count": 1}, "tags": []});

        assert!(from_value_case_insensitive::<Outer>(value).is_err());
    }

    #[test]
    fn test_missing_field_still_fails() {
        let value = json!({"name": "a"});

        assert!(from_value_case_insensitive::<Outer>(value).is_err());
    }

    #[test]
    fn test_scalars_pass_through() {
        let n: i64 = from_value_case_insensitive(json!(42)).unwrap();
        assert_eq!(n, 42);

        let s: String = from_value_case_insensitive(json!("hi")).unwrap();
        assert_eq!(s, "hi");

        let f: f64 = from_value_case_insensitive(json!(1.5)).unwrap();
        assert!((f - 1.5).abs() < f64::EPSILON);
    }
}
