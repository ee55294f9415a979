//! Serde helpers for the JSON boundary
//!
//! Row identifiers are `i64` in storage but travel as decimal strings, so a
//! JavaScript client never rounds them through a double. Inbound payloads come
//! from web forms and may carry numbers as strings (or strings as numbers);
//! the lenient helpers below accept both.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

/// Identifier accepted as a JSON string or integer.
///
/// Blank strings and null decode to `None`; web forms send `""` for "no id".
struct FlexibleId(Option<i64>);

impl<'de> Deserialize<'de> for FlexibleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FlexibleIdVisitor;

        impl<'de> Visitor<'de> for FlexibleIdVisitor {
            type Value = FlexibleId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer id or its decimal string")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexibleId(Some(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(|id| FlexibleId(Some(id)))
                    .map_err(|_| E::custom(format!("id out of range: {value}")))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Ok(FlexibleId(None));
                }
                trimmed
                    .parse::<i64>()
                    .map(|id| FlexibleId(Some(id)))
                    .map_err(|_| E::custom(format!("invalid id: {value}")))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexibleId(None))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexibleId(None))
            }
        }

        deserializer.deserialize_any(FlexibleIdVisitor)
    }
}

/// `i64` identifier serialized as its decimal string
pub mod id_string {
    use super::*;

    pub fn serialize<S>(id: &i64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(id)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        FlexibleId::deserialize(d)?
            .0
            .ok_or_else(|| <D::Error as de::Error>::custom("missing id"))
    }
}

/// `Option<i64>` identifier serialized as its decimal string (or null)
pub mod option_id_string {
    use super::*;

    pub fn serialize<S>(id: &Option<i64>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => s.collect_str(id),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        FlexibleId::deserialize(d).map(|id| id.0)
    }
}

/// Deserialize a string or number into its trimmed textual form.
///
/// Blank strings and null become `None`, so "absent" and "empty" look the same
/// to the validator.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, a number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let trimmed = value.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

/// Deserialize a yes/no flag that treats null as false.
///
/// Accepts JSON booleans and the strings "yes"/"no"/"true"/"false".
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean, \"yes\"/\"no\" or null")
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            match value.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" => Ok(true),
                "no" | "false" | "" => Ok(false),
                other => Err(E::custom(format!("invalid flag: {other}"))),
            }
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(false)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(false)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "id_string")]
        id: i64,
        #[serde(default, with = "option_id_string")]
        parent_id: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "string_or_number")]
        amount: Option<String>,
        #[serde(default, deserialize_with = "bool_false")]
        flag: bool,
    }

    #[test]
    fn test_id_serializes_as_string_without_precision_loss() {
        let id = (1_i64 << 62) + 7;
        let json = serde_json::to_value(Row { id, parent_id: Some(id - 1) }).unwrap();

        assert_eq!(json["id"], serde_json::Value::String(id.to_string()));
        let parsed: i64 = json["id"].as_str().unwrap().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(json["parent_id"], (id - 1).to_string());
    }

    #[test]
    fn test_id_accepts_string_or_number() {
        let a: Row = serde_json::from_str(r#"{"id":"9007199254740993"}"#).unwrap();
        assert_eq!(a.id, 9_007_199_254_740_993);
        assert_eq!(a.parent_id, None);

        let b: Row = serde_json::from_str(r#"{"id":42,"parent_id":"7"}"#).unwrap();
        assert_eq!(b.id, 42);
        assert_eq!(b.parent_id, Some(7));

        assert!(serde_json::from_str::<Row>(r#"{"id":"abc"}"#).is_err());
    }

    #[test]
    fn test_blank_optional_id_is_none() {
        for body in [
            r#"{"id":1,"parent_id":""}"#,
            r#"{"id":1,"parent_id":"  "}"#,
            r#"{"id":1,"parent_id":null}"#,
        ] {
            let row: Row = serde_json::from_str(body).unwrap();
            assert_eq!(row.parent_id, None, "{body}");
        }
    }

    #[test]
    fn test_blank_required_id_is_rejected() {
        assert!(serde_json::from_str::<Row>(r#"{"id":""}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"id":null}"#).is_err());
    }

    #[test]
    fn test_string_or_number() {
        let f: Form = serde_json::from_str(r#"{"amount":" 250.00 "}"#).unwrap();
        assert_eq!(f.amount.as_deref(), Some("250.00"));

        let f: Form = serde_json::from_str(r#"{"amount":12}"#).unwrap();
        assert_eq!(f.amount.as_deref(), Some("12"));

        let f: Form = serde_json::from_str(r#"{"amount":""}"#).unwrap();
        assert_eq!(f.amount, None);

        let f: Form = serde_json::from_str(r#"{"amount":null}"#).unwrap();
        assert_eq!(f.amount, None);
    }

    #[test]
    fn test_bool_false() {
        let f: Form = serde_json::from_str(r#"{"flag":"yes"}"#).unwrap();
        assert!(f.flag);

        let f: Form = serde_json::from_str(r#"{"flag":false}"#).unwrap();
        assert!(!f.flag);

        let f: Form = serde_json::from_str(r#"{"flag":null}"#).unwrap();
        assert!(!f.flag);

        let f: Form = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!f.flag);

        assert!(serde_json::from_str::<Form>(r#"{"flag":"maybe"}"#).is_err());
    }
}
