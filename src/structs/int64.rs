//! The api encodes int64 values as decimal strings. Some payloads (and older
//! client fixtures) carry plain JSON numbers instead, so both are accepted.
use serde::{Deserialize, Deserializer, Serializer};

/// Parses a decimal int64 string, giving `None` when the value is missing or
/// is not an integer. Statistics are legitimately unset while a job runs, so
/// absence means "unknown" rather than zero.
pub fn parse_int64(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInt64 {
    Number(i64),
    String(String),
    Other(serde::de::IgnoredAny),
}

pub fn serialize<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_str(&v.to_string()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawInt64> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawInt64::Number(v)) => Some(v),
        Some(RawInt64::String(s)) => parse_int64(Some(&s)),
        Some(RawInt64::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize)]
    struct Holder {
        #[serde(default, with = "crate::structs::int64", skip_serializing_if = "Option::is_none")]
        value: Option<i64>,
    }

    #[test]
    fn parse_int64_handles_garbage() {
        assert_eq!(parse_int64(Some("456789")), Some(456789));
        assert_eq!(parse_int64(Some("-12")), Some(-12));
        assert_eq!(parse_int64(Some("12.5")), None);
        assert_eq!(parse_int64(Some("not a number")), None);
        assert_eq!(parse_int64(Some("")), None);
        assert_eq!(parse_int64(None), None);
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let h: Holder = serde_json::from_str(r#"{"value": "456789"}"#).unwrap();
        assert_eq!(h.value, Some(456789));
        let h: Holder = serde_json::from_str(r#"{"value": 3}"#).unwrap();
        assert_eq!(h.value, Some(3));
        let h: Holder = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(h.value, None);
        let h: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(h.value, None);
        let h: Holder = serde_json::from_str(r#"{"value": "lots"}"#).unwrap();
        assert_eq!(h.value, None);
        let h: Holder = serde_json::from_str(r#"{"value": {"nested": [1, 2]}}"#).unwrap();
        assert_eq!(h.value, None);
        let h: Holder = serde_json::from_str(r#"{"value": [7]}"#).unwrap();
        assert_eq!(h.value, None);
    }

    #[test]
    fn serializes_as_string() {
        let s = serde_json::to_string(&Holder { value: Some(42) }).unwrap();
        assert_eq!(s, r#"{"value":"42"}"#);
        let s = serde_json::to_string(&Holder { value: None }).unwrap();
        assert_eq!(s, "{}");
    }
}
