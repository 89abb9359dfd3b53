use serde::{Deserialize, Deserializer};

/// Deserializes an optional string field, mapping an empty string to `None`.
///
/// Used for optional request fields (e.g. the update-user password) where
/// clients send `""` to mean "not provided".
pub fn deserialize_empty_string_as_none<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "super::deserialize_empty_string_as_none")]
        value: Option<String>,
    }

    #[test]
    fn test_empty_string_becomes_none() {
        let w: Wrapper = serde_json::from_str(r#"{"value":""}"#).unwrap();
        assert_eq!(w.value, None);
    }

    #[test]
    fn test_missing_field_is_none() {
        let w: Wrapper = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(w.value, None);
    }

    #[test]
    fn test_value_passes_through() {
        let w: Wrapper = serde_json::from_str(r#"{"value":"secret"}"#).unwrap();
        assert_eq!(w.value, Some("secret".to_string()));
    }
}
