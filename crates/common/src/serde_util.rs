//! Serde helpers.

use serde::{Deserialize, Deserializer};

/// Deserializer distinguishing an absent field from an explicit `null`.
///
/// Plain serde collapses both into the outer `None` of an
/// `Option<Option<T>>`. Paired with `#[serde(default, deserialize_with =
/// "double_option")]`, a missing field stays `None` while `null` becomes
/// `Some(None)`, so partial-update inputs can clear a nullable column.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        display_name: Option<Option<String>>,
    }

    #[test]
    fn test_missing_field_is_outer_none() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.display_name, None);
    }

    #[test]
    fn test_explicit_null_clears_the_value() {
        let patch: Patch = serde_json::from_str(r#"{"displayName": null}"#).unwrap();
        assert_eq!(patch.display_name, Some(None));
    }

    #[test]
    fn test_value_is_fully_wrapped() {
        let patch: Patch = serde_json::from_str(r#"{"displayName": "Newsroom"}"#).unwrap();
        assert_eq!(patch.display_name, Some(Some("Newsroom".to_string())));
    }
}
