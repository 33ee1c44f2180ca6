//! Partial-update field handling.
//!
//! An update body must tell an absent field (leave the column alone) apart
//! from an explicit `null` (clear the column). Nullable columns use
//! `Option<Option<T>>` fields deserialized through [`double_option`]:
//! absent stays `None`, `null` becomes `Some(None)`, a value becomes
//! `Some(Some(v))`. `#[serde(default)]` supplies the outer `None`.

use serde::{Deserialize, Deserializer};

pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "double_option")]
        resume: Option<Option<i64>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let b: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(b.resume, None);

        let b: Body = serde_json::from_str(r#"{"resume": null}"#).unwrap();
        assert_eq!(b.resume, Some(None));

        let b: Body = serde_json::from_str(r#"{"resume": 120}"#).unwrap();
        assert_eq!(b.resume, Some(Some(120)));
    }
}
