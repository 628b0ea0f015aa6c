//! Serde helpers for HTML form input
//!
//! Browsers submit every input, filled or not, so blank strings and stray
//! whitespace are normalized before validation sees them.

use serde::{Deserialize, Deserializer};

/// Deserialize a string with surrounding whitespace removed
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Deserialize an optional string, treating blank input as absent
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Input {
        #[serde(default, deserialize_with = "trimmed")]
        name: String,
        #[serde(default, deserialize_with = "blank_as_none")]
        note: Option<String>,
    }

    #[test]
    fn test_trims_and_blanks() {
        let input: Input = serde_urlencoded::from_str("name=++Bay+1++&note=+++").unwrap();
        assert_eq!(
            input,
            Input {
                name: "Bay 1".to_string(),
                note: None,
            }
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let input: Input = serde_urlencoded::from_str("").unwrap();
        assert_eq!(input.name, "");
        assert_eq!(input.note, None);
    }

    #[test]
    fn test_optional_value_kept_when_present() {
        let input: Input = serde_urlencoded::from_str("note=P-17").unwrap();
        assert_eq!(input.note.as_deref(), Some("P-17"));
    }
}
