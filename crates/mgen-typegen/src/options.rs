//! Defensive decoding of per-language option bags.
//!
//! Option bags are schema-less JSON values. Decoding never fails: a bag that
//! is absent or not a mapping yields the defaults, and each recognized key
//! degrades to its own default independently of the others.

use serde_json::{Map, Value};

/// Strongly-typed generation options for one target language.
pub trait LanguageOptions: Default + Sized {
    /// Decode from a mapping. Implementations fall back per key.
    fn from_map(map: &Map<String, Value>) -> Self;

    /// Decode from an optional, loosely-typed bag.
    fn parse(bag: Option<&Value>) -> Self {
        match bag.and_then(Value::as_object) {
            Some(map) => Self::from_map(map),
            None => Self::default(),
        }
    }
}

/// A non-blank string value.
pub fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

/// A sequence whose elements are all strings. Any other element rejects the
/// whole sequence. An empty sequence is a valid value.
pub fn string_list_field(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    map.get(key)?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(String::from))
        .collect()
}

pub fn bool_field(map: &Map<String, Value>, key: &str) -> Option<bool> {
    map.get(key).and_then(Value::as_bool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Sample {
        name: String,
        tags: Vec<String>,
        flag: bool,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                name: "main".into(),
                tags: vec!["json".into()],
                flag: false,
            }
        }
    }

    impl LanguageOptions for Sample {
        fn from_map(map: &Map<String, Value>) -> Self {
            let defaults = Self::default();
            Self {
                name: string_field(map, "name").unwrap_or(defaults.name),
                tags: string_list_field(map, "tags").unwrap_or(defaults.tags),
                flag: bool_field(map, "flag").unwrap_or(defaults.flag),
            }
        }
    }

    #[test]
    fn absent_bag_defaults() {
        assert_eq!(Sample::parse(None), Sample::default());
    }

    #[test]
    fn non_mapping_bag_defaults() {
        for bag in [json!(null), json!("go"), json!(42), json!(["name"])] {
            assert_eq!(Sample::parse(Some(&bag)), Sample::default());
        }
    }

    #[test]
    fn full_bag_decodes() {
        let bag = json!({ "name": "schema", "tags": ["json", "yaml"], "flag": true });
        assert_eq!(
            Sample::parse(Some(&bag)),
            Sample {
                name: "schema".into(),
                tags: vec!["json".into(), "yaml".into()],
                flag: true,
            }
        );
    }

    #[test]
    fn fields_degrade_independently() {
        let bag = json!({ "name": "schema", "tags": "json" });
        let parsed = Sample::parse(Some(&bag));
        assert_eq!(parsed.name, "schema");
        assert_eq!(parsed.tags, ["json"]);

        let bag = json!({ "name": 7, "tags": ["yaml"], "flag": "yes" });
        let parsed = Sample::parse(Some(&bag));
        assert_eq!(parsed.name, "main");
        assert_eq!(parsed.tags, ["yaml"]);
        assert!(!parsed.flag);
    }

    #[test]
    fn mixed_list_rejected_as_a_whole() {
        let bag = json!({ "tags": ["json", 1, "yaml"] });
        assert_eq!(Sample::parse(Some(&bag)).tags, ["json"]);
    }

    #[test]
    fn empty_list_is_kept() {
        let bag = json!({ "tags": [] });
        assert!(Sample::parse(Some(&bag)).tags.is_empty());
    }

    #[test]
    fn blank_string_defaults() {
        let bag = json!({ "name": "  " });
        assert_eq!(Sample::parse(Some(&bag)).name, "main");
    }
}
