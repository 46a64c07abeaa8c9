//! Localized text
//!
//! Every customer-facing text field carries a primary (`es`) and a
//! secondary (`en`) variant.

use crate::error::DocumentError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Display language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Primary language
    #[default]
    Es,
    /// Secondary language
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// The language used as fallback for this one
    pub fn other(&self) -> Language {
        match self {
            Language::Es => Language::En,
            Language::En => Language::Es,
        }
    }

    /// Flip between the two languages (the UI toggle)
    pub fn toggle(&mut self) {
        *self = self.other();
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = DocumentError;

    /// Case-insensitive, tolerant of region tags (`en-US`, `es_ES`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let base = normalized
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        match base {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            _ => Err(DocumentError::UnknownLanguage(s.to_string())),
        }
    }
}

/// How one variant appeared in the source document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Slot {
    #[default]
    Missing,
    Null,
    Text,
}

/// Shape a text was read in, so writing it back does not reshape it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Shape {
    /// Built in code, not read from a document
    #[default]
    New,
    Plain,
    Null,
    Variants { es: Slot, en: Slot },
}

/// Text with one variant per language
///
/// Deserializes from `{"es": "...", "en": "..."}`, a bare string (taken
/// as the primary variant) or `null`. Serialization reproduces the shape
/// that was read as long as the content still fits it; texts built in
/// code, or edited past their shape, are written as an object with both
/// variants.
#[derive(Debug, Clone, Default)]
pub struct LocalizedText {
    pub es: String,
    pub en: String,
    shape: Shape,
}

impl PartialEq for LocalizedText {
    fn eq(&self, other: &Self) -> bool {
        self.es == other.es && self.en == other.en
    }
}

impl Eq for LocalizedText {}

impl LocalizedText {
    pub fn new(es: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            es: es.into(),
            en: en.into(),
            shape: Shape::New,
        }
    }

    /// Variant for `lang`, without fallback
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Es => &self.es,
            Language::En => &self.en,
        }
    }

    /// Display text for `lang`
    ///
    /// Falls back to the other language when the requested variant is
    /// blank. Both blank yields `""`.
    pub fn resolve(&self, lang: Language) -> &str {
        let preferred = self.get(lang);
        if !preferred.trim().is_empty() {
            return preferred;
        }
        let fallback = self.get(lang.other());
        if !fallback.trim().is_empty() {
            return fallback;
        }
        ""
    }

    pub fn is_empty(&self) -> bool {
        self.es.trim().is_empty() && self.en.trim().is_empty()
    }

    /// Empty and not read from a document (the field was missing)
    pub fn is_absent(&self) -> bool {
        self.shape == Shape::New && self.es.is_empty() && self.en.is_empty()
    }
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<String>>, D::Error> {
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocalizedRepr {
    Plain(String),
    Variants {
        #[serde(default, deserialize_with = "present")]
        es: Option<Option<String>>,
        #[serde(default, deserialize_with = "present")]
        en: Option<Option<String>>,
    },
    Null,
}

fn slot(value: &Option<Option<String>>) -> Slot {
    match value {
        None => Slot::Missing,
        Some(None) => Slot::Null,
        Some(Some(_)) => Slot::Text,
    }
}

/// Entry to write for one variant: skipped, `null` or a string
fn entry(text: &str, slot: Slot) -> Option<Option<&str>> {
    if !text.is_empty() {
        return Some(Some(text));
    }
    match slot {
        Slot::Missing => None,
        Slot::Null => Some(None),
        Slot::Text => Some(Some(text)),
    }
}

impl Serialize for LocalizedText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (es_slot, en_slot) = match self.shape {
            Shape::Plain if self.en.is_empty() => return serializer.serialize_str(&self.es),
            Shape::Null if self.es.is_empty() && self.en.is_empty() => {
                return serializer.serialize_unit();
            }
            Shape::Variants { es, en } => (es, en),
            _ => (Slot::Text, Slot::Text),
        };

        let mut map = serializer.serialize_map(None)?;
        if let Some(value) = entry(&self.es, es_slot) {
            map.serialize_entry("es", &value)?;
        }
        if let Some(value) = entry(&self.en, en_slot) {
            map.serialize_entry("en", &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match LocalizedRepr::deserialize(deserializer)? {
            LocalizedRepr::Plain(es) => Self {
                es,
                en: String::new(),
                shape: Shape::Plain,
            },
            LocalizedRepr::Variants { es, en } => Self {
                shape: Shape::Variants {
                    es: slot(&es),
                    en: slot(&en),
                },
                es: es.flatten().unwrap_or_default(),
                en: en.flatten().unwrap_or_default(),
            },
            LocalizedRepr::Null => Self {
                shape: Shape::Null,
                ..Self::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_active_language() {
        let text = LocalizedText::new("Fresa", "Strawberry");
        assert_eq!(text.resolve(Language::Es), "Fresa");
        assert_eq!(text.resolve(Language::En), "Strawberry");
    }

    #[test]
    fn test_resolve_falls_back_to_other_language() {
        let text = LocalizedText::new("Fresa", "");
        assert_eq!(text.resolve(Language::En), "Fresa");

        let text = LocalizedText::new("  ", "Mint");
        assert_eq!(text.resolve(Language::Es), "Mint");
    }

    #[test]
    fn test_resolve_both_empty_is_empty_string() {
        let text = LocalizedText::default();
        assert_eq!(text.resolve(Language::Es), "");
        assert_eq!(text.resolve(Language::En), "");
        assert!(text.is_empty());
    }

    #[test]
    fn test_deserialize_plain_string_and_object() {
        let plain: LocalizedText = serde_json::from_str(r#""Limón""#).unwrap();
        assert_eq!(plain, LocalizedText::new("Limón", ""));

        let obj: LocalizedText = serde_json::from_str(r#"{"en": "Lemon"}"#).unwrap();
        assert_eq!(obj, LocalizedText::new("", "Lemon"));

        let null_variant: LocalizedText =
            serde_json::from_str(r#"{"es": null, "en": "Lemon"}"#).unwrap();
        assert_eq!(null_variant.resolve(Language::Es), "Lemon");

        let null: LocalizedText = serde_json::from_str("null").unwrap();
        assert!(null.is_empty());
    }

    #[test]
    fn test_new_text_serializes_as_object() {
        let text = serde_json::to_value(LocalizedText::new("Uva", "")).unwrap();
        assert_eq!(text, serde_json::json!({"es": "Uva", "en": ""}));
        assert!(LocalizedText::default().is_absent());
        assert!(!LocalizedText::new("Uva", "").is_absent());
    }

    #[test]
    fn test_read_shape_is_written_back() {
        for source in [
            serde_json::json!("Limón"),
            serde_json::json!(""),
            serde_json::json!(null),
            serde_json::json!({"es": "Fresa", "en": ""}),
            serde_json::json!({"en": "Lemon"}),
            serde_json::json!({"es": null, "en": "Lemon"}),
            serde_json::json!({}),
        ] {
            let text: LocalizedText = serde_json::from_value(source.clone()).unwrap();
            assert!(!text.is_absent());
            assert_eq!(serde_json::to_value(&text).unwrap(), source);
        }
    }

    #[test]
    fn test_edited_text_outgrows_plain_shape() {
        let mut text: LocalizedText = serde_json::from_str(r#""Uva""#).unwrap();
        text.en = "Grape".into();
        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            serde_json::json!({"es": "Uva", "en": "Grape"})
        );

        let mut text: LocalizedText = serde_json::from_str("null").unwrap();
        text.es = "Kiwi".into();
        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            serde_json::json!({"es": "Kiwi", "en": ""})
        );
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("EN-us".parse::<Language>().unwrap(), Language::En);
        assert_eq!("es_ES".parse::<Language>().unwrap(), Language::Es);
        assert!("fr".parse::<Language>().is_err());

        let mut lang = Language::Es;
        lang.toggle();
        assert_eq!(lang, Language::En);
    }
}
