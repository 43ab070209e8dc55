//! Shared types that mirror the term-bank dictionary format.
//!
//! A term bank is a single JSON array whose elements are fixed 8-slot
//! positional arrays, one per dictionary entry. [`DictionaryEntry`] gives
//! those slots names and keeps the wire shape intact through a tuple-based
//! serde implementation: field order and count survive a round trip, and
//! only the `definitions` slot is ever rewritten by higher-level tooling.
//!
//! ```rust
//! use termbank_types::{Definition, DictionaryEntry};
//!
//! let raw = r#"["lisant","",null,"v",12.0,["gerund of {lire}(->lire)"],41,""]"#;
//! let entry: DictionaryEntry = serde_json::from_str(raw).unwrap();
//! assert_eq!(entry.term, "lisant");
//! assert!(matches!(entry.definitions[0], Definition::Text(_)));
//! ```

use serde::de::Deserializer;
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};

/// Class-tag value marking an entry as an inflected form.
///
/// Any other tag value, including an absent tag, marks a lemma.
pub const NON_LEMMA_TAG: &str = "non-lemma";

/// One slot of an entry's `definitions` array.
///
/// Source banks carry plain strings with the inflection convention embedded
/// in free text; normalized banks carry [`DeinflectedForm`] objects instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Definition {
    Text(String),
    Deinflection(DeinflectedForm),
}

impl Definition {
    /// The definition's raw text, if it is still the plain-string variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Definition::Text(text) => Some(text),
            Definition::Deinflection(_) => None,
        }
    }
}

/// A resolved base form paired with its inflection rule tokens.
///
/// Serializes as `{"base": ..., "rules": [...]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeinflectedForm {
    pub base: String,
    pub rules: Vec<String>,
}

/// A term-bank entry with the positional slots named.
///
/// Wire order: term, reading, class tag, deinflection rule label, score,
/// definitions, sequence id, term tags. Everything except `definitions` is
/// opaque pass-through data for this toolkit.
#[derive(Clone, Debug, PartialEq)]
pub struct DictionaryEntry {
    pub term: String,
    pub reading: String,
    pub class_tag: Option<String>,
    pub deinflection_rule: String,
    pub score: f64,
    pub definitions: Vec<Definition>,
    pub sequence: i64,
    pub term_tags: String,
}

impl DictionaryEntry {
    /// Whether the class tag marks this entry as an inflected form.
    pub fn is_non_lemma(&self) -> bool {
        self.class_tag.as_deref() == Some(NON_LEMMA_TAG)
    }
}

impl Serialize for DictionaryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(8)?;
        tuple.serialize_element(&self.term)?;
        tuple.serialize_element(&self.reading)?;
        tuple.serialize_element(&self.class_tag)?;
        tuple.serialize_element(&self.deinflection_rule)?;
        tuple.serialize_element(&self.score)?;
        tuple.serialize_element(&self.definitions)?;
        tuple.serialize_element(&self.sequence)?;
        tuple.serialize_element(&self.term_tags)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for DictionaryEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        type Slots = (
            String,
            String,
            Option<String>,
            String,
            f64,
            Vec<Definition>,
            i64,
            String,
        );
        let (term, reading, class_tag, deinflection_rule, score, definitions, sequence, term_tags) =
            Slots::deserialize(deserializer)?;
        Ok(DictionaryEntry {
            term,
            reading,
            class_tag,
            deinflection_rule,
            score,
            definitions,
            sequence,
            term_tags,
        })
    }
}
