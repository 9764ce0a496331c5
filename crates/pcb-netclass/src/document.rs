//! Raw configuration document
//!
//! The rule sections are read entry by entry rather than into a
//! `serde_yaml::Mapping`, so a rule id declared twice survives parsing and is
//! reported by the validator together with every other violation.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;

pub const CLASSIFICATION_RULES: &str = "net_classification_rules";
pub const LAYOUT_RULES: &str = "layout_rules";
pub const DEFAULTS: &str = "defaults";

/// A keyed rule section as written in the document
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Section {
    /// Key absent from the document
    #[default]
    Missing,
    /// Key present without a value (`layout_rules:`)
    Empty,
    /// Entries in declaration order, duplicate keys included
    Entries(Vec<(Value, Value)>),
    /// Present but not a mapping
    Invalid,
}

/// Parsed but not yet validated configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    is_mapping: bool,
    defaults: Option<Value>,
    classification_rules: Section,
    layout_rules: Section,
    duplicate_sections: Vec<String>,
}

impl Document {
    /// False when the document root is a scalar, a sequence or empty
    pub fn is_mapping(&self) -> bool {
        self.is_mapping
    }

    pub fn defaults(&self) -> Option<&Value> {
        self.defaults.as_ref()
    }

    pub fn classification_rules(&self) -> &Section {
        &self.classification_rules
    }

    pub fn layout_rules(&self) -> &Section {
        &self.layout_rules
    }

    /// Known section names that appear more than once at the root
    pub fn duplicate_sections(&self) -> &[String] {
        &self.duplicate_sections
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SectionVisitor)
    }
}

struct SectionVisitor;

impl<'de> Visitor<'de> for SectionVisitor {
    type Value = Section;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of rules")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Section, A::Error> {
        let mut entries = Vec::new();
        while let Some(entry) = map.next_entry::<Value, Value>()? {
            entries.push(entry);
        }
        Ok(Section::Entries(entries))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Section, E> {
        Ok(Section::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<Section, E> {
        Ok(Section::Empty)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Section, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Section::Invalid)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Section, E> {
        Ok(Section::Invalid)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Section, E> {
        Ok(Section::Invalid)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Section, E> {
        Ok(Section::Invalid)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Section, E> {
        Ok(Section::Invalid)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Section, E> {
        Ok(Section::Invalid)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a configuration document")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
        let mut doc = Document {
            is_mapping: true,
            ..Document::default()
        };
        let mut seen = Vec::new();

        while let Some(key) = map.next_key::<Value>()? {
            let name = match key.as_str() {
                Some(DEFAULTS) => DEFAULTS,
                Some(CLASSIFICATION_RULES) => CLASSIFICATION_RULES,
                Some(LAYOUT_RULES) => LAYOUT_RULES,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            if seen.contains(&name) && !doc.duplicate_sections.iter().any(|d| d.as_str() == name) {
                doc.duplicate_sections.push(name.to_string());
            }
            seen.push(name);

            match name {
                DEFAULTS => doc.defaults = Some(map.next_value()?),
                CLASSIFICATION_RULES => doc.classification_rules = map.next_value()?,
                _ => doc.layout_rules = map.next_value()?,
            }
        }

        Ok(doc)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::default())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Document, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Document::default())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Document, E> {
        Ok(Document::default())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Document, E> {
        Ok(Document::default())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Document, E> {
        Ok(Document::default())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Document, E> {
        Ok(Document::default())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Document, E> {
        Ok(Document::default())
    }
}
