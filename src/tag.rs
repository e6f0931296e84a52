//! Provenance of an entity: the source file(s) it was read from and their
//! descriptions.
use serde::{Deserialize, Serialize};
use std::fmt;

const SEPARATOR: &str = " + ";
/// Above this many sources a field is reported as a list instead of a joined string.
const MAX_JOINED: usize = 2;

/// How a tag field is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Zero, one or two sources, joined with `" + "`.
    Single(String),
    /// One entry per source, in merge order.
    Multiple(Vec<String>),
}

impl TagValue {
    fn from_parts(parts: &[String]) -> Self {
        if parts.len() > MAX_JOINED {
            TagValue::Multiple(parts.to_vec())
        } else {
            TagValue::Single(parts.join(SEPARATOR))
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Single(s) => f.write_str(s),
            TagValue::Multiple(v) => f.write_str(&v.join(SEPARATOR)),
        }
    }
}

impl PartialEq<str> for TagValue {
    fn eq(&self, other: &str) -> bool {
        matches!(self, TagValue::Single(s) if s == other)
    }
}

impl PartialEq<&str> for TagValue {
    fn eq(&self, other: &&str) -> bool {
        <TagValue as PartialEq<str>>::eq(self, other)
    }
}

/// Source files and descriptions an entity was built from.
///
/// File names and descriptions are deduplicated and counted separately, so
/// both fields can report a different number of entries. Three files sharing
/// one description give a `Multiple` file name but a `Single` description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    file_names: Vec<String>,
    descriptions: Vec<String>,
}

impl Tag {
    pub fn new(file_name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut tag = Self::default();
        push_unique(&mut tag.file_names, file_name.into());
        push_unique(&mut tag.descriptions, description.into());
        tag
    }

    /// True when no source file has been recorded.
    pub fn is_empty(&self) -> bool {
        self.file_names.is_empty()
    }

    pub fn file_name(&self) -> TagValue {
        TagValue::from_parts(&self.file_names)
    }

    pub fn description(&self) -> TagValue {
        TagValue::from_parts(&self.descriptions)
    }

    /// Merges the provenance of `other` into this tag.
    ///
    /// An empty tag becomes a copy of `other`. Otherwise each file name and
    /// description of `other` not already recorded is added after the existing
    /// ones.
    pub fn append(&mut self, other: &Tag) {
        if self.is_empty() {
            *self = other.clone();
            return;
        }
        for name in &other.file_names {
            push_unique(&mut self.file_names, name.clone());
        }
        for descr in &other.descriptions {
            push_unique(&mut self.descriptions, descr.clone());
        }
    }
}

fn push_unique(parts: &mut Vec<String>, value: String) {
    if !value.is_empty() && !parts.contains(&value) {
        parts.push(value);
    }
}
