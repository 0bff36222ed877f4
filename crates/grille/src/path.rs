//! Dotted-path placement into the output document.

use crate::Document;
use crate::error::GrilleError;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

/// A validated dotted path such as `config.weapons`.
///
/// Paths are non-empty and no segment is empty, so `a..b` and `.a` are
/// rejected when the metadata table is read rather than halfway through
/// assembly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    segments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPath(pub String);

impl fmt::Display for InvalidPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a valid dotted path", self.0)
    }
}

impl std::error::Error for InvalidPath {}

impl CollectionPath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Replace whatever sits at this path with `value`, creating
    /// intermediate objects on the way down.
    pub fn set(&self, doc: &mut Document, value: JsonValue) -> Result<(), GrilleError> {
        let (leaf, parents) = self.split_leaf();
        let parent = self.descend(doc, parents)?;
        parent.insert(leaf.to_string(), value);
        Ok(())
    }

    /// Shallow-merge `entries` into the object at this path. The final
    /// segment is created as an object when absent; existing keys are
    /// overwritten.
    pub fn merge(&self, doc: &mut Document, entries: Document) -> Result<(), GrilleError> {
        let target = self.descend(doc, &self.segments)?;
        for (key, value) in entries {
            target.insert(key, value);
        }
        Ok(())
    }

    fn split_leaf(&self) -> (&str, &[String]) {
        // segments is never empty once parsed
        match self.segments.split_last() {
            Some((leaf, parents)) => (leaf.as_str(), parents),
            None => ("", &[]),
        }
    }

    fn descend<'d>(
        &self,
        doc: &'d mut Document,
        segments: &[String],
    ) -> Result<&'d mut Document, GrilleError> {
        let mut node = doc;
        for segment in segments {
            let slot = node
                .entry(segment.clone())
                .or_insert_with(|| JsonValue::Object(Map::new()));
            node = match slot {
                JsonValue::Object(map) => map,
                _ => {
                    return Err(GrilleError::PathConflict {
                        path: self.to_string(),
                        segment: segment.clone(),
                    });
                }
            };
        }
        Ok(node)
    }
}

impl FromStr for CollectionPath {
    type Err = InvalidPath;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let segments: Vec<String> = trimmed.split('.').map(str::to_string).collect();
        if trimmed.is_empty() || segments.iter().any(|seg| seg.is_empty()) {
            return Err(InvalidPath(s.to_string()));
        }
        Ok(Self { segments })
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Set `value` at `path` in `doc`.
pub fn set_path(doc: &mut Document, value: JsonValue, path: &CollectionPath) -> Result<(), GrilleError> {
    path.set(doc, value)
}

/// Merge `entries` into the object at `path` in `doc`.
pub fn merge_path(doc: &mut Document, entries: Document, path: &CollectionPath) -> Result<(), GrilleError> {
    path.merge(doc, entries)
}
