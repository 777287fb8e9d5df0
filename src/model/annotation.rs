//! Span annotation types.

use serde::{Deserialize, Serialize};

use super::LabelKey;

/// Unique identifier for an annotation within a store.
pub type AnnotationId = u64;

/// Where an annotation applies.
///
/// Line-text documents attach every annotation to the whole body; record
/// documents attach each annotation to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Applies document-wide
    Document,
    /// Applies to the record at this index
    Record(usize),
}

/// A literal text span tagged with a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique identifier.
    pub id: AnnotationId,
    /// The selected text, trimmed of surrounding whitespace.
    pub text: String,
    /// Key of the label this span is tagged with.
    pub label: LabelKey,
    /// Effective scope the annotation belongs to.
    pub scope: Scope,
}

impl Annotation {
    pub fn new(id: AnnotationId, text: impl Into<String>, label: LabelKey, scope: Scope) -> Self {
        Self {
            id,
            text: text.into(),
            label,
            scope,
        }
    }

    /// Length of the annotated text in characters, used to order matches.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_len_counts_chars() {
        let ann = Annotation::new(1, "Zürich", LabelKey::new("location"), Scope::Document);
        assert_eq!(ann.text_len(), 6);
        assert_eq!(ann.text.len(), 7);
    }

    #[test]
    fn test_scope_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Scope::Document).unwrap(), "\"document\"");
        assert_eq!(serde_json::to_string(&Scope::Record(4)).unwrap(), "{\"record\":4}");
    }
}
