//! Rendered output segments.

use serde::{Deserialize, Serialize};

use crate::model::{AnnotationId, LabelColors, LabelKey};

/// Label information attached to a highlighted segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    /// Annotation that produced the highlight
    pub annotation: AnnotationId,
    /// Key of the annotation's label
    pub label: LabelKey,
    /// The label's presentation colors
    pub colors: LabelColors,
}

/// A contiguous slice of the rendered body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Byte offset of the segment in the body
    pub offset: usize,
    /// The text slice
    pub text: String,
    /// Highlight, or `None` for plain text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
}

impl Segment {
    pub fn plain(offset: usize, text: &str) -> Self {
        Self {
            offset,
            text: text.to_string(),
            highlight: None,
        }
    }

    pub fn highlighted(offset: usize, text: &str, highlight: Highlight) -> Self {
        Self {
            offset,
            text: text.to_string(),
            highlight: Some(highlight),
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_some()
    }

    /// Label key of a highlighted segment.
    pub fn label(&self) -> Option<&LabelKey> {
        self.highlight.as_ref().map(|h| &h.label)
    }

    /// Byte offset one past the end of the segment.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Append plain text, merging into the previous segment when it is plain and
/// adjacent.
pub(crate) fn push_plain(segments: &mut Vec<Segment>, offset: usize, text: &str) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(last) if !last.is_highlighted() && last.end() == offset => last.text.push_str(text),
        _ => segments.push(Segment::plain(offset, text)),
    }
}

/// Concatenate segment texts back into a body.
pub fn concat(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}
