//! Loaded document content.
//!
//! A document is either a body of text lines, annotated as a whole, or a
//! sequence of JSON records annotated one record at a time. The two shapes
//! address their scopes differently, so they are separate variants rather
//! than one type with a mode flag.
//!
//! ## Usage
//!
//! ```rust
//! use spantag::document::{Document, DocumentMode};
//!
//! let mut doc = Document::load("{\"name\":\"Acme\"}\n{\"name\":\"Paris\"}", DocumentMode::Record)?;
//! assert_eq!(doc.scope_count(), 2);
//! doc.advance();
//! assert!(doc.current_body().contains("Paris"));
//! # Ok::<(), spantag::error::DocumentError>(())
//! ```

pub mod loader;
mod navigation;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DocumentError;
use crate::model::Scope;

pub use navigation::ScopeCursor;

/// How raw content is split into scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentMode {
    /// Plain text, one logical body split into display lines
    #[default]
    LineText,
    /// One JSON record per line
    Record,
}

impl DocumentMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentMode::LineText => "Text",
            DocumentMode::Record => "JSON Lines",
        }
    }
}

/// Text content annotated as a single document-wide scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBody {
    lines: Vec<String>,
}

impl TextBody {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Display lines, without their `\n` separators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole body with lines joined by `\n`.
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }
}

/// Non-empty sequence of records with a current-record cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    records: Vec<Value>,
    cursor: ScopeCursor,
}

impl RecordSet {
    pub fn new(records: Vec<Value>) -> Result<Self, DocumentError> {
        if records.is_empty() {
            return Err(DocumentError::Empty);
        }
        let cursor = ScopeCursor::new(records.len());
        Ok(Self { records, cursor })
    }
}

/// Borrowed content of one scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScopeContent<'a> {
    /// The full text body
    Lines(&'a [String]),
    /// A single record
    Record(&'a Value),
}

impl ScopeContent<'_> {
    /// Display string the renderer matches annotations against.
    pub fn display(&self) -> String {
        match self {
            ScopeContent::Lines(lines) => lines.join("\n"),
            ScopeContent::Record(record) => loader::canonical_record(record),
        }
    }
}

/// A loaded document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    LineText(TextBody),
    Record(RecordSet),
}

impl Document {
    /// Parse raw content according to `mode`.
    ///
    /// Record mode expects JSON Lines; a single malformed record fails the
    /// whole load.
    pub fn load(raw: &str, mode: DocumentMode) -> Result<Self, DocumentError> {
        let document = match mode {
            DocumentMode::LineText => Document::LineText(TextBody::new(loader::split_lines(raw))),
            DocumentMode::Record => Document::Record(RecordSet::new(loader::parse_json_lines(raw)?)?),
        };
        log::info!(
            "Loaded {} document with {} scopes",
            mode.name(),
            document.scope_count()
        );
        Ok(document)
    }

    /// Parse a whole-file JSON array into a record document.
    pub fn from_json_array(raw: &str) -> Result<Self, DocumentError> {
        let records = RecordSet::new(loader::parse_json_array(raw)?)?;
        log::info!("Loaded JSON array document with {} records", records.records.len());
        Ok(Document::Record(records))
    }

    pub fn mode(&self) -> DocumentMode {
        match self {
            Document::LineText(_) => DocumentMode::LineText,
            Document::Record(_) => DocumentMode::Record,
        }
    }

    /// Number of addressable scopes: 1 for text, one per record otherwise.
    pub fn scope_count(&self) -> usize {
        match self {
            Document::LineText(_) => 1,
            Document::Record(records) => records.records.len(),
        }
    }

    /// Content of the scope at `index`.
    pub fn scope_at(&self, index: usize) -> Result<ScopeContent<'_>, DocumentError> {
        match self {
            Document::LineText(body) if index == 0 => Ok(ScopeContent::Lines(body.lines())),
            Document::LineText(_) => Err(DocumentError::out_of_range(index, 1)),
            Document::Record(records) => records
                .records
                .get(index)
                .map(ScopeContent::Record)
                .ok_or_else(|| DocumentError::out_of_range(index, records.records.len())),
        }
    }

    /// Content of the current scope.
    pub fn current_scope(&self) -> ScopeContent<'_> {
        match self {
            Document::LineText(body) => ScopeContent::Lines(body.lines()),
            Document::Record(records) => {
                ScopeContent::Record(&records.records[records.cursor.index()])
            }
        }
    }

    /// Current record index; always 0 for line-text documents.
    pub fn current_index(&self) -> usize {
        match self {
            Document::LineText(_) => 0,
            Document::Record(records) => records.cursor.index(),
        }
    }

    /// Scope identifier of the scope at `index`.
    pub fn scope_id(&self, index: usize) -> Result<Scope, DocumentError> {
        match self {
            Document::LineText(_) if index == 0 => Ok(Scope::Document),
            Document::LineText(_) => Err(DocumentError::out_of_range(index, 1)),
            Document::Record(records) if index < records.records.len() => Ok(Scope::Record(index)),
            Document::Record(records) => {
                Err(DocumentError::out_of_range(index, records.records.len()))
            }
        }
    }

    /// Scope identifier of the currently displayed scope.
    pub fn current_scope_id(&self) -> Scope {
        match self {
            Document::LineText(_) => Scope::Document,
            Document::Record(records) => Scope::Record(records.cursor.index()),
        }
    }

    /// Display string of the scope at `index`.
    pub fn scope_body(&self, index: usize) -> Result<String, DocumentError> {
        Ok(self.scope_at(index)?.display())
    }

    /// Display string of the current scope.
    pub fn current_body(&self) -> String {
        self.current_scope().display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_line_text() {
        let doc = Document::load("Alice works at Acme.\nAcme is in Paris.", DocumentMode::LineText)
            .unwrap();
        assert_eq!(doc.mode(), DocumentMode::LineText);
        assert_eq!(doc.scope_count(), 1);
        assert_eq!(doc.current_scope_id(), Scope::Document);
        assert_eq!(doc.current_body(), "Alice works at Acme.\nAcme is in Paris.");
        match doc.current_scope() {
            ScopeContent::Lines(lines) => assert_eq!(lines.len(), 2),
            other => panic!("Expected lines, got {:?}", other),
        }
    }

    #[test]
    fn test_load_records() {
        let doc = Document::load("{\"id\":1}\n{\"id\":2}\n", DocumentMode::Record).unwrap();
        assert_eq!(doc.mode(), DocumentMode::Record);
        assert_eq!(doc.scope_count(), 2);
        assert_eq!(doc.scope_at(1).unwrap(), ScopeContent::Record(&json!({"id": 2})));
        assert_eq!(doc.current_scope_id(), Scope::Record(0));
    }

    #[test]
    fn test_malformed_record_aborts_load() {
        let err = Document::load("{\"id\":1}\nnot json", DocumentMode::Record).unwrap_err();
        assert!(matches!(err, DocumentError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_empty_record_document_rejected() {
        let err = Document::load("\n\n", DocumentMode::Record).unwrap_err();
        assert!(matches!(err, DocumentError::Empty));
        assert!(matches!(
            Document::from_json_array("[]"),
            Err(DocumentError::Empty)
        ));
    }

    #[test]
    fn test_scope_at_out_of_range() {
        let doc = Document::load("{\"id\":1}", DocumentMode::Record).unwrap();
        assert!(matches!(
            doc.scope_at(1),
            Err(DocumentError::OutOfRange { index: 1, len: 1 })
        ));

        let text = Document::load("hello", DocumentMode::LineText).unwrap();
        assert!(text.scope_at(0).is_ok());
        assert!(matches!(
            text.scope_at(1),
            Err(DocumentError::OutOfRange { index: 1, len: 1 })
        ));
        assert!(text.scope_id(3).is_err());
    }

    #[test]
    fn test_record_body_is_deterministic() {
        let doc = Document::from_json_array("[{\"b\":[1,2],\"a\":\"x\"}]").unwrap();
        let first = doc.current_body();
        let second = doc.scope_body(0).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "{\n  \"a\": \"x\",\n  \"b\": [\n    1,\n    2\n  ]\n}");
    }
}
