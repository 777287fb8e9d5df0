//! Error types for document loading, label registration and annotation.

use thiserror::Error;

/// Errors that can occur while loading or addressing a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A record could not be parsed as JSON
    #[error("Malformed record on line {line}: {source}")]
    Parse {
        /// 1-based line in the input where parsing failed
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A whole-file record document was valid JSON but not an array
    #[error("Expected a JSON array of records, found {found}")]
    NotAnArray {
        /// Kind of value found at the top level
        found: &'static str,
    },

    /// A record document contained no records
    #[error("Document contains no records")]
    Empty,

    /// Scope index outside the document
    #[error("Scope {index} is out of range (document has {len} scopes)")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Number of scopes in the document
        len: usize,
    },
}

impl DocumentError {
    /// Create a parse error for the record on `line`.
    pub fn parse(line: usize, source: serde_json::Error) -> Self {
        Self::Parse { line, source }
    }

    /// Create an out-of-range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}

/// Recoverable rejections of a proposed annotation.
///
/// The store is left unchanged whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    /// Selection was empty after trimming
    #[error("Nothing selected")]
    EmptySelection,

    /// Text documents are highlighted line by line, so a selection may not
    /// cross a line break
    #[error("Selection spans more than one line")]
    MultiLine,

    /// Label key is not in the registry
    #[error("Unknown label '{key}'")]
    UnknownLabel {
        /// The key that failed to resolve
        key: String,
    },

    /// The same text is already annotated in this scope
    #[error("\"{text}\" has already been annotated")]
    DuplicateText {
        /// The trimmed text that was proposed
        text: String,
    },
}

/// Errors building a label registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// Two labels share a key
    #[error("Duplicate label key '{key}'")]
    DuplicateKey {
        /// The repeated key
        key: String,
    },

    /// Label key is empty
    #[error("Label key must not be empty")]
    EmptyKey,

    /// Label name is empty
    #[error("Label '{key}' has an empty name")]
    EmptyName {
        /// Key of the unnamed label
        key: String,
    },

    /// A color string is not `#rrggbb`
    #[error("Invalid color '{value}' for label '{key}'")]
    InvalidColor {
        /// Key of the label
        key: String,
        /// The rejected color string
        value: String,
    },
}
