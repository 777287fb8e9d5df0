//! Record navigation.
//!
//! The cursor clamps at both ends instead of wrapping, so the current index
//! always addresses an existing record.

use crate::error::DocumentError;

use super::Document;

/// Position within a non-empty sequence of scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeCursor {
    index: usize,
    len: usize,
}

impl ScopeCursor {
    /// Cursor at the first of `len` scopes. `len` is treated as at least 1.
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len: len.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of scopes the cursor moves over.
    pub fn scope_count(&self) -> usize {
        self.len
    }

    /// Move forward one scope; stays put on the last one.
    pub fn advance(&mut self) -> usize {
        if self.index + 1 < self.len {
            self.index += 1;
        }
        self.index
    }

    /// Move back one scope; stays put on the first one.
    pub fn retreat(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }

    /// Jump directly to `index`.
    pub fn jump_to(&mut self, index: usize) -> Result<usize, DocumentError> {
        if index >= self.len {
            return Err(DocumentError::out_of_range(index, self.len));
        }
        self.index = index;
        Ok(self.index)
    }

    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    pub fn at_end(&self) -> bool {
        self.index + 1 >= self.len
    }

    /// Get progress string like "3/15".
    pub fn progress(&self) -> String {
        format!("{}/{}", self.index + 1, self.len)
    }
}

impl Document {
    /// Move to the next record. No-op for line-text documents.
    pub fn advance(&mut self) -> usize {
        match self {
            Document::LineText(_) => 0,
            Document::Record(records) => {
                let index = records.cursor.advance();
                log::debug!("Advanced to record {}", records.cursor.progress());
                index
            }
        }
    }

    /// Move to the previous record. No-op for line-text documents.
    pub fn retreat(&mut self) -> usize {
        match self {
            Document::LineText(_) => 0,
            Document::Record(records) => {
                let index = records.cursor.retreat();
                log::debug!("Retreated to record {}", records.cursor.progress());
                index
            }
        }
    }

    /// Jump to a record by index.
    pub fn jump_to(&mut self, index: usize) -> Result<usize, DocumentError> {
        match self {
            Document::LineText(_) if index == 0 => Ok(0),
            Document::LineText(_) => Err(DocumentError::out_of_range(index, 1)),
            Document::Record(records) => records.cursor.jump_to(index),
        }
    }

    pub fn at_start(&self) -> bool {
        match self {
            Document::LineText(_) => true,
            Document::Record(records) => records.cursor.at_start(),
        }
    }

    pub fn at_end(&self) -> bool {
        match self {
            Document::LineText(_) => true,
            Document::Record(records) => records.cursor.at_end(),
        }
    }

    /// Position string like "3/15"; always "1/1" for line-text documents.
    pub fn progress(&self) -> String {
        match self {
            Document::LineText(_) => ScopeCursor::new(1).progress(),
            Document::Record(records) => records.cursor.progress(),
        }
    }
}
