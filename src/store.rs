//! Annotation storage and the acceptance rules for new annotations.

use crate::document::DocumentMode;
use crate::error::AnnotationError;
use crate::model::{Annotation, AnnotationId, Scope};
use crate::registry::LabelRegistry;

/// Insertion-ordered annotations for one loaded document.
///
/// Within one effective scope no two annotations share the same text. In
/// line-text documents every annotation is document-wide; in record
/// documents each record is its own scope.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    mode: DocumentMode,
    annotations: Vec<Annotation>,
    /// Counter for generating unique annotation IDs.
    next_id: AnnotationId,
}

impl AnnotationStore {
    /// Create an empty store for a document of the given mode.
    pub fn new(mode: DocumentMode) -> Self {
        Self {
            mode,
            annotations: Vec::new(),
            next_id: 1,
        }
    }

    /// Scope used to compare annotations for duplicates.
    pub fn effective_scope(&self, scope: Scope) -> Scope {
        match self.mode {
            DocumentMode::LineText => Scope::Document,
            DocumentMode::Record => scope,
        }
    }

    /// Validate and insert a new annotation.
    ///
    /// On rejection nothing is inserted and existing annotations are
    /// untouched.
    pub fn propose(
        &mut self,
        text: &str,
        label_key: &str,
        scope: Scope,
        registry: &LabelRegistry,
    ) -> Result<&Annotation, AnnotationError> {
        let text = text.trim();
        if text.is_empty() {
            log::info!("Rejected annotation: empty selection");
            return Err(AnnotationError::EmptySelection);
        }

        if self.mode == DocumentMode::LineText && text.contains('\n') {
            log::info!("Rejected annotation: selection crosses a line break");
            return Err(AnnotationError::MultiLine);
        }

        let Some(label) = registry.lookup(label_key) else {
            log::info!("Rejected annotation: unknown label '{}'", label_key);
            return Err(AnnotationError::UnknownLabel {
                key: label_key.to_string(),
            });
        };

        let scope = self.effective_scope(scope);
        if self
            .annotations
            .iter()
            .any(|a| a.scope == scope && a.text == text)
        {
            log::info!("Rejected annotation: \"{}\" already annotated in {:?}", text, scope);
            return Err(AnnotationError::DuplicateText {
                text: text.to_string(),
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        let annotation = Annotation::new(id, text, label.key.clone(), scope);
        log::debug!(
            "Added annotation {} \"{}\" as '{}' in {:?}",
            id,
            annotation.text,
            annotation.label,
            scope
        );
        self.annotations.push(annotation);

        let index = self.annotations.len() - 1;
        Ok(&self.annotations[index])
    }

    /// Annotations applicable to `scope`, in insertion order.
    ///
    /// Line-text documents return every annotation.
    pub fn list_for(&self, scope: Scope) -> Vec<&Annotation> {
        let scope = self.effective_scope(scope);
        self.annotations.iter().filter(|a| a.scope == scope).collect()
    }

    /// Remove an annotation by ID. Returns `false` if it was not present.
    pub fn remove(&mut self, id: AnnotationId) -> bool {
        let Some(pos) = self.annotations.iter().position(|a| a.id == id) else {
            return false;
        };
        let removed = self.annotations.remove(pos);
        log::debug!("Removed annotation {} \"{}\"", removed.id, removed.text);
        true
    }

    /// Get an annotation by ID.
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Get all annotations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    /// Get the number of annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if there are no annotations.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Clear all annotations.
    pub fn clear(&mut self) {
        self.annotations.clear();
    }
}
