//! Annotation session: one loaded document, its annotations and the label
//! set they are tagged with.
//!
//! The session is the single owner of all mutable state. Every user action
//! (load, annotate, remove, navigate) runs to completion before the next one,
//! and the view is re-rendered from scratch afterwards.

use thiserror::Error;

use crate::config::{AppConfig, ConfigError};
use crate::document::{Document, DocumentMode};
use crate::error::{AnnotationError, DocumentError};
use crate::model::{Annotation, AnnotationId, Scope};
use crate::registry::LabelRegistry;
use crate::render::{self, Segment};
use crate::store::AnnotationStore;


/// Errors returned by session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The operation needs a loaded document
    #[error("No document loaded")]
    NoDocument,

    /// Loading or addressing the document failed
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A proposed annotation was rejected
    #[error(transparent)]
    Annotation(#[from] AnnotationError),
}

/// A document together with the annotations made on it.
#[derive(Debug, Clone)]
struct Loaded {
    document: Document,
    store: AnnotationStore,
}

/// State of one annotation session.
#[derive(Debug, Clone)]
pub struct Session {
    registry: LabelRegistry,
    loaded: Option<Loaded>,
}

impl Session {
    /// Create a session with the given labels and no document.
    pub fn new(registry: LabelRegistry) -> Self {
        Self {
            registry,
            loaded: None,
        }
    }

    /// Create a session using the labels defined in `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.registry()?))
    }

    pub fn registry(&self) -> &LabelRegistry {
        &self.registry
    }

    /// Parse and open raw content, replacing any loaded document.
    ///
    /// On failure the previously loaded document stays open.
    pub fn load(&mut self, raw: &str, mode: DocumentMode) -> Result<&Document, SessionError> {
        let document = Document::load(raw, mode)?;
        Ok(self.open(document))
    }

    /// Open an already parsed document, replacing any loaded one.
    ///
    /// Annotations made on the previous document are discarded.
    pub fn open(&mut self, document: Document) -> &Document {
        if let Some(previous) = self.loaded.as_ref().filter(|l| !l.store.is_empty()) {
            log::info!(
                "Discarding {} annotations of the previous document",
                previous.store.len()
            );
        }

        let store = AnnotationStore::new(document.mode());
        let loaded = self.loaded.insert(Loaded { document, store });
        &loaded.document
    }

    /// Close the document and drop its annotations.
    pub fn close(&mut self) {
        self.loaded = None;
    }

    pub fn document(&self) -> Option<&Document> {
        self.loaded.as_ref().map(|l| &l.document)
    }

    pub fn store(&self) -> Option<&AnnotationStore> {
        self.loaded.as_ref().map(|l| &l.store)
    }

    fn loaded(&self) -> Result<&Loaded, SessionError> {
        self.loaded.as_ref().ok_or(SessionError::NoDocument)
    }

    fn loaded_mut(&mut self) -> Result<&mut Loaded, SessionError> {
        self.loaded.as_mut().ok_or(SessionError::NoDocument)
    }

    /// Tag `selection` in the currently displayed scope with `label_key`.
    pub fn annotate(&mut self, selection: &str, label_key: &str) -> Result<&Annotation, SessionError> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoDocument)?;
        let scope = loaded.document.current_scope_id();
        Ok(loaded.store.propose(selection, label_key, scope, &self.registry)?)
    }

    /// Tag `selection` in the scope at `index`.
    pub fn annotate_in(
        &mut self,
        index: usize,
        selection: &str,
        label_key: &str,
    ) -> Result<&Annotation, SessionError> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoDocument)?;
        let scope = loaded.document.scope_id(index)?;
        Ok(loaded.store.propose(selection, label_key, scope, &self.registry)?)
    }

    /// Remove an annotation. Returns `false` if it does not exist.
    pub fn remove(&mut self, id: AnnotationId) -> Result<bool, SessionError> {
        Ok(self.loaded_mut()?.store.remove(id))
    }

    /// Annotations of the currently displayed scope, in creation order.
    pub fn annotations(&self) -> Result<Vec<&Annotation>, SessionError> {
        let loaded = self.loaded()?;
        Ok(loaded.store.list_for(loaded.document.current_scope_id()))
    }

    /// Annotations of an arbitrary scope, in creation order.
    pub fn annotations_for(&self, scope: Scope) -> Result<Vec<&Annotation>, SessionError> {
        Ok(self.loaded()?.store.list_for(scope))
    }

    /// Render the currently displayed scope.
    pub fn render(&self) -> Result<Vec<Segment>, SessionError> {
        let loaded = self.loaded()?;
        Ok(render::render_current(
            &loaded.document,
            &loaded.store,
            &self.registry,
        ))
    }

    /// Render the scope at `index`.
    pub fn render_scope(&self, index: usize) -> Result<Vec<Segment>, SessionError> {
        let loaded = self.loaded()?;
        Ok(render::render_scope(
            &loaded.document,
            index,
            &loaded.store,
            &self.registry,
        )?)
    }

    /// Show the next record.
    pub fn advance(&mut self) -> Result<usize, SessionError> {
        Ok(self.loaded_mut()?.document.advance())
    }

    /// Show the previous record.
    pub fn retreat(&mut self) -> Result<usize, SessionError> {
        Ok(self.loaded_mut()?.document.retreat())
    }

    /// Show the record at `index`.
    pub fn jump_to(&mut self, index: usize) -> Result<usize, SessionError> {
        Ok(self.loaded_mut()?.document.jump_to(index)?)
    }

    pub fn at_start(&self) -> Result<bool, SessionError> {
        Ok(self.loaded()?.document.at_start())
    }

    pub fn at_end(&self) -> Result<bool, SessionError> {
        Ok(self.loaded()?.document.at_end())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LabelRegistry::default())
    }
}
