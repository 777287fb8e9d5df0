//! Rendering document scopes into highlight segments.
//!
//! Rendering is a pure function of the scope content, the annotations that
//! apply to it and the label registry. Nothing is cached between renders;
//! the caller re-renders after every change.
//!
//! Line-text documents are resolved one display line at a time, so an
//! annotation is highlighted on every line its text appears on. The line
//! breaks come out as plain text. Record documents are resolved against the
//! canonical serialization of the current record.

mod resolve;
mod segment;

use crate::document::{Document, TextBody};
use crate::error::DocumentError;
use crate::model::Annotation;
use crate::registry::LabelRegistry;
use crate::store::AnnotationStore;

pub use resolve::{match_order, resolve_segments};
pub use segment::{Highlight, Segment, concat};

use resolve::resolve_into;
use segment::push_plain;

/// Render the scope at `index`.
pub fn render_scope(
    document: &Document,
    index: usize,
    store: &AnnotationStore,
    registry: &LabelRegistry,
) -> Result<Vec<Segment>, DocumentError> {
    let scope = document.scope_id(index)?;
    let annotations = store.list_for(scope);

    let segments = match document {
        Document::LineText(body) => render_lines(body, &annotations, registry),
        Document::Record(_) => {
            let body = document.scope_body(index)?;
            resolve_segments(&body, &annotations, registry)
        }
    };

    log::debug!(
        "Rendered scope {:?}: {} segments from {} annotations",
        scope,
        segments.len(),
        annotations.len()
    );
    Ok(segments)
}

/// Render the currently displayed scope.
pub fn render_current(
    document: &Document,
    store: &AnnotationStore,
    registry: &LabelRegistry,
) -> Vec<Segment> {
    let index = document.current_index();
    match render_scope(document, index, store, registry) {
        Ok(segments) => segments,
        Err(e) => {
            // The current index always addresses an existing scope.
            log::warn!("Failed to render current scope {}: {}", index, e);
            Vec::new()
        }
    }
}

/// Resolve each line independently and join them with plain `\n` segments.
fn render_lines(
    body: &TextBody,
    annotations: &[&Annotation],
    registry: &LabelRegistry,
) -> Vec<Segment> {
    let order = match_order(annotations.iter().copied());
    let mut segments = Vec::new();
    let mut offset = 0;

    for (i, line) in body.lines().iter().enumerate() {
        if i > 0 {
            push_plain(&mut segments, offset, "\n");
            offset += 1;
        }
        resolve_into(&mut segments, line, offset, &order, registry);
        offset += line.len();
    }

    segments
}
