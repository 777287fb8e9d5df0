//! Data models for span annotation.

mod annotation;
mod label;

pub use annotation::{Annotation, AnnotationId, Scope};
pub use label::{Label, LabelColors, LabelKey, default_labels};
