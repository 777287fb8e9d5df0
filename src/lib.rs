//! spantag - text span annotation engine
//!
//! Load a text or JSON-record document, tag literal spans of it with colored
//! labels and render each scope as a sequence of non-overlapping plain and
//! highlighted segments.
//!
//! ```rust
//! use spantag::{DocumentMode, Session};
//!
//! let mut session = Session::default();
//! session.load("Alice works at Acme.", DocumentMode::LineText)?;
//! session.annotate("Acme", "organization")?;
//!
//! let segments = session.render()?;
//! assert_eq!(segments[1].text, "Acme");
//! # Ok::<(), spantag::session::SessionError>(())
//! ```

pub mod color_utils;
pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod registry;
pub mod render;
pub mod session;
pub mod store;

pub use config::AppConfig;
pub use document::{Document, DocumentMode};
pub use model::{Annotation, AnnotationId, Label, LabelColors, LabelKey, Scope};
pub use registry::LabelRegistry;
pub use render::{Highlight, Segment};
pub use session::{Session, SessionError};
pub use store::AnnotationStore;
