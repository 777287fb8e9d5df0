//! Label data model for span annotations.
//!
//! Labels are identified by their key. Two labels with the same key are the
//! same label as far as annotations are concerned, whatever their colors.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color_utils::{self, BLACK, Rgb, WHITE};

/// Short identifier of a label, unique within a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelKey(String);

impl LabelKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LabelKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LabelKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for LabelKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Presentation colors carried with a label.
///
/// The engine never interprets these; they are handed to the renderer's
/// caller together with each highlighted segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelColors {
    /// Border / badge color
    pub accent: Rgb,
    /// Highlight background
    pub background: Rgb,
    /// Highlighted text color
    pub foreground: Rgb,
}

impl LabelColors {
    pub fn new(accent: Rgb, background: Rgb, foreground: Rgb) -> Self {
        Self {
            accent,
            background,
            foreground,
        }
    }

    /// Derive a pale background and a dark foreground from an accent color.
    pub fn from_accent(accent: Rgb) -> Self {
        Self {
            accent,
            background: color_utils::mix(accent, WHITE, 0.93),
            foreground: color_utils::mix(accent, BLACK, 0.45),
        }
    }
}

/// A named, colored label that text spans can be tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier of the label
    pub key: LabelKey,
    /// Display name of the label
    pub name: String,
    /// Presentation colors
    pub colors: LabelColors,
}

impl Label {
    /// Create a new label with explicit colors.
    pub fn new(key: &str, name: &str, colors: LabelColors) -> Self {
        Self {
            key: LabelKey::new(key),
            name: name.to_string(),
            colors,
        }
    }

    /// Create a label whose background and foreground derive from `accent`.
    pub fn with_accent(key: &str, name: &str, accent: Rgb) -> Self {
        Self::new(key, name, LabelColors::from_accent(accent))
    }
}

/// Built-in labels for a new session.
pub fn default_labels() -> Vec<Label> {
    vec![
        Label::new(
            "person",
            "Person",
            LabelColors::new([0xef, 0x44, 0x44], [0xfe, 0xf2, 0xf2], [0x99, 0x1b, 0x1b]),
        ),
        Label::new(
            "organization",
            "Organization",
            LabelColors::new([0x22, 0xc5, 0x5e], [0xf0, 0xfd, 0xf4], [0x16, 0x65, 0x34]),
        ),
        Label::new(
            "location",
            "Location",
            LabelColors::new([0x3b, 0x82, 0xf6], [0xef, 0xf6, 0xff], [0x1e, 0x40, 0xaf]),
        ),
    ]
}
