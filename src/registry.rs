//! Label registry for looking up labels by key.

use std::collections::HashMap;

use crate::error::LabelError;
use crate::model::{Label, LabelKey, default_labels};

/// Immutable set of labels, iterated in definition order.
#[derive(Debug, Clone)]
pub struct LabelRegistry {
    labels: Vec<Label>,
    by_key: HashMap<LabelKey, usize>,
}

impl LabelRegistry {
    /// Build a registry, validating that keys are unique and keys and names
    /// are non-empty.
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Result<Self, LabelError> {
        let mut registry = Self {
            labels: Vec::new(),
            by_key: HashMap::new(),
        };

        for label in labels {
            if label.key.as_str().trim().is_empty() {
                return Err(LabelError::EmptyKey);
            }
            if label.name.trim().is_empty() {
                return Err(LabelError::EmptyName {
                    key: label.key.to_string(),
                });
            }
            if registry.by_key.contains_key(&label.key) {
                return Err(LabelError::DuplicateKey {
                    key: label.key.to_string(),
                });
            }
            registry.insert(label);
        }

        log::debug!("Label registry built with {} labels", registry.len());
        Ok(registry)
    }

    fn insert(&mut self, label: Label) {
        self.by_key.insert(label.key.clone(), self.labels.len());
        self.labels.push(label);
    }

    /// Get a label by key.
    pub fn lookup(&self, key: &str) -> Option<&Label> {
        self.by_key.get(key).map(|&i| &self.labels[i])
    }

    /// Check whether a key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// All labels in definition order.
    pub fn all(&self) -> &[Label] {
        &self.labels
    }

    /// All keys in definition order.
    pub fn keys(&self) -> impl Iterator<Item = &LabelKey> {
        self.labels.iter().map(|l| &l.key)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for LabelRegistry {
    /// Registry holding the built-in person / organization / location labels.
    fn default() -> Self {
        let mut registry = Self {
            labels: Vec::new(),
            by_key: HashMap::new(),
        };
        for label in default_labels() {
            registry.insert(label);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = LabelRegistry::default();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup("person").map(|l| l.name.as_str()), Some("Person"));
        assert!(registry.lookup("Person").is_none());
        assert!(registry.lookup("date").is_none());
    }

    #[test]
    fn test_iteration_order_is_definition_order() {
        let registry = LabelRegistry::new(vec![
            Label::with_accent("b", "Bee", [1, 2, 3]),
            Label::with_accent("a", "Ant", [4, 5, 6]),
        ])
        .unwrap();
        let keys: Vec<&str> = registry.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(registry.all()[1].name, "Ant");
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = LabelRegistry::new(vec![
            Label::with_accent("person", "Person", [0, 0, 0]),
            Label::with_accent("person", "Human", [9, 9, 9]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            LabelError::DuplicateKey {
                key: "person".to_string()
            }
        );
    }

    #[test]
    fn test_empty_key_and_name_rejected() {
        let err = LabelRegistry::new(vec![Label::with_accent("  ", "Blank", [0, 0, 0])]).unwrap_err();
        assert_eq!(err, LabelError::EmptyKey);

        let err = LabelRegistry::new(vec![Label::with_accent("misc", "", [0, 0, 0])]).unwrap_err();
        assert_eq!(
            err,
            LabelError::EmptyName {
                key: "misc".to_string()
            }
        );
    }
}
