//! Field registry for a validator.

use std::collections::HashMap;

use crate::validation::{RuleKind, ValidationRule};

/// Everything the validator knows about one registered field.
#[derive(Debug, Clone)]
pub struct FieldConfig<N> {
    /// Registered field name.
    pub name: String,

    /// First element in the form carrying the name.
    pub target: N,

    /// First associated label, if any.
    pub label: Option<N>,

    /// Node receiving rendered feedback (discovered or created).
    pub feedback: N,

    /// Declared rules, in declaration order.
    pub rules: Vec<ValidationRule<N>>,

    /// Message overrides set through `set_custom_message`.
    pub custom_messages: HashMap<RuleKind, String>,

    /// Advisory warnings accumulated across registrations.
    pub warnings: Vec<String>,
}

/// Registered fields, keyed by name, remembering registration order.
#[derive(Debug)]
pub struct FieldRegistry<N> {
    /// Names in first-registration order.
    order: Vec<String>,

    fields: HashMap<String, FieldConfig<N>>,
}

impl<N> Default for FieldRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> FieldRegistry<N> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            fields: HashMap::new(),
        }
    }

    /// Store a configuration, replacing any previous one for the same name.
    ///
    /// A replaced field keeps its registration position and its earlier
    /// advisory warnings; the new warnings are appended after them.
    pub fn insert(&mut self, mut config: FieldConfig<N>) {
        match self.fields.remove(&config.name) {
            Some(previous) => {
                let mut warnings = previous.warnings;
                warnings.append(&mut config.warnings);
                config.warnings = warnings;
            }
            None => self.order.push(config.name.clone()),
        }
        self.fields.insert(config.name.clone(), config);
    }

    pub fn get(&self, name: &str) -> Option<&FieldConfig<N>> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldConfig<N>> {
        self.fields.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Names in registration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Configurations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldConfig<N>> {
        self.order.iter().filter_map(|name| self.fields.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove every field, returning them in registration order.
    pub fn drain(&mut self) -> Vec<FieldConfig<N>> {
        let order = std::mem::take(&mut self.order);
        let configs = order
            .iter()
            .filter_map(|name| self.fields.remove(name))
            .collect();
        self.fields.clear();
        configs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, target: u32, warnings: &[&str]) -> FieldConfig<u32> {
        FieldConfig {
            name: name.to_string(),
            target,
            label: None,
            feedback: target + 100,
            rules: vec![ValidationRule::required()],
            custom_messages: HashMap::new(),
            warnings: warnings.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut registry = FieldRegistry::new();
        registry.insert(config("a", 1, &[]));
        registry.insert(config("b", 2, &[]));
        registry.insert(config("c", 3, &[]));

        assert_eq!(registry.names(), ["a", "b", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_replace_keeps_position_and_accumulates_warnings() {
        let mut registry = FieldRegistry::new();
        registry.insert(config("a", 1, &["first"]));
        registry.insert(config("b", 2, &[]));

        let mut replacement = config("a", 1, &["second"]);
        replacement.rules = vec![ValidationRule::email(), ValidationRule::min_length(3)];
        registry.insert(replacement);

        assert_eq!(registry.names(), ["a", "b"]);
        let a = registry.get("a").unwrap();
        assert_eq!(a.rules.len(), 2);
        assert_eq!(a.warnings, vec!["first", "second"]);
    }

    #[test]
    fn test_drain_empties_registry() {
        let mut registry = FieldRegistry::new();
        registry.insert(config("a", 1, &[]));
        registry.insert(config("b", 2, &[]));

        let drained = registry.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].name, "a");
        assert!(registry.is_empty());
        assert!(!registry.contains("a"));
    }
}
