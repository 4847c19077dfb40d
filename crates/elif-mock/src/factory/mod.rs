//! Factory registry - attribute generation per model
//!
//! A factory lists attribute generators and optional default relationships.
//! Models without a factory are created with empty attributes.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::inflector::camelize;
use crate::record::Attributes;

pub mod sequence;

pub use sequence::{AttributeGenerator, Sequence};

/// Attribute generators and default relationships for one model
#[derive(Debug, Clone, Default)]
pub struct FactoryDefinition {
    attributes: Vec<(String, AttributeGenerator)>,
    relationships: BTreeMap<String, u64>,
}

impl FactoryDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constant attribute
    pub fn attr(self, name: &str, value: impl Into<Value>) -> Self {
        self.generator(name, AttributeGenerator::constant(value))
    }

    /// Attribute computed from the creation index
    pub fn sequence<F, V>(self, name: &str, f: F) -> Self
    where
        F: Fn(usize) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        self.generator(name, AttributeGenerator::sequence(f))
    }

    pub fn generator(mut self, name: &str, generator: AttributeGenerator) -> Self {
        self.attributes.retain(|(existing, _)| existing != name);
        self.attributes.push((name.to_string(), generator));
        self
    }

    /// Default belongsTo target; caller overrides still win
    pub fn belongs_to(mut self, relationship: &str, id: u64) -> Self {
        self.relationships.insert(camelize(relationship), id);
        self
    }

    /// Run every generator for the record at `index`
    pub fn build(&self, index: usize) -> Attributes {
        self.attributes
            .iter()
            .map(|(name, generator)| (name.clone(), generator.generate(index)))
            .collect()
    }

    /// Default relationship identities keyed by relationship name
    pub fn default_relationships(&self) -> impl Iterator<Item = (&str, u64)> {
        self.relationships.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(name, _)| name.as_str())
    }
}

/// Canonical model name -> factory
#[derive(Debug, Clone, Default)]
pub struct FactoryRegistry {
    factories: BTreeMap<String, FactoryDefinition>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory; returns the canonical name it is stored under
    pub fn register(&mut self, name: &str, factory: FactoryDefinition) -> String {
        let canonical = camelize(name);
        if self.factories.insert(canonical.clone(), factory).is_some() {
            tracing::warn!(model = %canonical, "factory registered twice; keeping the last definition");
        }
        canonical
    }

    pub fn get(&self, canonical: &str) -> Option<&FactoryDefinition> {
        self.factories.get(canonical)
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.factories.contains_key(canonical)
    }

    /// Get the number of registered factories
    pub fn factory_count(&self) -> usize {
        self.factories.len()
    }
}
