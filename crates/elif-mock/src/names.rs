//! Name resolution - requested model names to canonical names

use crate::error::Method;
use crate::factory::FactoryRegistry;
use crate::inflector::{camelize, Inflector};
use crate::registry::ModelRegistry;

/// Result of normalizing a requested name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub canonical: String,
    /// The caller used a plural form that had to be singularized
    pub corrected: bool,
}

/// Maps requested names onto registered canonical names
pub struct NameResolver<'a> {
    inflector: &'a dyn Inflector,
    models: &'a ModelRegistry,
    factories: &'a FactoryRegistry,
}

impl<'a> NameResolver<'a> {
    pub fn new(inflector: &'a dyn Inflector, models: &'a ModelRegistry, factories: &'a FactoryRegistry) -> Self {
        Self {
            inflector,
            models,
            factories,
        }
    }

    fn is_registered(&self, canonical: &str) -> bool {
        self.models.contains(canonical) || self.factories.contains(canonical)
    }

    /// Camelize, then singularize when the singular form is registered.
    ///
    /// Uncountable names are never altered. Names that resolve to nothing are
    /// returned camelized so the caller can report them.
    pub fn normalize(&self, requested: &str) -> Normalized {
        let camelized = camelize(requested);

        if self.inflector.is_uncountable(&camelized) {
            return Normalized {
                canonical: camelized,
                corrected: false,
            };
        }

        let singular = self.inflector.singularize(&camelized);
        if singular != camelized && self.is_registered(&singular) {
            tracing::debug!(requested, canonical = %singular, "singularized model name");
            return Normalized {
                canonical: singular,
                corrected: true,
            };
        }

        Normalized {
            canonical: camelized,
            corrected: false,
        }
    }
}

/// Advisory warning for a pluralized model name
pub fn singularized_warning(method: Method) -> String {
    format!(
        "server.{} was intended to be used with the singularized version of the model",
        method
    )
}
