//! Model registry - canonical model names and their relationships

use std::collections::BTreeMap;

use crate::error::{Method, MockError, MockResult};
use crate::factory::FactoryRegistry;
use crate::inflector::{camelize, Inflector};
use crate::relationships::{Relationship, RelationshipDeclaration};

/// A model as declared by the caller, before names are resolved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelDefinition {
    relationships: Vec<RelationshipDeclaration>,
}

impl ModelDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a belongsTo relationship
    pub fn belongs_to(self, name: &str) -> Self {
        self.relationship(RelationshipDeclaration::belongs_to(name))
    }

    /// Declare a hasMany relationship
    pub fn has_many(self, name: &str) -> Self {
        self.relationship(RelationshipDeclaration::has_many(name))
    }

    /// Declare a relationship with custom target or foreign key
    pub fn relationship(mut self, declaration: RelationshipDeclaration) -> Self {
        self.relationships.push(declaration);
        self
    }

    pub fn declarations(&self) -> &[RelationshipDeclaration] {
        &self.relationships
    }
}

/// A registered model with resolved relationships
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    name: String,
    relationships: Vec<Relationship>,
}

impl ModelSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relationships in declaration order
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|rel| rel.name == name)
    }

    pub fn belongs_to(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(|rel| rel.is_belongs_to())
    }

    pub fn has_many(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(|rel| rel.is_has_many())
    }
}

/// Canonical model name -> schema
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, ModelSchema>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model, resolving its relationship names.
    ///
    /// Returns the canonical name the model is stored under.
    pub fn register(
        &mut self,
        name: &str,
        definition: &ModelDefinition,
        inflector: &dyn Inflector,
        fk_suffix: &str,
    ) -> String {
        let canonical = camelize(name);
        let relationships = definition
            .declarations()
            .iter()
            .map(|declaration| declaration.resolve(&canonical, inflector, fk_suffix))
            .collect();

        if self.models.contains_key(&canonical) {
            tracing::warn!(model = %canonical, "model registered twice; keeping the last definition");
        }
        self.models.insert(
            canonical.clone(),
            ModelSchema {
                name: canonical.clone(),
                relationships,
            },
        );
        canonical
    }

    pub fn get(&self, canonical: &str) -> Option<&ModelSchema> {
        self.models.get(canonical)
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.models.contains_key(canonical)
    }

    /// Point every hasMany with an inferred key at the target's belongsTo
    /// back to the owner, so `belongs_to("writer").model("author")` on `post`
    /// makes `author.posts` scan `post.writerId`.
    ///
    /// Runs once every model is registered. Without exactly one such
    /// belongsTo the `<owner>Id` default stays.
    pub fn link_inverses(&mut self) {
        let mut updates = Vec::new();

        for (owner, schema) in &self.models {
            for (index, rel) in schema.relationships.iter().enumerate() {
                if !rel.is_has_many() || rel.explicit_key {
                    continue;
                }
                let Some(target) = self.models.get(&rel.target) else {
                    continue;
                };

                let mut inverses = target.belongs_to().filter(|inverse| &inverse.target == owner);
                match (inverses.next(), inverses.next()) {
                    (Some(inverse), None) if inverse.foreign_key != rel.foreign_key => {
                        updates.push((owner.clone(), index, inverse.foreign_key.clone()));
                    }
                    (Some(_), Some(_)) => {
                        tracing::warn!(
                            model = %owner,
                            relationship = %rel.name,
                            foreign_key = %rel.foreign_key,
                            "several belongsTo point back to the owner; keeping the default key"
                        );
                    }
                    _ => {}
                }
            }
        }

        for (owner, index, foreign_key) in updates {
            if let Some(rel) = self
                .models
                .get_mut(&owner)
                .and_then(|schema| schema.relationships.get_mut(index))
            {
                tracing::debug!(model = %owner, relationship = %rel.name, %foreign_key, "hasMany key taken from inverse");
                rel.foreign_key = foreign_key;
            }
        }
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }
}

/// What is registered under a canonical name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeResolution {
    pub has_model: bool,
    pub has_factory: bool,
}

impl TypeResolution {
    /// Look a canonical name up in both registries
    pub fn lookup(models: &ModelRegistry, factories: &FactoryRegistry, canonical: &str) -> Self {
        Self {
            has_model: models.contains(canonical),
            has_factory: factories.contains(canonical),
        }
    }

    pub fn exists(self) -> bool {
        self.has_model || self.has_factory
    }

    /// Fail with the exact message for `method` when nothing is registered
    pub fn require(self, method: Method, requested: &str) -> MockResult<Self> {
        if self.exists() {
            Ok(self)
        } else {
            Err(MockError::unknown_type(method, requested))
        }
    }
}
