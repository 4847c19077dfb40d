//! Relationship resolution - turns overrides into stored foreign keys

use serde_json::Value;

use crate::record::{Attributes, Override, Overrides};
use crate::registry::ModelSchema;

/// Resolves creation input for one model.
///
/// Resolution is a pure function of its input; nothing here touches the store.
pub struct RelationshipResolver<'a> {
    model: &'a str,
    schema: Option<&'a ModelSchema>,
}

impl<'a> RelationshipResolver<'a> {
    /// `schema` is `None` for factory-only models, which have no relationships
    pub fn new(model: &'a str, schema: Option<&'a ModelSchema>) -> Self {
        Self { model, schema }
    }

    /// Layer generated attributes, factory default relationships and caller
    /// overrides, in increasing precedence.
    ///
    /// When the caller sets either side of a belongsTo (the relationship name or
    /// its foreign key), both sides are dropped from the lower layers first.
    pub fn merge<'d>(
        &self,
        generated: Attributes,
        defaults: impl IntoIterator<Item = (&'d str, u64)>,
        overrides: &Overrides,
    ) -> Overrides {
        let mut merged: Overrides = generated.into_iter().collect();
        for (relationship, id) in defaults {
            merged.insert(relationship, id);
        }

        if let Some(schema) = self.schema {
            for rel in schema.belongs_to() {
                if overrides.contains_key(&rel.name) || overrides.contains_key(&rel.foreign_key) {
                    merged.remove(&rel.name);
                    merged.remove(&rel.foreign_key);
                }
            }
        }

        for (key, value) in overrides.iter() {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Produce the attributes to store.
    ///
    /// Every belongsTo ends up as its foreign key: a record under the
    /// relationship name contributes its identity, a raw value under either the
    /// relationship name or the foreign key is kept as-is, and a missing one is
    /// stored as null. hasMany names and `id` are not storable and are dropped.
    pub fn resolve(&self, mut input: Overrides) -> Attributes {
        let mut attrs = Attributes::new();

        if input.remove("id").is_some() {
            tracing::warn!(model = self.model, "ignoring `id` override; identities are assigned by the store");
        }

        if let Some(schema) = self.schema {
            for rel in schema.belongs_to() {
                let by_name = input.remove(&rel.name);
                let by_key = input.remove(&rel.foreign_key);
                let foreign_key = by_name
                    .or(by_key)
                    .map(foreign_key_value)
                    .unwrap_or(Value::Null);
                attrs.insert(rel.foreign_key.clone(), foreign_key);
            }

            for rel in schema.has_many() {
                if input.remove(&rel.name).is_some() {
                    tracing::warn!(
                        model = self.model,
                        relationship = %rel.name,
                        "ignoring hasMany override; set `{}` on the {} records instead",
                        rel.foreign_key,
                        rel.target
                    );
                }
            }
        }

        for (key, value) in input {
            attrs.insert(key, value.into_value());
        }
        attrs
    }
}

fn foreign_key_value(value: Override) -> Value {
    match value {
        Override::Record(record) => Value::from(record.id()),
        Override::Value(value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inflector::EnglishInflector;
    use crate::registry::{ModelDefinition, ModelRegistry};
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn registry() -> ModelRegistry {
        let inflector = EnglishInflector::new();
        let mut models = ModelRegistry::new();
        models.register("post", &ModelDefinition::new().belongs_to("author"), &inflector, "Id");
        models.register("author", &ModelDefinition::new().has_many("posts"), &inflector, "Id");
        models
    }

    #[test]
    fn test_record_override_becomes_foreign_key() {
        let models = registry();
        let mut store = InMemoryStore::new();
        let author = store.insert("author", Attributes::new());
        let resolver = RelationshipResolver::new("post", models.get("post"));

        let attrs = resolver.resolve(Overrides::new().with("author", &author).with("title", "Hi"));
        assert_eq!(attrs.get("authorId"), Some(&json!(author.id())));
        assert_eq!(attrs.get("title"), Some(&json!("Hi")));
        assert!(!attrs.contains_key("author"));
    }

    #[test]
    fn test_raw_foreign_key_is_kept() {
        let models = registry();
        let resolver = RelationshipResolver::new("post", models.get("post"));

        let attrs = resolver.resolve(Overrides::new().with("authorId", 7u64));
        assert_eq!(attrs.get("authorId"), Some(&json!(7)));
    }

    #[test]
    fn test_missing_belongs_to_is_null() {
        let models = registry();
        let resolver = RelationshipResolver::new("post", models.get("post"));

        let attrs = resolver.resolve(Overrides::new());
        assert_eq!(attrs.get("authorId"), Some(&Value::Null));
    }

    #[test]
    fn test_has_many_and_id_are_not_stored() {
        let models = registry();
        let resolver = RelationshipResolver::new("author", models.get("author"));

        let attrs = resolver.resolve(
            Overrides::new()
                .with("posts", json!([1, 2]))
                .with("id", 9u64)
                .with("name", "Zelda"),
        );
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("name"), Some(&json!("Zelda")));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let models = registry();
        let resolver = RelationshipResolver::new("post", models.get("post"));
        let input = Overrides::new().with("authorId", 1u64).with("title", "same");

        assert_eq!(resolver.resolve(input.clone()), resolver.resolve(input));
    }

    #[test]
    fn test_merge_precedence() {
        let models = registry();
        let resolver = RelationshipResolver::new("post", models.get("post"));
        let mut generated = Attributes::new();
        generated.insert("title".to_string(), json!("generated"));
        generated.insert("views".to_string(), json!(0));

        let merged = resolver.merge(
            generated,
            [("author", 2)],
            &Overrides::new().with("title", "override").with("authorId", 5u64),
        );
        let attrs = resolver.resolve(merged);

        assert_eq!(attrs.get("title"), Some(&json!("override")));
        assert_eq!(attrs.get("views"), Some(&json!(0)));
        assert_eq!(attrs.get("authorId"), Some(&json!(5)));
    }

    #[test]
    fn test_factory_default_relationship_applies_without_override() {
        let models = registry();
        let resolver = RelationshipResolver::new("post", models.get("post"));

        let merged = resolver.merge(Attributes::new(), [("author", 2)], &Overrides::new());
        assert_eq!(resolver.resolve(merged).get("authorId"), Some(&json!(2)));
    }

    #[test]
    fn test_factory_only_model_keeps_everything() {
        let resolver = RelationshipResolver::new("widget", None);
        let attrs = resolver.resolve(Overrides::new().with("author", 3u64));
        assert_eq!(attrs.get("author"), Some(&json!(3)));
    }
}
