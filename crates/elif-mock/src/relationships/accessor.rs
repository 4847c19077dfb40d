//! Relationship accessors computed from the store on every read

use crate::error::{MockError, MockResult};
use crate::inflector::camelize;
use crate::record::Record;
use crate::registry::ModelSchema;
use crate::store::InMemoryStore;

use super::metadata::{Relationship, RelationshipKind};

/// Relationship view of a record, bound to the store it lives in
pub struct RecordRelations<'a> {
    record: &'a Record,
    schema: Option<&'a ModelSchema>,
    store: &'a InMemoryStore,
}

impl<'a> RecordRelations<'a> {
    pub fn new(record: &'a Record, schema: Option<&'a ModelSchema>, store: &'a InMemoryStore) -> Self {
        Self {
            record,
            schema,
            store,
        }
    }

    /// Current stored row for the record, falling back to the given snapshot
    fn current(&self) -> &'a Record {
        self.store
            .find(self.record.model(), self.record.id())
            .unwrap_or(self.record)
    }

    fn relationship(&self, name: &str, expected: RelationshipKind) -> MockResult<&'a Relationship> {
        let name = camelize(name);
        let rel = self
            .schema
            .and_then(|schema| schema.relationship(&name))
            .ok_or_else(|| MockError::UnknownRelationship {
                model: self.record.model().to_string(),
                name: name.clone(),
            })?;

        if rel.kind != expected {
            return Err(MockError::WrongRelationshipKind {
                model: self.record.model().to_string(),
                name,
                expected: expected.as_str(),
                actual: rel.kind.as_str(),
            });
        }
        Ok(rel)
    }

    /// Parent record of a belongsTo; `None` when the foreign key is null or dangling
    pub fn belongs_to(&self, name: &str) -> MockResult<Option<&'a Record>> {
        let rel = self.relationship(name, RelationshipKind::BelongsTo)?;
        let parent = self
            .current()
            .get(&rel.foreign_key)
            .and_then(|value| value.as_u64())
            .and_then(|id| self.store.find(&rel.target, id));
        Ok(parent)
    }

    /// Children of a hasMany, scanned from the target collection in creation order
    pub fn has_many(&self, name: &str) -> MockResult<Vec<&'a Record>> {
        let rel = self.relationship(name, RelationshipKind::HasMany)?;
        Ok(self
            .store
            .collection(&rel.target)
            .referencing(&rel.foreign_key, self.record.id())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inflector::EnglishInflector;
    use crate::record::Attributes;
    use crate::registry::{ModelDefinition, ModelRegistry};
    use serde_json::json;

    fn fk(id: u64) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("authorId".to_string(), json!(id));
        attrs
    }

    fn setup() -> (ModelRegistry, InMemoryStore) {
        let inflector = EnglishInflector::new();
        let mut models = ModelRegistry::new();
        models.register("post", &ModelDefinition::new().belongs_to("author"), &inflector, "Id");
        models.register("author", &ModelDefinition::new().has_many("posts"), &inflector, "Id");
        (models, InMemoryStore::new())
    }

    #[test]
    fn test_belongs_to_and_has_many() {
        let (models, mut store) = setup();
        let author = store.insert("author", Attributes::new());
        let other = store.insert("author", Attributes::new());
        let first = store.insert("post", fk(author.id()));
        store.insert("post", fk(other.id()));
        let third = store.insert("post", fk(author.id()));

        let relations = RecordRelations::new(&first, models.get("post"), &store);
        assert_eq!(relations.belongs_to("author").unwrap(), Some(&author));

        let relations = RecordRelations::new(&author, models.get("author"), &store);
        let ids: Vec<_> = relations.has_many("posts").unwrap().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![first.id(), third.id()]);
    }

    #[test]
    fn test_has_many_reflects_later_inserts() {
        let (models, mut store) = setup();
        let author = store.insert("author", Attributes::new());
        assert!(RecordRelations::new(&author, models.get("author"), &store)
            .has_many("posts")
            .unwrap()
            .is_empty());

        store.insert("post", fk(author.id()));
        assert_eq!(
            RecordRelations::new(&author, models.get("author"), &store)
                .has_many("posts")
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_null_or_dangling_parent() {
        let (models, mut store) = setup();
        let mut attrs = Attributes::new();
        attrs.insert("authorId".to_string(), json!(null));
        let orphan = store.insert("post", attrs);
        let dangling = store.insert("post", fk(42));

        assert!(RecordRelations::new(&orphan, models.get("post"), &store)
            .belongs_to("author")
            .unwrap()
            .is_none());
        assert!(RecordRelations::new(&dangling, models.get("post"), &store)
            .belongs_to("author")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_unknown_and_mismatched_relationships() {
        let (models, mut store) = setup();
        let post = store.insert("post", fk(1));
        let relations = RecordRelations::new(&post, models.get("post"), &store);

        assert!(matches!(
            relations.belongs_to("editor"),
            Err(MockError::UnknownRelationship { .. })
        ));
        assert!(matches!(
            relations.has_many("author"),
            Err(MockError::WrongRelationshipKind { expected: "hasMany", .. })
        ));

        let relations = RecordRelations::new(&post, None, &store);
        assert!(relations.belongs_to("author").is_err());
    }
}
