//! In-memory record store
//!
//! One ordered collection per canonical model name. Records are appended in
//! creation order, which is also identity order.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::record::{Attributes, Record};

/// Ordered records of a single model
#[derive(Debug, Clone, Default)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    /// Identity the next insert will receive
    pub fn next_id(&self) -> u64 {
        self.records.last().map(|r| r.id() + 1).unwrap_or(1)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Find by identity; records are sorted by id
    pub fn find(&self, id: u64) -> Option<&Record> {
        self.records
            .binary_search_by_key(&id, Record::id)
            .ok()
            .map(|index| &self.records[index])
    }

    /// Records whose `field` equals `value`, in creation order
    pub fn where_eq<'a>(&'a self, field: &'a str, value: &'a Value) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .iter()
            .filter(move |record| record.get(field) == Some(value))
    }

    /// Records whose `field` holds identity `id`, in creation order
    pub fn referencing<'a>(&'a self, field: &'a str, id: u64) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .iter()
            .filter(move |record| record.references(field, id))
    }

    fn push(&mut self, model: &str, attrs: Attributes) -> &Record {
        let id = self.next_id();
        self.records.push(Record::new(model, id, attrs));
        &self.records[self.records.len() - 1]
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Session-scoped store of every collection
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: BTreeMap<String, Collection>,
    empty: Collection,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection if none exists yet
    pub fn ensure_collection(&mut self, model: &str) {
        self.collections.entry(model.to_string()).or_default();
    }

    /// Append a record with the next identity of its collection
    pub fn insert(&mut self, model: &str, attrs: Attributes) -> Record {
        let record = self
            .collections
            .entry(model.to_string())
            .or_default()
            .push(model, attrs)
            .clone();
        tracing::trace!(model, id = record.id(), "record inserted");
        record
    }

    /// The collection for `model`; an empty one if nothing was inserted yet
    pub fn collection(&self, model: &str) -> &Collection {
        self.collections.get(model).unwrap_or(&self.empty)
    }

    pub fn find(&self, model: &str, id: u64) -> Option<&Record> {
        self.collection(model).find(id)
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Total number of records across every collection
    pub fn record_count(&self) -> usize {
        self.collections.values().map(Collection::len).sum()
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.collections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => Attributes::new(),
        }
    }

    #[test]
    fn test_identities_start_at_one_per_collection() {
        let mut store = InMemoryStore::new();

        let a = store.insert("post", Attributes::new());
        let b = store.insert("post", Attributes::new());
        let c = store.insert("author", Attributes::new());

        assert_eq!((a.id(), b.id(), c.id()), (1, 2, 1));
        assert_eq!(store.collection("post").next_id(), 3);
        assert_eq!(store.collection("comment").next_id(), 1);
        assert_eq!(store.record_count(), 3);
    }

    #[test]
    fn test_collection_keeps_creation_order() {
        let mut store = InMemoryStore::new();
        for title in ["a", "b", "c"] {
            store.insert("post", attrs(json!({ "title": title })));
        }

        let titles: Vec<_> = store
            .collection("post")
            .iter()
            .filter_map(|r| r.get_str("title"))
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_find_by_id() {
        let mut store = InMemoryStore::new();
        store.insert("post", attrs(json!({ "title": "first" })));
        store.insert("post", attrs(json!({ "title": "second" })));

        assert_eq!(store.find("post", 2).and_then(|r| r.get_str("title")), Some("second"));
        assert!(store.find("post", 3).is_none());
        assert!(store.find("author", 1).is_none());
    }

    #[test]
    fn test_foreign_key_scans() {
        let mut store = InMemoryStore::new();
        store.insert("post", attrs(json!({ "authorId": 1 })));
        store.insert("post", attrs(json!({ "authorId": 2 })));
        store.insert("post", attrs(json!({ "authorId": 1 })));
        store.insert("post", attrs(json!({ "authorId": null })));

        let ids: Vec<_> = store.collection("post").referencing("authorId", 1).map(Record::id).collect();
        assert_eq!(ids, vec![1, 3]);

        let nulls = store.collection("post").where_eq("authorId", &Value::Null).count();
        assert_eq!(nulls, 1);
    }

    #[test]
    fn test_collection_view_sees_later_inserts() {
        let mut store = InMemoryStore::new();
        store.insert("post", Attributes::new());
        assert_eq!(store.collection("post").len(), 1);

        store.insert("post", Attributes::new());
        assert_eq!(store.collection("post").len(), 2);
    }

    #[test]
    fn test_ensure_and_clear() {
        let mut store = InMemoryStore::new();
        store.ensure_collection("data");
        assert_eq!(store.collection_names().collect::<Vec<_>>(), vec!["data"]);
        assert!(store.collection("data").is_empty());

        store.insert("post", Attributes::new());
        store.clear();
        assert_eq!(store.record_count(), 0);
        assert_eq!(store.collection_names().count(), 0);
    }
}
