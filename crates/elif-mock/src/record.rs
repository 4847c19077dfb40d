//! Records and creation-time overrides

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Attribute map of a record, keyed by field name
pub type Attributes = Map<String, Value>;

/// A persisted row of a model collection.
///
/// Records returned by the server are snapshots; re-read them through the
/// server to observe later changes to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    model: String,
    id: u64,
    attrs: Attributes,
}

impl Record {
    pub(crate) fn new(model: impl Into<String>, id: u64, attrs: Attributes) -> Self {
        Self {
            model: model.into(),
            id,
            attrs,
        }
    }

    /// Canonical name of the model this record belongs to
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Attributes without the identity
    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// Get a single attribute
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.attrs.get(field)
    }

    /// Get a string attribute
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.attrs.get(field).and_then(Value::as_str)
    }

    /// Whether the record's `field` holds this identity
    pub(crate) fn references(&self, field: &str, id: u64) -> bool {
        self.attrs.get(field).and_then(Value::as_u64) == Some(id)
    }

    /// Row as stored in the database view, `id` included
    pub fn to_json(&self) -> Value {
        let mut row = Map::with_capacity(self.attrs.len() + 1);
        row.insert("id".to_string(), Value::from(self.id));
        for (key, value) in &self.attrs {
            row.insert(key.clone(), value.clone());
        }
        Value::Object(row)
    }
}

/// A single override value: a literal, or a record for a belongsTo field
#[derive(Debug, Clone, PartialEq)]
pub enum Override {
    Value(Value),
    Record(Record),
}

impl Override {
    /// Collapse into a JSON value for storage in a plain attribute
    pub fn into_value(self) -> Value {
        match self {
            Override::Value(value) => value,
            Override::Record(record) => record.to_json(),
        }
    }
}

impl From<Value> for Override {
    fn from(value: Value) -> Self {
        Override::Value(value)
    }
}

impl From<Record> for Override {
    fn from(record: Record) -> Self {
        Override::Record(record)
    }
}

impl From<&Record> for Override {
    fn from(record: &Record) -> Self {
        Override::Record(record.clone())
    }
}

impl From<&str> for Override {
    fn from(value: &str) -> Self {
        Override::Value(Value::from(value))
    }
}

impl From<String> for Override {
    fn from(value: String) -> Self {
        Override::Value(Value::from(value))
    }
}

impl From<u64> for Override {
    fn from(value: u64) -> Self {
        Override::Value(Value::from(value))
    }
}

impl From<i64> for Override {
    fn from(value: i64) -> Self {
        Override::Value(Value::from(value))
    }
}

impl From<bool> for Override {
    fn from(value: bool) -> Self {
        Override::Value(Value::from(value))
    }
}

/// Attribute and relationship overrides passed to `create`/`create_list`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    entries: BTreeMap<String, Override>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an override
    pub fn with(mut self, key: &str, value: impl Into<Override>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Override>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Override> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Override> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Override)> {
        self.entries.iter()
    }

    /// Build overrides from a JSON object; other JSON values yield no overrides
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => map.into_iter().collect(),
            _ => Self::default(),
        }
    }
}

impl FromIterator<(String, Value)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key, Override::Value(value)))
                .collect(),
        }
    }
}

impl IntoIterator for Overrides {
    type Item = (String, Override);
    type IntoIter = std::collections::btree_map::IntoIter<String, Override>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn author() -> Record {
        let mut attrs = Attributes::new();
        attrs.insert("name".to_string(), json!("Zelda"));
        Record::new("author", 3, attrs)
    }

    #[test]
    fn test_record_accessors() {
        let record = author();
        assert_eq!(record.model(), "author");
        assert_eq!(record.id(), 3);
        assert_eq!(record.get_str("name"), Some("Zelda"));
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn test_to_json_includes_id() {
        assert_eq!(author().to_json(), json!({ "id": 3, "name": "Zelda" }));
    }

    #[test]
    fn test_references() {
        let mut attrs = Attributes::new();
        attrs.insert("authorId".to_string(), json!(3));
        let post = Record::new("post", 1, attrs);

        assert!(post.references("authorId", 3));
        assert!(!post.references("authorId", 4));
        assert!(!post.references("editorId", 3));
    }

    #[test]
    fn test_overrides_from_json() {
        let overrides = Overrides::from_json(json!({ "title": "Hello", "authorId": 1 }));
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("title"), Some(&Override::Value(json!("Hello"))));

        assert!(Overrides::from_json(json!([1, 2])).is_empty());
    }

    #[test]
    fn test_overrides_accept_records() {
        let overrides = Overrides::new().with("author", &author()).with("title", "Hi");
        assert!(matches!(overrides.get("author"), Some(Override::Record(r)) if r.id() == 3));
        assert_eq!(
            Override::from(author()).into_value(),
            json!({ "id": 3, "name": "Zelda" })
        );
    }
}
