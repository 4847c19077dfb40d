//! Relationship metadata - declarations attached to a model definition

use serde::{Deserialize, Serialize};

use crate::inflector::{camelize, Inflector};

/// Defines the type of relationship between models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// Many-to-one; the foreign key lives on this model
    BelongsTo,
    /// One-to-many; derived from the target's foreign key
    HasMany,
}

impl RelationshipKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BelongsTo => "belongsTo",
            Self::HasMany => "hasMany",
        }
    }

    /// Returns true if this relationship returns a collection
    pub fn is_collection(self) -> bool {
        matches!(self, Self::HasMany)
    }
}

/// A relationship as written at registration time.
///
/// `target` and `foreign_key` are optional; [`RelationshipDeclaration::resolve`]
/// fills them in from the relationship name.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipDeclaration {
    pub kind: RelationshipKind,
    pub name: String,
    pub target: Option<String>,
    pub foreign_key: Option<String>,
}

impl RelationshipDeclaration {
    pub fn belongs_to(name: impl Into<String>) -> Self {
        Self {
            kind: RelationshipKind::BelongsTo,
            name: name.into(),
            target: None,
            foreign_key: None,
        }
    }

    pub fn has_many(name: impl Into<String>) -> Self {
        Self {
            kind: RelationshipKind::HasMany,
            name: name.into(),
            target: None,
            foreign_key: None,
        }
    }

    /// Point the relationship at a model whose name differs from the relationship name
    pub fn model(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Use a custom foreign key field
    pub fn foreign_key(mut self, field: impl Into<String>) -> Self {
        self.foreign_key = Some(field.into());
        self
    }

    /// Resolve names against the owning model.
    ///
    /// belongsTo `author` on `post` targets `author` through `post.authorId`;
    /// hasMany `posts` on `author` targets `post` through `post.authorId`.
    pub fn resolve(&self, owner: &str, inflector: &dyn Inflector, fk_suffix: &str) -> Relationship {
        let name = camelize(&self.name);
        let target = match (&self.target, self.kind) {
            (Some(target), _) => camelize(target),
            (None, RelationshipKind::BelongsTo) => name.clone(),
            (None, RelationshipKind::HasMany) => inflector.singularize(&name),
        };
        let foreign_key = match (&self.foreign_key, self.kind) {
            (Some(field), _) => field.clone(),
            (None, RelationshipKind::BelongsTo) => format!("{}{}", name, fk_suffix),
            (None, RelationshipKind::HasMany) => format!("{}{}", owner, fk_suffix),
        };

        Relationship {
            kind: self.kind,
            name,
            target,
            foreign_key,
            explicit_key: self.foreign_key.is_some(),
        }
    }
}

/// A fully resolved relationship.
///
/// For belongsTo, `foreign_key` is a field on the owning record; for hasMany
/// it is a field on the target records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub kind: RelationshipKind,
    pub name: String,
    pub target: String,
    pub foreign_key: String,
    /// The foreign key was given with `.foreign_key(..)` rather than inferred
    #[serde(default)]
    pub explicit_key: bool,
}

impl Relationship {
    pub fn is_belongs_to(&self) -> bool {
        self.kind == RelationshipKind::BelongsTo
    }

    pub fn is_has_many(&self) -> bool {
        self.kind == RelationshipKind::HasMany
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inflector::EnglishInflector;

    #[test]
    fn test_belongs_to_defaults() {
        let inflector = EnglishInflector::new();
        let rel = RelationshipDeclaration::belongs_to("author").resolve("post", &inflector, "Id");

        assert_eq!(rel.kind, RelationshipKind::BelongsTo);
        assert_eq!(rel.target, "author");
        assert_eq!(rel.foreign_key, "authorId");
        assert!(rel.is_belongs_to());
    }

    #[test]
    fn test_has_many_defaults() {
        let inflector = EnglishInflector::new();
        let rel = RelationshipDeclaration::has_many("posts").resolve("author", &inflector, "Id");

        assert_eq!(rel.target, "post");
        assert_eq!(rel.foreign_key, "authorId");
        assert!(rel.kind.is_collection());
        assert!(!rel.explicit_key);
    }

    #[test]
    fn test_explicit_model_and_key() {
        let inflector = EnglishInflector::new();
        let rel = RelationshipDeclaration::belongs_to("writer")
            .model("author")
            .foreign_key("writer_id")
            .resolve("post", &inflector, "Id");

        assert_eq!(rel.name, "writer");
        assert_eq!(rel.target, "author");
        assert_eq!(rel.foreign_key, "writer_id");
        assert!(rel.explicit_key);
    }

    #[test]
    fn test_compound_names() {
        let inflector = EnglishInflector::new();
        let rel = RelationshipDeclaration::has_many("blog-posts").resolve("author", &inflector, "Id");
        assert_eq!(rel.name, "blogPosts");
        assert_eq!(rel.target, "blogPost");

        let rel = RelationshipDeclaration::belongs_to("blog-post").resolve("comment", &inflector, "_id");
        assert_eq!(rel.foreign_key, "blogPost_id");
    }
}
