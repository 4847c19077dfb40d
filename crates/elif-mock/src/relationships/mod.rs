//! Relationships - declarations, creation-time resolution and read accessors
//!
//! Only belongsTo is stored (as a foreign key on the owning record). hasMany
//! is always computed by scanning the target collection, so there is no
//! inverse index to keep in sync.

pub mod accessor;
pub mod metadata;
pub mod resolver;

pub use accessor::RecordRelations;
pub use metadata::{Relationship, RelationshipDeclaration, RelationshipKind};
pub use resolver::RelationshipResolver;
