//! # elif-mock - In-memory record factory for mock backends
//!
//! Creates fixture records for a mock backend: resolves the requested model
//! name, generates attributes from a registered factory (or starts empty),
//! applies overrides, wires belongsTo foreign keys and stores the result in
//! a session-scoped in-memory store.
//!
//! ## Features
//!
//! - **Name resolution**: `contacts`, `amazing-contact` and uncountable nouns
//!   all map to the registered model, with an advisory warning for plurals
//! - **Factories**: constant and index-aware attribute generators
//! - **Bare models**: models without a factory are created with empty attributes
//! - **Relationships**: belongsTo by record or raw id, hasMany computed on read
//!
//! ## Quick Start
//!
//! ```rust
//! use elif_mock::prelude::*;
//!
//! let mut server = MockServer::builder()
//!     .model("post", ModelDefinition::new().belongs_to("author"))
//!     .model("author", ModelDefinition::new().has_many("posts"))
//!     .factory("author", FactoryDefinition::new().attr("name", "Zelda"))
//!     .build()
//!     .unwrap();
//!
//! let author = server.create("author", Overrides::new()).unwrap();
//! let post = server.create("post", Overrides::new().with("author", &author)).unwrap();
//!
//! assert_eq!(post.get("authorId"), Some(&json!(author.id())));
//! assert_eq!(server.relations(&author).has_many("posts").unwrap().len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod inflector;
pub mod logging;
pub mod names;
pub mod record;
pub mod registry;
pub mod relationships;
pub mod reporter;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigError, Environment, MockConfig};
pub use error::{Method, MockError, MockResult};
pub use factory::{AttributeGenerator, FactoryDefinition, FactoryRegistry, Sequence};
pub use inflector::{EnglishInflector, Inflector};
pub use record::{Attributes, Override, Overrides, Record};
pub use registry::{ModelDefinition, ModelRegistry, TypeResolution};
pub use reporter::{CapturingReporter, NoopReporter, TracingReporter, WarningReporter};
pub use server::{MockServer, MockServerBuilder};
pub use store::{Collection, InMemoryStore};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        config::MockConfig,
        error::{MockError, MockResult},
        factory::{FactoryDefinition, Sequence},
        inflector::EnglishInflector,
        record::{Overrides, Record},
        registry::ModelDefinition,
        relationships::RelationshipDeclaration,
        reporter::CapturingReporter,
        server::MockServer,
    };

    pub use serde_json::{json, Value as JsonValue};
}
