//! Mock server - the entry point for creating records
//!
//! A server owns one session: its registries are fixed when it is built and
//! its store lives until the server is dropped or shut down.

use crate::config::MockConfig;
use crate::error::{Method, MockResult};
use crate::factory::{FactoryDefinition, FactoryRegistry};
use crate::inflector::{camelize, EnglishInflector, Inflector};
use crate::names::{singularized_warning, NameResolver};
use crate::record::{Attributes, Overrides, Record};
use crate::registry::{ModelDefinition, ModelRegistry, TypeResolution};
use crate::relationships::{RecordRelations, RelationshipResolver};
use crate::reporter::{NoopReporter, TracingReporter, WarningReporter};
use crate::store::{Collection, InMemoryStore};

/// Builder for [`MockServer`]
#[derive(Default)]
pub struct MockServerBuilder {
    config: MockConfig,
    inflector: Option<Box<dyn Inflector>>,
    reporter: Option<Box<dyn WarningReporter>>,
    models: Vec<(String, ModelDefinition)>,
    factories: Vec<(String, FactoryDefinition)>,
}

impl MockServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: MockConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the inflection rules; configured extra nouns are then not applied
    pub fn inflector(mut self, inflector: impl Inflector + 'static) -> Self {
        self.inflector = Some(Box::new(inflector));
        self
    }

    /// Where advisory warnings go; defaults follow `MockConfig::log_warnings`
    pub fn reporter(mut self, reporter: impl WarningReporter + 'static) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    pub fn model(mut self, name: &str, definition: ModelDefinition) -> Self {
        self.models.push((name.to_string(), definition));
        self
    }

    pub fn factory(mut self, name: &str, definition: FactoryDefinition) -> Self {
        self.factories.push((name.to_string(), definition));
        self
    }

    /// Validate the configuration and register every model and factory
    pub fn build(self) -> MockResult<MockServer> {
        self.config.validate()?;

        let inflector = self
            .inflector
            .unwrap_or_else(|| Box::new(EnglishInflector::from_config(&self.config)));
        let reporter = self.reporter.unwrap_or_else(|| {
            if self.config.log_warnings {
                Box::new(TracingReporter)
            } else {
                Box::new(NoopReporter)
            }
        });

        let mut models = ModelRegistry::new();
        let mut factories = FactoryRegistry::new();
        let mut store = InMemoryStore::new();

        for (name, definition) in &self.models {
            let canonical = models.register(
                name,
                definition,
                inflector.as_ref(),
                &self.config.foreign_key_suffix,
            );
            store.ensure_collection(&canonical);
        }
        models.link_inverses();
        for (name, definition) in self.factories {
            let canonical = factories.register(&name, definition);
            store.ensure_collection(&canonical);
        }

        tracing::info!(
            environment = %self.config.environment,
            models = models.model_count(),
            factories = factories.factory_count(),
            "mock server ready"
        );

        Ok(MockServer {
            config: self.config,
            inflector,
            reporter,
            models,
            factories,
            store,
        })
    }
}

/// One mock backend session
pub struct MockServer {
    config: MockConfig,
    inflector: Box<dyn Inflector>,
    reporter: Box<dyn WarningReporter>,
    models: ModelRegistry,
    factories: FactoryRegistry,
    store: InMemoryStore,
}

impl MockServer {
    pub fn builder() -> MockServerBuilder {
        MockServerBuilder::new()
    }

    /// Create and persist one record
    pub fn create(&mut self, name: &str, overrides: Overrides) -> MockResult<Record> {
        let canonical = self.resolve_name(Method::Create, name)?;
        Ok(self.insert(&canonical, &overrides))
    }

    /// Create `count` records from the same overrides.
    ///
    /// A pluralized name is reported once for the whole list.
    pub fn create_list(&mut self, name: &str, count: usize, overrides: Overrides) -> MockResult<Vec<Record>> {
        let canonical = self.resolve_name(Method::CreateList, name)?;
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.insert(&canonical, &overrides));
        }
        Ok(records)
    }

    /// Attributes `create` would store next, without inserting anything
    pub fn build(&self, name: &str, overrides: Overrides) -> MockResult<Attributes> {
        let canonical = self.resolve_name(Method::Build, name)?;
        let index = self.store.collection(&canonical).len();
        Ok(self.attributes_for(&canonical, index, &overrides))
    }

    /// Attributes for the next `count` records, without inserting anything
    pub fn build_list(&self, name: &str, count: usize, overrides: Overrides) -> MockResult<Vec<Attributes>> {
        let canonical = self.resolve_name(Method::BuildList, name)?;
        let start = self.store.collection(&canonical).len();
        Ok((start..start + count)
            .map(|index| self.attributes_for(&canonical, index, &overrides))
            .collect())
    }

    /// Relationship accessors for a record created by this server
    pub fn relations<'a>(&'a self, record: &'a Record) -> RecordRelations<'a> {
        RecordRelations::new(record, self.models.get(record.model()), &self.store)
    }

    /// Re-read a record from the store
    pub fn reload(&self, record: &Record) -> Option<Record> {
        self.store.find(record.model(), record.id()).cloned()
    }

    /// Find a record by any accepted spelling of its model name
    pub fn find(&self, name: &str, id: u64) -> Option<&Record> {
        self.store.find(&self.canonical_name(name), id)
    }

    /// Records of a model, by any accepted spelling of its name
    pub fn collection(&self, name: &str) -> &Collection {
        self.store.collection(&self.canonical_name(name))
    }

    /// Database view by collection name, e.g. `db("posts")`
    pub fn db(&self, collection_name: &str) -> Option<&Collection> {
        let wanted = camelize(collection_name);
        self.store
            .collection_names()
            .find(|canonical| self.inflector.pluralize(canonical) == wanted)
            .map(|canonical| self.store.collection(canonical))
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub fn factories(&self) -> &FactoryRegistry {
        &self.factories
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    pub fn inflector(&self) -> &dyn Inflector {
        self.inflector.as_ref()
    }

    /// End the session, discarding every record
    pub fn shutdown(mut self) {
        let records = self.store.record_count();
        self.store.clear();
        tracing::info!(records, "mock server shut down");
    }

    fn canonical_name(&self, name: &str) -> String {
        NameResolver::new(self.inflector.as_ref(), &self.models, &self.factories)
            .normalize(name)
            .canonical
    }

    /// Normalize `requested`, fail when nothing is registered, then report a
    /// singularization. The error always names the caller's spelling.
    fn resolve_name(&self, method: Method, requested: &str) -> MockResult<String> {
        let normalized =
            NameResolver::new(self.inflector.as_ref(), &self.models, &self.factories).normalize(requested);

        TypeResolution::lookup(&self.models, &self.factories, &normalized.canonical)
            .require(method, requested)?;

        if normalized.corrected {
            self.reporter.warn(&singularized_warning(method));
        }
        Ok(normalized.canonical)
    }

    fn attributes_for(&self, canonical: &str, index: usize, overrides: &Overrides) -> Attributes {
        let resolver = RelationshipResolver::new(canonical, self.models.get(canonical));
        let merged = match self.factories.get(canonical) {
            Some(factory) => resolver.merge(factory.build(index), factory.default_relationships(), overrides),
            None => resolver.merge(Attributes::new(), std::iter::empty(), overrides),
        };
        resolver.resolve(merged)
    }

    fn insert(&mut self, canonical: &str, overrides: &Overrides) -> Record {
        let index = self.store.collection(canonical).len();
        let attrs = self.attributes_for(canonical, index, overrides);
        let record = self.store.insert(canonical, attrs);
        tracing::debug!(model = canonical, id = record.id(), "record created");
        record
    }
}
