use crate::persister::Persister;
use claydb_core::{EntityMetadata, Error, Record, Sort, Where};
use std::sync::{Mutex, MutexGuard, PoisonError};

///
/// MockCall
///
/// One recorded persister invocation: which method, which table, and the
/// condition/sort it was given.
///

#[derive(Clone, Debug, PartialEq)]
pub struct MockCall {
    pub method: &'static str,
    pub table: String,
    pub condition: Option<Where>,
    pub sort: Option<Sort>,
}

///
/// MockPersister
///
/// Call-recording test double. Serves the same canned entities for every
/// read so repository tests can assert which `Where`/`Sort` a method built
/// without standing up a real store.
///

#[derive(Debug, Default)]
pub struct MockPersister {
    calls: Mutex<Vec<MockCall>>,
    results: Vec<Record>,
}

impl MockPersister {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose read operations return these entities.
    #[must_use]
    pub fn with_results(results: Vec<Record>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            results,
        }
    }

    /// Every call recorded so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().clone()
    }

    #[must_use]
    pub fn last_call(&self) -> Option<MockCall> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<MockCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(
        &self,
        method: &'static str,
        table: &str,
        condition: Option<&Where>,
        sort: Option<&Sort>,
    ) {
        self.lock().push(MockCall {
            method,
            table: table.to_string(),
            condition: condition.cloned(),
            sort: sort.cloned(),
        });
    }
}

impl Persister for MockPersister {
    fn setup_entity_metadata(&self, metadata: &EntityMetadata) -> Result<(), Error> {
        self.record("setup_entity_metadata", &metadata.table_name, None, None);
        Ok(())
    }

    fn count(&self, metadata: &EntityMetadata, condition: Option<&Where>) -> Result<u64, Error> {
        self.record("count", &metadata.table_name, condition, None);
        Ok(self.results.len() as u64)
    }

    fn exists_by(&self, metadata: &EntityMetadata, condition: &Where) -> Result<bool, Error> {
        self.record("exists_by", &metadata.table_name, Some(condition), None);
        Ok(!self.results.is_empty())
    }

    fn delete_all(
        &self,
        metadata: &EntityMetadata,
        condition: Option<&Where>,
    ) -> Result<(), Error> {
        self.record("delete_all", &metadata.table_name, condition, None);
        Ok(())
    }

    fn find_all(
        &self,
        metadata: &EntityMetadata,
        condition: Option<&Where>,
        sort: Option<&Sort>,
    ) -> Result<Vec<Record>, Error> {
        self.record("find_all", &metadata.table_name, condition, sort);
        Ok(self.results.clone())
    }

    fn find_by(
        &self,
        metadata: &EntityMetadata,
        condition: &Where,
        sort: Option<&Sort>,
    ) -> Result<Option<Record>, Error> {
        self.record("find_by", &metadata.table_name, Some(condition), sort);
        Ok(self.results.first().cloned())
    }

    fn insert(&self, metadata: &EntityMetadata, entities: Vec<Record>) -> Result<Record, Error> {
        self.record("insert", &metadata.table_name, None, None);
        entities
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid_argument("insert requires at least one entity"))
    }

    fn update(&self, metadata: &EntityMetadata, entity: Record) -> Result<Record, Error> {
        self.record("update", &metadata.table_name, None, None);
        Ok(entity)
    }

    fn update_existing(
        &self,
        metadata: &EntityMetadata,
        entity: Record,
    ) -> Result<Record, Error> {
        self.record("update_existing", &metadata.table_name, None, None);
        Ok(entity)
    }

    fn destroy(&self) {
        self.record("destroy", "", None, None);
    }
}
