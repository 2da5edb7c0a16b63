mod populate;

#[cfg(test)]
mod tests;

use crate::persister::Persister;
use claydb_core::{
    EntityMetadata, Error, MetadataRegistry, Record, Sort, Value, Where, value::value_eq,
};
use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

///
/// MemoryRow
///
/// One stored (id, owned-entity-clone) pair.
///

#[derive(Clone, Debug)]
pub(crate) struct MemoryRow {
    pub(crate) id: Value,
    pub(crate) value: Record,
}

///
/// MemoryStore
///
/// Tables, metadata registry, and the id sequence, guarded together so
/// every persister operation is atomic.
///

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub(crate) tables: BTreeMap<String, Vec<MemoryRow>>,
    pub(crate) registry: MetadataRegistry,
    id_sequence: u64,
}

impl MemoryStore {
    /// Rows of one table, empty when the table does not exist yet.
    pub(crate) fn rows(&self, table_name: &str) -> &[MemoryRow] {
        self.tables.get(table_name).map_or(&[], Vec::as_slice)
    }

    // Monotonic per-store sequence. Owned by the store instance so
    // independent stores in tests never share sequence state.
    fn next_id(&mut self) -> Value {
        self.id_sequence += 1;
        Value::Uint(self.id_sequence)
    }
}

///
/// MemoryPersister
///
/// In-memory `Persister`: one ordered row list per table, created lazily.
/// Every read and write clones at the boundary, so callers can never mutate
/// stored state through a returned entity.
///
/// The single mutex makes each operation atomic on a multi-threaded
/// runtime, closing the gap between the duplicate-id check and the append
/// in `insert`, and between the existence check and the write in `save`.
///

#[derive(Debug, Default)]
pub struct MemoryPersister {
    store: Mutex<MemoryStore>,
}

impl MemoryPersister {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, MemoryStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Persister for MemoryPersister {
    fn setup_entity_metadata(&self, metadata: &EntityMetadata) -> Result<(), Error> {
        self.store().registry.register(metadata.clone());
        Ok(())
    }

    fn count(&self, metadata: &EntityMetadata, condition: Option<&Where>) -> Result<u64, Error> {
        let store = self.store();
        let matches = filtered(&store, metadata, condition)?;

        Ok(matches.len() as u64)
    }

    fn exists_by(&self, metadata: &EntityMetadata, condition: &Where) -> Result<bool, Error> {
        condition.validate()?;
        let store = self.store();

        Ok(store
            .rows(&metadata.table_name)
            .iter()
            .any(|row| condition.matches(&row.value)))
    }

    fn delete_all(
        &self,
        metadata: &EntityMetadata,
        condition: Option<&Where>,
    ) -> Result<(), Error> {
        let mut store = self.store();

        match condition {
            // No predicate drops the whole table.
            None => {
                store.tables.remove(&metadata.table_name);
            }
            Some(condition) => {
                condition.validate()?;
                if let Some(table) = store.tables.get_mut(&metadata.table_name) {
                    table.retain(|row| !condition.matches(&row.value));
                }
            }
        }

        Ok(())
    }

    fn find_all(
        &self,
        metadata: &EntityMetadata,
        condition: Option<&Where>,
        sort: Option<&Sort>,
    ) -> Result<Vec<Record>, Error> {
        let store = self.store();
        let mut matches = filtered(&store, metadata, condition)?;

        if let Some(sort) = sort {
            sort.validate()?;
            // Stable sort: tied rows keep insertion order.
            matches.sort_by(|left, right| sort.compare(left, right));
        }

        matches
            .into_iter()
            .map(|entity| populate::populate(&store, metadata, entity))
            .collect()
    }

    fn find_by(
        &self,
        metadata: &EntityMetadata,
        condition: &Where,
        sort: Option<&Sort>,
    ) -> Result<Option<Record>, Error> {
        let store = self.store();
        let mut matches = filtered(&store, metadata, Some(condition))?;

        if let Some(sort) = sort {
            sort.validate()?;
            matches.sort_by(|left, right| sort.compare(left, right));
        }

        match matches.into_iter().next() {
            Some(entity) => populate::populate(&store, metadata, entity).map(Some),
            None => Ok(None),
        }
    }

    fn insert(&self, metadata: &EntityMetadata, entities: Vec<Record>) -> Result<Record, Error> {
        let mut store = self.store();

        // Id set of current rows, extended per batch entity so a batch
        // cannot create duplicates against itself either. Nothing is
        // appended until the whole batch has validated.
        let mut ids: Vec<Value> = store
            .rows(&metadata.table_name)
            .iter()
            .map(|row| row.id.clone())
            .collect();

        let mut pending = Vec::with_capacity(entities.len());
        for mut entity in entities {
            let id = match metadata.id_of(&entity) {
                Some(id) => id.clone(),
                None => {
                    let id = store.next_id();
                    entity.insert(metadata.id_property_name.clone(), id.clone());
                    id
                }
            };

            if ids.iter().any(|existing| value_eq(existing, &id)) {
                return Err(Error::duplicate_id(&metadata.table_name, &id));
            }

            ids.push(id.clone());
            pending.push(MemoryRow { id, value: entity });
        }

        // Only the first entity of a batch is returned. Historical
        // contract; callers depend on the single-entity return shape.
        let first = pending
            .first()
            .map(|row| row.value.clone())
            .ok_or_else(|| Error::invalid_argument("insert requires at least one entity"))?;

        store
            .tables
            .entry(metadata.table_name.clone())
            .or_default()
            .extend(pending);

        populate::populate(&store, metadata, first)
    }

    fn update(&self, metadata: &EntityMetadata, entity: Record) -> Result<Record, Error> {
        let id = metadata.id_of(&entity).cloned().ok_or_else(|| {
            Error::missing_id_property(&metadata.table_name, &metadata.id_property_name)
        })?;

        let mut store = self.store();
        let table = store.tables.entry(metadata.table_name.clone()).or_default();

        // Upsert: replace the stored value, or append for an unknown id.
        match table.iter_mut().find(|row| value_eq(&row.id, &id)) {
            Some(row) => row.value = entity.clone(),
            None => table.push(MemoryRow {
                id,
                value: entity.clone(),
            }),
        }

        populate::populate(&store, metadata, entity)
    }

    fn update_existing(
        &self,
        metadata: &EntityMetadata,
        entity: Record,
    ) -> Result<Record, Error> {
        let id = metadata.id_of(&entity).cloned().ok_or_else(|| {
            Error::missing_id_property(&metadata.table_name, &metadata.id_property_name)
        })?;

        // One lock acquisition covers the lookup and the write.
        let mut store = self.store();
        let row = store
            .tables
            .get_mut(&metadata.table_name)
            .and_then(|table| table.iter_mut().find(|row| value_eq(&row.id, &id)))
            .ok_or_else(|| Error::entity_not_found(&metadata.table_name, &id))?;
        row.value = entity.clone();

        populate::populate(&store, metadata, entity)
    }

    fn destroy(&self) {
        self.store().tables.clear();
    }
}

// Shared read path: validate the condition, then clone every matching row.
fn filtered(
    store: &MemoryStore,
    metadata: &EntityMetadata,
    condition: Option<&Where>,
) -> Result<Vec<Record>, Error> {
    if let Some(condition) = condition {
        condition.validate()?;
    }

    Ok(store
        .rows(&metadata.table_name)
        .iter()
        .filter(|row| condition.is_none_or(|condition| condition.matches(&row.value)))
        .map(|row| row.value.clone())
        .collect())
}
