pub mod memory;
pub mod mock;

use claydb_core::{EntityMetadata, Error, Record, Sort, Where};

///
/// Persister
///
/// The storage contract every backend satisfies. The repository layer only
/// speaks this interface; memory, mock, HTTP, and SQL backends are
/// interchangeable behind it.
///
/// Entities cross this boundary by value: implementations own their stored
/// copies and must never return anything aliasing internal state.
///

pub trait Persister: Send + Sync {
    /// Register one entity's metadata with the backend. Idempotent per
    /// table name; re-runs relation resolution across all known tables.
    fn setup_entity_metadata(&self, metadata: &EntityMetadata) -> Result<(), Error>;

    /// Count entities matching the condition (all entities when `None`).
    fn count(&self, metadata: &EntityMetadata, condition: Option<&Where>) -> Result<u64, Error>;

    /// Whether at least one entity matches the condition.
    fn exists_by(&self, metadata: &EntityMetadata, condition: &Where) -> Result<bool, Error>;

    /// Delete matching entities; with no condition, drop the whole table.
    fn delete_all(&self, metadata: &EntityMetadata, condition: Option<&Where>)
    -> Result<(), Error>;

    /// All matching entities, relation-populated, in stored order unless
    /// sorted.
    fn find_all(
        &self,
        metadata: &EntityMetadata,
        condition: Option<&Where>,
        sort: Option<&Sort>,
    ) -> Result<Vec<Record>, Error>;

    /// First matching entity, relation-populated.
    fn find_by(
        &self,
        metadata: &EntityMetadata,
        condition: &Where,
        sort: Option<&Sort>,
    ) -> Result<Option<Record>, Error>;

    /// Insert one or more entities; assigns ids where empty.
    ///
    /// Returns only the **first** inserted entity even for a batch. This
    /// mirrors the historical contract; callers depend on the single-entity
    /// return shape.
    fn insert(&self, metadata: &EntityMetadata, entities: Vec<Record>) -> Result<Record, Error>;

    /// Replace the stored entity with the same id, or append as a new row
    /// when the id is unknown (upsert).
    fn update(&self, metadata: &EntityMetadata, entity: Record) -> Result<Record, Error>;

    /// Replace the stored entity with the same id, failing with
    /// `EntityNotFound` when no such row exists. The existence check and
    /// the write happen inside one operation, so a concurrent delete can
    /// never turn the failure path into an append.
    fn update_existing(&self, metadata: &EntityMetadata, entity: Record)
    -> Result<Record, Error>;

    /// Drop all backend state.
    fn destroy(&self);
}
