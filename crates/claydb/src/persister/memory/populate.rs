//! Relation population for entities leaving the memory store.
//!
//! Population is one level deep only: related entities are "simplified"
//! (their own relation properties stripped) and never expanded further,
//! which keeps cyclic relation graphs from recursing.

use crate::persister::memory::MemoryStore;
use claydb_core::{EntityMetadata, Error, FieldKind, Record, Value, value::value_eq};

/// Strip relation-materialization properties from the raw stored clone,
/// then re-derive them from current store state.
pub(super) fn populate(
    store: &MemoryStore,
    metadata: &EntityMetadata,
    entity: Record,
) -> Result<Record, Error> {
    let mut entity = simplify(metadata, entity);

    populate_one_to_many(store, metadata, &mut entity)?;
    populate_many_to_one(store, metadata, &mut entity)?;

    Ok(entity)
}

// Drop joined-entity materializations so stale nested clones in the
// stored raw value never reach the caller.
fn simplify(metadata: &EntityMetadata, mut entity: Record) -> Record {
    for property in metadata.relation_property_names() {
        entity.remove(property);
    }

    entity
}

fn populate_one_to_many(
    store: &MemoryStore,
    metadata: &EntityMetadata,
    entity: &mut Record,
) -> Result<(), Error> {
    for relation in &metadata.one_to_many {
        let target = store.registry.get(&relation.mapped_table).ok_or_else(|| {
            Error::unresolved_relation(
                &metadata.table_name,
                &relation.property_name,
                format!("target table '{}' is not registered", relation.mapped_table),
            )
        })?;

        let join_field = target
            .field(&relation.mapped_by)
            .filter(|field| field.kind == FieldKind::JoinedEntity)
            .ok_or_else(|| {
                Error::unresolved_relation(
                    &metadata.table_name,
                    &relation.property_name,
                    format!(
                        "join property '{}' on '{}' is missing or not a joined entity",
                        relation.mapped_by, relation.mapped_table
                    ),
                )
            })?;

        let Some(id) = metadata.id_of(entity).cloned() else {
            entity.insert(relation.property_name.clone(), Value::List(vec![]));
            continue;
        };

        let related: Vec<Value> = store
            .rows(&relation.mapped_table)
            .iter()
            .filter(|row| {
                row.value
                    .get(&join_field.property_name)
                    .is_some_and(|join_value| value_eq(join_value, &id))
            })
            .map(|row| Value::Record(simplify(target, row.value.clone())))
            .collect();

        entity.insert(relation.property_name.clone(), Value::List(related));
    }

    Ok(())
}

fn populate_many_to_one(
    store: &MemoryStore,
    metadata: &EntityMetadata,
    entity: &mut Record,
) -> Result<(), Error> {
    for relation in &metadata.many_to_one {
        if !store
            .registry
            .is_resolved(&metadata.table_name, &relation.property_name)
        {
            return Err(Error::unresolved_relation(
                &metadata.table_name,
                &relation.property_name,
                "relation did not resolve during metadata registration",
            ));
        }

        let target = store.registry.get(&relation.mapped_table).ok_or_else(|| {
            Error::unresolved_relation(
                &metadata.table_name,
                &relation.property_name,
                format!("target table '{}' is not registered", relation.mapped_table),
            )
        })?;

        // An empty join column means no parent; the relation property stays
        // absent rather than erroring.
        let Some(join_value) = entity
            .get(&relation.join_property_name)
            .filter(|value| !value.is_empty_id())
            .cloned()
        else {
            continue;
        };

        // A deleted parent also leaves the property absent.
        if let Some(row) = store
            .rows(&relation.mapped_table)
            .iter()
            .find(|row| value_eq(&row.id, &join_value))
        {
            entity.insert(
                relation.property_name.clone(),
                Value::Record(simplify(target, row.value.clone())),
            );
        }
    }

    Ok(())
}
