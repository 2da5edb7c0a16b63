use crate::persister::{Persister, memory::MemoryPersister};
use claydb_core::{
    EntityField, EntityMetadata, Error, FieldKind, ManyToOne, OneToMany, Record, Sort, Value, Where,
};
use serde_json::json;

fn bar_metadata() -> EntityMetadata {
    EntityMetadata::new(
        "bars",
        "barId",
        vec![
            EntityField::new("barId", "bar_id", FieldKind::Uint),
            EntityField::new("barName", "bar_name", FieldKind::Text),
            EntityField::new("barDate", "bar_date", FieldKind::Text),
        ],
        vec![],
        vec![],
    )
    .unwrap()
}

fn cart_metadata() -> EntityMetadata {
    EntityMetadata::new(
        "carts",
        "cartId",
        vec![EntityField::new("cartId", "cart_id", FieldKind::Uint)],
        vec![OneToMany::new("cartItems", "cartId", "cart_items")],
        vec![],
    )
    .unwrap()
}

fn cart_item_metadata() -> EntityMetadata {
    EntityMetadata::new(
        "cart_items",
        "cartItemId",
        vec![
            EntityField::new("cartItemId", "cart_item_id", FieldKind::Uint),
            EntityField::new("cartId", "cart_id", FieldKind::JoinedEntity),
            EntityField::new("name", "name", FieldKind::Text),
        ],
        vec![],
        vec![ManyToOne::new("cart", "carts", "cartId")],
    )
    .unwrap()
}

fn record(value: serde_json::Value) -> Record {
    Record::try_from(value).unwrap()
}

fn id_condition(metadata: &EntityMetadata, id: impl Into<Value>) -> Where {
    Where::property_equals(metadata.id_property_name.clone(), id)
}

#[test]
fn insert_then_find_round_trips_scalar_fields() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    let entity = record(json!({"barId": 7, "barName": "seven", "barDate": "2023-04-30"}));
    let inserted = persister.insert(&metadata, vec![entity.clone()]).unwrap();
    assert_eq!(inserted, entity);

    let found = persister
        .find_by(&metadata, &id_condition(&metadata, 7_u64), None)
        .unwrap();
    assert_eq!(found, Some(entity));
}

#[test]
fn absent_table_reads_as_empty_not_error() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    assert_eq!(persister.find_all(&metadata, None, None).unwrap(), vec![]);
    assert_eq!(persister.count(&metadata, None).unwrap(), 0);
    assert!(
        !persister
            .exists_by(&metadata, &id_condition(&metadata, 1_u64))
            .unwrap()
    );
}

#[test]
fn generated_ids_are_monotonic_and_per_instance() {
    let metadata = bar_metadata();

    let first_store = MemoryPersister::new();
    let a = first_store
        .insert(&metadata, vec![record(json!({"barName": "a"}))])
        .unwrap();
    let b = first_store
        .insert(&metadata, vec![record(json!({"barName": "b"}))])
        .unwrap();
    assert_eq!(a.get("barId"), Some(&Value::Uint(1)));
    assert_eq!(b.get("barId"), Some(&Value::Uint(2)));

    // A second store starts its own sequence.
    let second_store = MemoryPersister::new();
    let c = second_store
        .insert(&metadata, vec![record(json!({"barName": "c"}))])
        .unwrap();
    assert_eq!(c.get("barId"), Some(&Value::Uint(1)));
}

#[test]
fn caller_supplied_ids_are_kept() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    let inserted = persister
        .insert(&metadata, vec![record(json!({"barId": "custom", "barName": "x"}))])
        .unwrap();
    assert_eq!(inserted.get("barId"), Some(&Value::Text("custom".to_string())));
}

#[test]
fn sequential_duplicate_id_is_rejected() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    persister
        .insert(&metadata, vec![record(json!({"barId": 1, "barName": "first"}))])
        .unwrap();
    let err = persister
        .insert(&metadata, vec![record(json!({"barId": 1, "barName": "second"}))])
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateId { .. }));
}

#[test]
fn batch_duplicate_id_is_rejected_and_nothing_is_appended() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    let err = persister
        .insert(
            &metadata,
            vec![
                record(json!({"barId": 1, "barName": "first"})),
                record(json!({"barId": 1, "barName": "second"})),
            ],
        )
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateId { .. }));
    assert_eq!(persister.count(&metadata, None).unwrap(), 0);
}

#[test]
fn batch_insert_returns_only_the_first_entity() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    let inserted = persister
        .insert(
            &metadata,
            vec![
                record(json!({"barName": "first"})),
                record(json!({"barName": "second"})),
            ],
        )
        .unwrap();
    assert_eq!(inserted.get("barName"), Some(&Value::Text("first".to_string())));
    assert_eq!(persister.count(&metadata, None).unwrap(), 2);
}

#[test]
fn insert_of_nothing_is_an_invalid_argument() {
    let persister = MemoryPersister::new();
    let err = persister.insert(&bar_metadata(), vec![]).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn returned_entities_never_alias_stored_state() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    let mut inserted = persister
        .insert(&metadata, vec![record(json!({"barId": 1, "barName": "original"}))])
        .unwrap();
    inserted.insert("barName".to_string(), Value::Text("mutated".to_string()));

    let mut fetched = persister
        .find_by(&metadata, &id_condition(&metadata, 1_u64), None)
        .unwrap()
        .unwrap();
    assert_eq!(fetched.get("barName"), Some(&Value::Text("original".to_string())));

    // Mutating a fetched entity must not change a later fetch either.
    fetched.insert("barName".to_string(), Value::Text("mutated again".to_string()));
    let refetched = persister
        .find_by(&metadata, &id_condition(&metadata, 1_u64), None)
        .unwrap()
        .unwrap();
    assert_eq!(refetched.get("barName"), Some(&Value::Text("original".to_string())));
}

#[test]
fn update_replaces_the_stored_value() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    persister
        .insert(&metadata, vec![record(json!({"barId": 1, "barName": "before"}))])
        .unwrap();
    let updated = persister
        .update(&metadata, record(json!({"barId": 1, "barName": "after"})))
        .unwrap();
    assert_eq!(updated.get("barName"), Some(&Value::Text("after".to_string())));

    assert_eq!(persister.count(&metadata, None).unwrap(), 1);
    let fetched = persister
        .find_by(&metadata, &id_condition(&metadata, 1_u64), None)
        .unwrap()
        .unwrap();
    assert_eq!(fetched.get("barName"), Some(&Value::Text("after".to_string())));
}

#[test]
fn update_with_unknown_id_appends_as_new_row() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    persister
        .update(&metadata, record(json!({"barId": 99, "barName": "upserted"})))
        .unwrap();
    assert_eq!(persister.count(&metadata, None).unwrap(), 1);
}

#[test]
fn update_existing_replaces_known_rows_and_rejects_unknown_ids() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    persister
        .insert(&metadata, vec![record(json!({"barId": 1, "barName": "before"}))])
        .unwrap();
    let updated = persister
        .update_existing(&metadata, record(json!({"barId": 1, "barName": "after"})))
        .unwrap();
    assert_eq!(updated.get("barName"), Some(&Value::Text("after".to_string())));

    // Once the row is deleted, the failure path must not append anything.
    persister
        .delete_all(&metadata, Some(&id_condition(&metadata, 1_u64)))
        .unwrap();
    let err = persister
        .update_existing(&metadata, record(json!({"barId": 1, "barName": "ghost"})))
        .unwrap_err();
    assert!(matches!(err, Error::EntityNotFound { .. }));
    assert_eq!(persister.count(&metadata, None).unwrap(), 0);
}

#[test]
fn update_without_id_fails() {
    let persister = MemoryPersister::new();
    let err = persister
        .update(&bar_metadata(), record(json!({"barName": "no id"})))
        .unwrap_err();
    assert!(matches!(err, Error::MissingIdProperty { .. }));
}

#[test]
fn delete_all_without_condition_drops_the_table() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    persister
        .insert(
            &metadata,
            vec![
                record(json!({"barName": "a"})),
                record(json!({"barName": "b"})),
            ],
        )
        .unwrap();
    persister.delete_all(&metadata, None).unwrap();
    assert_eq!(persister.count(&metadata, None).unwrap(), 0);
}

#[test]
fn delete_all_with_condition_removes_only_matching_rows() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    persister
        .insert(
            &metadata,
            vec![
                record(json!({"barId": 1, "barName": "keep"})),
                record(json!({"barId": 2, "barName": "drop"})),
            ],
        )
        .unwrap();

    persister
        .delete_all(&metadata, Some(&Where::property_equals("barName", "drop")))
        .unwrap();
    let remaining = persister.find_all(&metadata, None, None).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].get("barName"), Some(&Value::Text("keep".to_string())));

    // A predicate matching nothing leaves the table untouched.
    persister
        .delete_all(&metadata, Some(&Where::property_equals("barName", "none")))
        .unwrap();
    assert_eq!(persister.count(&metadata, None).unwrap(), 1);
}

#[test]
fn malformed_conditions_are_rejected_before_filtering() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();
    let malformed = Where::property_equals("", 1_u64);

    assert!(matches!(
        persister.find_all(&metadata, Some(&malformed), None).unwrap_err(),
        Error::InvalidArgument(_)
    ));
    assert!(matches!(
        persister.delete_all(&metadata, Some(&malformed)).unwrap_err(),
        Error::InvalidArgument(_)
    ));
}

#[test]
fn find_all_applies_filter_then_stable_sort() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    persister
        .insert(
            &metadata,
            vec![
                record(json!({"barId": 1, "barName": "tie", "barDate": "2023-04-30"})),
                record(json!({"barId": 2, "barName": "tie", "barDate": "2023-05-11"})),
                record(json!({"barId": 3, "barName": "solo", "barDate": "2023-05-12"})),
            ],
        )
        .unwrap();

    let ties = persister
        .find_all(
            &metadata,
            Some(&Where::property_equals("barName", "tie")),
            Some(&Sort::by(["barName"])),
        )
        .unwrap();
    let ids: Vec<_> = ties.iter().map(|row| row.get("barId").cloned()).collect();
    assert_eq!(ids, [Some(Value::Uint(1)), Some(Value::Uint(2))]);
}

#[test]
fn one_to_many_population_collects_linked_rows_one_level_deep() {
    let persister = MemoryPersister::new();
    let carts = cart_metadata();
    let items = cart_item_metadata();
    persister.setup_entity_metadata(&carts).unwrap();
    persister.setup_entity_metadata(&items).unwrap();

    persister
        .insert(&carts, vec![record(json!({"cartId": 1}))])
        .unwrap();
    persister
        .insert(
            &items,
            vec![
                record(json!({"cartItemId": 10, "cartId": 1, "name": "first"})),
                record(json!({"cartItemId": 11, "cartId": 1, "name": "second"})),
                record(json!({"cartItemId": 12, "cartId": 2, "name": "other cart"})),
            ],
        )
        .unwrap();

    let cart = persister
        .find_by(&carts, &id_condition(&carts, 1_u64), None)
        .unwrap()
        .unwrap();
    let Some(Value::List(cart_items)) = cart.get("cartItems") else {
        panic!("cartItems should be populated as a list");
    };
    let item_ids: Vec<_> = cart_items
        .iter()
        .map(|item| item.as_record().unwrap().get("cartItemId").cloned())
        .collect();
    assert_eq!(item_ids, [Some(Value::Uint(10)), Some(Value::Uint(11))]);

    // Related entities are simplified: their own relation properties are
    // not expanded further.
    assert!(
        cart_items
            .iter()
            .all(|item| item.as_record().unwrap().get("cart").is_none())
    );
}

#[test]
fn many_to_one_population_attaches_the_parent() {
    let persister = MemoryPersister::new();
    let carts = cart_metadata();
    let items = cart_item_metadata();
    persister.setup_entity_metadata(&carts).unwrap();
    persister.setup_entity_metadata(&items).unwrap();

    persister
        .insert(&carts, vec![record(json!({"cartId": 1}))])
        .unwrap();
    let item = persister
        .insert(
            &items,
            vec![record(json!({"cartItemId": 10, "cartId": 1, "name": "x"}))],
        )
        .unwrap();

    let parent = item.get("cart").and_then(Value::as_record).unwrap();
    assert_eq!(parent.get("cartId"), Some(&Value::Uint(1)));
}

#[test]
fn dangling_many_to_one_leaves_the_relation_absent() {
    let persister = MemoryPersister::new();
    let carts = cart_metadata();
    let items = cart_item_metadata();
    persister.setup_entity_metadata(&carts).unwrap();
    persister.setup_entity_metadata(&items).unwrap();

    persister
        .insert(&carts, vec![record(json!({"cartId": 1}))])
        .unwrap();
    persister
        .insert(
            &items,
            vec![record(json!({"cartItemId": 10, "cartId": 1, "name": "x"}))],
        )
        .unwrap();

    // Delete the parent, then fetch the child: no error, no parent.
    persister
        .delete_all(&carts, Some(&id_condition(&carts, 1_u64)))
        .unwrap();
    let orphan = persister
        .find_by(&items, &id_condition(&items, 10_u64), None)
        .unwrap()
        .unwrap();
    assert_eq!(orphan.get("cart"), None);
    assert_eq!(orphan.get("cartId"), Some(&Value::Uint(1)));
}

#[test]
fn unresolved_relation_surfaces_at_read_time() {
    let persister = MemoryPersister::new();
    let items = cart_item_metadata();
    // Parent table never registers: the relation stays unresolved.
    persister.setup_entity_metadata(&items).unwrap();

    let err = persister
        .insert(
            &items,
            vec![record(json!({"cartItemId": 10, "cartId": 1, "name": "x"}))],
        )
        .unwrap_err();
    assert!(matches!(err, Error::UnresolvedRelation { .. }));
}

#[test]
fn destroy_drops_every_table() {
    let persister = MemoryPersister::new();
    let metadata = bar_metadata();

    persister
        .insert(&metadata, vec![record(json!({"barName": "a"}))])
        .unwrap();
    persister.destroy();
    assert_eq!(persister.count(&metadata, None).unwrap(), 0);
}
