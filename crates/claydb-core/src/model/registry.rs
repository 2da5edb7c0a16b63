use crate::model::{entity::EntityMetadata, field::FieldKind};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

///
/// MetadataRegistry
///
/// Table-name-keyed store of entity metadata, cross-linked by the relation
/// resolution pass. Registration is idempotent per table name and re-runs
/// the full pass every time, because a relation registered before its
/// target table exists must be retried once the target appears.
///

#[derive(Debug, Default)]
pub struct MetadataRegistry {
    tables: BTreeMap<String, EntityMetadata>,
    /// (owning table, relation property) pairs whose many-to-one descriptor
    /// has been resolved against its join field and target table.
    resolved: BTreeSet<(String, String)>,
}

impl MetadataRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            resolved: BTreeSet::new(),
        }
    }

    /// Register (or overwrite) one table's metadata, then re-run the
    /// relation resolution pass over every registered table.
    pub fn register(&mut self, metadata: EntityMetadata) {
        let table_name = metadata.table_name.clone();

        // Overwriting drops any resolution derived from the old descriptor.
        if self.tables.contains_key(&table_name) {
            debug!(table = %table_name, "re-registering entity metadata");
            self.resolved
                .retain(|(owning_table, _)| owning_table != &table_name);
        }

        self.tables.insert(table_name, metadata);
        self.resolve_relations();
    }

    #[must_use]
    pub fn get(&self, table_name: &str) -> Option<&EntityMetadata> {
        self.tables.get(table_name)
    }

    /// Whether a many-to-one relation has been resolved.
    #[must_use]
    pub fn is_resolved(&self, table_name: &str, property_name: &str) -> bool {
        self.resolved
            .contains(&(table_name.to_string(), property_name.to_string()))
    }

    // Full resolution pass over every registered table. Idempotent: already
    // resolved relations are skipped, failures are logged and retried on
    // the next registration.
    fn resolve_relations(&mut self) {
        let mut newly_resolved = Vec::new();

        for metadata in self.tables.values() {
            for relation in &metadata.many_to_one {
                let key = (
                    metadata.table_name.clone(),
                    relation.property_name.clone(),
                );
                if self.resolved.contains(&key) {
                    continue;
                }

                let join_field = metadata.field(&relation.join_property_name);
                match join_field {
                    None => {
                        warn!(
                            table = %metadata.table_name,
                            relation = %relation.property_name,
                            join_property = %relation.join_property_name,
                            "many-to-one join property not found on owning table"
                        );
                        continue;
                    }
                    Some(field) if field.kind != FieldKind::JoinedEntity => {
                        warn!(
                            table = %metadata.table_name,
                            relation = %relation.property_name,
                            join_property = %relation.join_property_name,
                            "many-to-one join property is not tagged as a joined entity"
                        );
                        continue;
                    }
                    Some(_) => {}
                }

                if !self.tables.contains_key(&relation.mapped_table) {
                    warn!(
                        table = %metadata.table_name,
                        relation = %relation.property_name,
                        target = %relation.mapped_table,
                        "many-to-one target table has not registered yet"
                    );
                    continue;
                }

                newly_resolved.push(key);
            }
        }

        self.resolved.extend(newly_resolved);
    }
}

/// TESTS
///
