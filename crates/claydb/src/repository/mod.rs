mod methods;


use crate::persister::Persister;
use claydb_core::{EntityMetadata, Error, Record, Sort, Value, Where};
use methods::{Finder, FinderVerb};
use std::{collections::BTreeMap, sync::Arc};

///
/// CallOutcome
///
/// Result shape of one dispatched finder call, keyed by the verb.
///

#[derive(Clone, Debug, PartialEq)]
pub enum CallOutcome {
    Entities(Vec<Record>),
    Entity(Option<Record>),
    Bool(bool),
    Count(u64),
    Unit,
}

impl CallOutcome {
    #[must_use]
    pub fn into_entities(self) -> Option<Vec<Record>> {
        match self {
            Self::Entities(entities) => Some(entities),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_entity(self) -> Option<Record> {
        match self {
            Self::Entity(entity) => entity,
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_count(&self) -> Option<u64> {
        match self {
            Self::Count(value) => Some(*value),
            _ => None,
        }
    }
}

///
/// CrudRepository
///
/// Typed façade over one persister bound to one entity's metadata: id-based
/// and whole-collection CRUD plus the synthesized per-field finders,
/// exposed through name-based dispatch.
///
/// Construction registers the metadata with the persister and builds the
/// finder table once; both are deterministic given the same metadata.
///

pub struct CrudRepository {
    persister: Arc<dyn Persister>,
    metadata: EntityMetadata,
    finders: BTreeMap<String, Finder>,
}

impl CrudRepository {
    pub fn new(persister: Arc<dyn Persister>, metadata: EntityMetadata) -> Result<Self, Error> {
        persister.setup_entity_metadata(&metadata)?;
        let finders = methods::synthesize(&metadata);

        Ok(Self {
            persister,
            metadata,
            finders,
        })
    }

    #[must_use]
    pub const fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    /// Synthesized finder names, sorted.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.finders.keys().map(String::as_str)
    }

    // ─────────────────────────────────────────────────────────────
    // Base operations
    // ─────────────────────────────────────────────────────────────

    pub fn find_all(&self) -> Result<Vec<Record>, Error> {
        self.persister.find_all(&self.metadata, None, None)
    }

    pub fn find_all_sorted(&self, sort: &Sort) -> Result<Vec<Record>, Error> {
        self.persister.find_all(&self.metadata, None, Some(sort))
    }

    pub fn find_by_id(&self, id: impl Into<Value>) -> Result<Option<Record>, Error> {
        self.persister
            .find_by(&self.metadata, &self.id_condition(id.into()), None)
    }

    pub fn find_all_by_id(
        &self,
        ids: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Result<Vec<Record>, Error> {
        let condition =
            Where::property_list_equals(self.metadata.id_property_name.clone(), ids);
        self.persister.find_all(&self.metadata, Some(&condition), None)
    }

    pub fn exists_by_id(&self, id: impl Into<Value>) -> Result<bool, Error> {
        self.persister
            .exists_by(&self.metadata, &self.id_condition(id.into()))
    }

    pub fn count(&self) -> Result<u64, Error> {
        self.persister.count(&self.metadata, None)
    }

    pub fn delete_by_id(&self, id: impl Into<Value>) -> Result<(), Error> {
        self.persister
            .delete_all(&self.metadata, Some(&self.id_condition(id.into())))
    }

    pub fn delete_all_by_id(
        &self,
        ids: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Result<(), Error> {
        let condition =
            Where::property_list_equals(self.metadata.id_property_name.clone(), ids);
        self.persister.delete_all(&self.metadata, Some(&condition))
    }

    pub fn delete_all(&self) -> Result<(), Error> {
        self.persister.delete_all(&self.metadata, None)
    }

    /// Delete one entity by its id property.
    pub fn delete(&self, entity: &Record) -> Result<(), Error> {
        let id = self.metadata.id_of(entity).cloned().ok_or_else(|| {
            Error::missing_id_property(
                &self.metadata.table_name,
                &self.metadata.id_property_name,
            )
        })?;

        self.delete_by_id(id)
    }

    /// Insert when the id property is empty; otherwise update an existing
    /// row. A supplied id that matches nothing is an error, not an insert:
    /// the persister checks and writes in one operation, so a concurrent
    /// delete cannot slip between the two.
    pub fn save(&self, entity: Record) -> Result<Record, Error> {
        if self.metadata.id_of(&entity).is_none() {
            self.persister.insert(&self.metadata, vec![entity])
        } else {
            self.persister.update_existing(&self.metadata, entity)
        }
    }

    /// Saves strictly in sequence: each save must commit before the next so
    /// generated ids cannot collide.
    pub fn save_all(&self, entities: Vec<Record>) -> Result<Vec<Record>, Error> {
        entities
            .into_iter()
            .map(|entity| self.save(entity))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────
    // Synthesized finder dispatch
    // ─────────────────────────────────────────────────────────────

    /// Dispatch one synthesized finder by name (`"findAllByBarDateBetween"`).
    pub fn call(&self, method: &str, args: &[Value]) -> Result<CallOutcome, Error> {
        self.call_sorted(method, args, None)
    }

    /// As [`Self::call`], with a sort applied to the find verbs.
    pub fn call_sorted(
        &self,
        method: &str,
        args: &[Value],
        sort: Option<&Sort>,
    ) -> Result<CallOutcome, Error> {
        let finder = self.finders.get(method).ok_or_else(|| {
            Error::invalid_argument(format!("unknown repository method '{method}'"))
        })?;

        let arity = finder.op.arity();
        if args.len() != arity {
            return Err(Error::invalid_argument(format!(
                "method '{method}' expects {arity} argument(s), got {}",
                args.len()
            )));
        }

        let condition = finder.op.condition(&finder.property, args);
        match finder.verb {
            FinderVerb::FindAll => self
                .persister
                .find_all(&self.metadata, Some(&condition), sort)
                .map(CallOutcome::Entities),
            FinderVerb::Find => self
                .persister
                .find_by(&self.metadata, &condition, sort)
                .map(CallOutcome::Entity),
            FinderVerb::DeleteAll => self
                .persister
                .delete_all(&self.metadata, Some(&condition))
                .map(|()| CallOutcome::Unit),
            FinderVerb::Exists => self
                .persister
                .exists_by(&self.metadata, &condition)
                .map(CallOutcome::Bool),
            FinderVerb::Count => self
                .persister
                .count(&self.metadata, Some(&condition))
                .map(CallOutcome::Count),
        }
    }

    fn id_condition(&self, id: Value) -> Where {
        Where::property_equals(self.metadata.id_property_name.clone(), id)
    }
}
