use crate::{
    error::Error,
    model::{
        field::EntityField,
        relation::{ManyToOne, OneToMany},
    },
    value::{Record, Value},
};
use serde::{Deserialize, Serialize};

///
/// EntityMetadata
///
/// Per-table descriptor: fields, id property, and relation descriptors.
/// Built once per entity type at program startup (the explicit-registration
/// equivalent of class decoration) and handed to the registry.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityMetadata {
    pub table_name: String,
    pub id_property_name: String,
    pub fields: Vec<EntityField>,
    pub one_to_many: Vec<OneToMany>,
    pub many_to_one: Vec<ManyToOne>,
}

impl EntityMetadata {
    /// Validating constructor: the table name must be non-empty and the id
    /// property must appear in the field list.
    pub fn new(
        table_name: impl Into<String>,
        id_property_name: impl Into<String>,
        fields: Vec<EntityField>,
        one_to_many: Vec<OneToMany>,
        many_to_one: Vec<ManyToOne>,
    ) -> Result<Self, Error> {
        let table_name = table_name.into();
        let id_property_name = id_property_name.into();

        if table_name.is_empty() {
            return Err(Error::configuration(
                "entity metadata registered without a table name",
            ));
        }
        if !fields
            .iter()
            .any(|field| field.property_name == id_property_name)
        {
            return Err(Error::configuration(format!(
                "id property '{id_property_name}' is not a field of table '{table_name}'"
            )));
        }

        Ok(Self {
            table_name,
            id_property_name,
            fields,
            one_to_many,
            many_to_one,
        })
    }

    /// Look up a field by property name.
    #[must_use]
    pub fn field(&self, property_name: &str) -> Option<&EntityField> {
        self.fields
            .iter()
            .find(|field| field.property_name == property_name)
    }

    /// The entity's id value, if present and non-empty.
    #[must_use]
    pub fn id_of<'a>(&self, entity: &'a Record) -> Option<&'a Value> {
        entity
            .get(&self.id_property_name)
            .filter(|value| !value.is_empty_id())
    }

    /// Property names materialized by relation population; these are the
    /// properties "simplify" strips from raw stored values.
    pub fn relation_property_names(&self) -> impl Iterator<Item = &str> {
        self.one_to_many
            .iter()
            .map(|relation| relation.property_name.as_str())
            .chain(
                self.many_to_one
                    .iter()
                    .map(|relation| relation.property_name.as_str()),
            )
    }
}
