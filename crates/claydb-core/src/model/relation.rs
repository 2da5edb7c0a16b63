use serde::{Deserialize, Serialize};

///
/// OneToMany
///
/// The "one" side: `property_name` is where the related collection is
/// materialized on the owning entity; `mapped_by` is the join property on
/// the target table's many-to-one side; `mapped_table` is the target table.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OneToMany {
    pub property_name: String,
    pub mapped_by: String,
    pub mapped_table: String,
}

impl OneToMany {
    pub fn new(
        property_name: impl Into<String>,
        mapped_by: impl Into<String>,
        mapped_table: impl Into<String>,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            mapped_by: mapped_by.into(),
            mapped_table: mapped_table.into(),
        }
    }
}

///
/// ManyToOne
///
/// The "many" side: `property_name` is where the single related entity is
/// materialized; `join_property_name` names the join column on the owning
/// entity's own field list (it must carry the `JoinedEntity` tag to
/// resolve).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ManyToOne {
    pub property_name: String,
    pub mapped_table: String,
    pub join_property_name: String,
}

impl ManyToOne {
    pub fn new(
        property_name: impl Into<String>,
        mapped_table: impl Into<String>,
        join_property_name: impl Into<String>,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            mapped_table: mapped_table.into(),
            join_property_name: join_property_name.into(),
        }
    }
}
