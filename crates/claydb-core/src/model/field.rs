use serde::{Deserialize, Serialize};

///
/// FieldKind
///
/// Runtime type tag for one entity field, aligned with `Value` variants.
/// `JoinedEntity` is the distinguished tag for join columns: scalar id
/// fields that reference another table's rows.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FieldKind {
    Bool,
    Float,
    Int,
    JoinedEntity,
    List,
    Record,
    Text,
    Uint,
}

///
/// EntityField
///
/// One persisted field: the property name on the entity, the column name in
/// the backing table, and the runtime type tag.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityField {
    pub property_name: String,
    pub column_name: String,
    pub kind: FieldKind,
}

impl EntityField {
    pub fn new(
        property_name: impl Into<String>,
        column_name: impl Into<String>,
        kind: FieldKind,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            column_name: column_name.into(),
            kind,
        }
    }
}
