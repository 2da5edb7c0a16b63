use crate::value::Value;
use thiserror::Error as ThisError;

///
/// Error
///
/// Shared error taxonomy for condition construction, metadata registration,
/// and persister operations. Kinds are stable; messages are diagnostic only.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("entity in table '{table}' has no value for id property '{property}'")]
    MissingIdProperty { table: String, property: String },

    #[error("duplicate id {id} in table '{table}'")]
    DuplicateId { table: String, id: String },

    #[error("entity with id {id} not found in table '{table}'")]
    EntityNotFound { table: String, id: String },

    #[error("unresolved relation '{property}' on table '{table}': {reason}")]
    UnresolvedRelation {
        table: String,
        property: String,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn missing_id_property(table: impl Into<String>, property: impl Into<String>) -> Self {
        Self::MissingIdProperty {
            table: table.into(),
            property: property.into(),
        }
    }

    pub fn duplicate_id(table: impl Into<String>, id: &Value) -> Self {
        Self::DuplicateId {
            table: table.into(),
            id: format!("{id:?}"),
        }
    }

    pub fn entity_not_found(table: impl Into<String>, id: &Value) -> Self {
        Self::EntityNotFound {
            table: table.into(),
            id: format!("{id:?}"),
        }
    }

    pub fn unresolved_relation(
        table: impl Into<String>,
        property: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnresolvedRelation {
            table: table.into(),
            property: property.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
