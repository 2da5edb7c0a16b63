use crate::{
    error::Error,
    value::{Record, Value, order_cmp, value_eq},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Where
///
/// Immutable boolean condition tree over named entity properties.
///
/// Property names may be dotted paths into nested records
/// (`"dataJson.name"`); a missing segment makes the leaf evaluate false,
/// never error. `Between` is inclusive at both ends; `After`/`Before` are
/// strict. Comparisons use the natural ordering of the property's runtime
/// type, so ISO-8601 date strings compare lexically (UTC-only; documented
/// limitation).
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Where {
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),

    Eq {
        property: String,
        value: Value,
    },
    In {
        property: String,
        values: Vec<Value>,
    },
    Between {
        property: String,
        start: Value,
        end: Value,
    },
    After {
        property: String,
        value: Value,
    },
    Before {
        property: String,
        value: Value,
    },
}

impl Where {
    // ─────────────────────────────────────────────────────────────
    // Factories
    // ─────────────────────────────────────────────────────────────

    pub fn property_equals(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn property_list_equals(
        property: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        Self::In {
            property: property.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn property_between(
        property: impl Into<String>,
        start: impl Into<Value>,
        end: impl Into<Value>,
    ) -> Self {
        Self::Between {
            property: property.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn property_after(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::After {
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn property_before(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Before {
            property: property.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub const fn and(conditions: Vec<Self>) -> Self {
        Self::And(conditions)
    }

    #[must_use]
    pub const fn or(conditions: Vec<Self>) -> Self {
        Self::Or(conditions)
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(condition: Self) -> Self {
        Self::Not(Box::new(condition))
    }

    // ─────────────────────────────────────────────────────────────
    // Evaluation
    // ─────────────────────────────────────────────────────────────

    /// Evaluate this condition tree against one entity.
    #[must_use]
    pub fn matches(&self, entity: &Record) -> bool {
        match self {
            Self::And(children) => children.iter().all(|child| child.matches(entity)),
            Self::Or(children) => children.iter().any(|child| child.matches(entity)),
            Self::Not(child) => !child.matches(entity),

            Self::Eq { property, value } => entity
                .resolve_path(property)
                .is_some_and(|actual| value_eq(actual, value)),

            Self::In { property, values } => entity
                .resolve_path(property)
                .is_some_and(|actual| values.iter().any(|value| value_eq(actual, value))),

            Self::Between {
                property,
                start,
                end,
            } => entity.resolve_path(property).is_some_and(|actual| {
                matches!(
                    order_cmp(actual, start),
                    Some(Ordering::Greater | Ordering::Equal)
                ) && matches!(
                    order_cmp(actual, end),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }),

            Self::After { property, value } => entity
                .resolve_path(property)
                .is_some_and(|actual| order_cmp(actual, value) == Some(Ordering::Greater)),

            Self::Before { property, value } => entity
                .resolve_path(property)
                .is_some_and(|actual| order_cmp(actual, value) == Some(Ordering::Less)),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────

    /// Reject malformed trees before any row is touched.
    ///
    /// Property names are typed strings here, so the only residual
    /// malformed-construction case is an empty name.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::And(children) | Self::Or(children) => {
                children.iter().try_for_each(Self::validate)
            }
            Self::Not(child) => child.validate(),
            Self::Eq { property, .. }
            | Self::In { property, .. }
            | Self::Between { property, .. }
            | Self::After { property, .. }
            | Self::Before { property, .. } => {
                if property.is_empty() {
                    return Err(Error::invalid_argument(
                        "condition property name must be non-empty",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// TESTS
///
