use crate::{
    error::Error,
    value::{Record, Value, canonical_cmp},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

///
/// SortOrder
///
/// One (property, direction) pair.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

///
/// Sort
///
/// Ordered list of sort orders compiled into a single comparator.
/// Immutable once built; safely shared across concurrent reads.
///
/// The comparator must be applied with a stable sort so that tied rows keep
/// their insertion order; no sort at all means insertion order, preserved.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    /// Ascending sort over the given properties.
    pub fn by<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::by_direction(Direction::Asc, properties)
    }

    /// Single-direction sort over the given properties.
    pub fn by_direction<I, S>(direction: Direction, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            orders: properties
                .into_iter()
                .map(|property| SortOrder {
                    property: property.into(),
                    direction,
                })
                .collect(),
        }
    }

    /// Mixed-direction sort from explicit orders.
    #[must_use]
    pub const fn by_orders(orders: Vec<SortOrder>) -> Self {
        Self { orders }
    }

    #[must_use]
    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    /// The compiled comparator: walk orders in sequence, return the first
    /// unequal comparison (negated for descending), `Equal` if all tie.
    ///
    /// A missing property compares as `Null`, which ranks below every other
    /// value in the canonical order.
    #[must_use]
    pub fn compare(&self, left: &Record, right: &Record) -> Ordering {
        for order in &self.orders {
            let left_value = left.resolve_path(&order.property).unwrap_or(&Value::Null);
            let right_value = right.resolve_path(&order.property).unwrap_or(&Value::Null);

            let cmp = canonical_cmp(left_value, right_value);
            if cmp != Ordering::Equal {
                return match order.direction {
                    Direction::Asc => cmp,
                    Direction::Desc => cmp.reverse(),
                };
            }
        }

        Ordering::Equal
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.orders.iter().any(|order| order.property.is_empty()) {
            return Err(Error::invalid_argument(
                "sort property name must be non-empty",
            ));
        }

        Ok(())
    }
}

/// TESTS
///
