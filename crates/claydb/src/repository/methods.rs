//! Synthesized finder methods.
//!
//! The historical implementation injected `findAllByX`-style methods into a
//! class prototype at construction time. Here the same surface is a
//! metadata-driven dispatch table: one entry per synthesized name, each a
//! small spec capturing the field, the condition factory, and the verb.
//! Synthesis is deterministic given the same metadata.

use claydb_core::{EntityMetadata, Value, Where};
use convert_case::{Case, Casing};
use std::collections::BTreeMap;
use tracing::debug;

///
/// FinderVerb
///
/// Which persister operation a synthesized method routes to.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FinderVerb {
    FindAll,
    Find,
    DeleteAll,
    Exists,
    Count,
}

///
/// FinderOp
///
/// Which `Where` factory a synthesized method builds its condition with.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FinderOp {
    Equals,
    Between,
    After,
    Before,
}

impl FinderOp {
    pub(crate) const fn arity(self) -> usize {
        match self {
            Self::Between => 2,
            Self::Equals | Self::After | Self::Before => 1,
        }
    }

    /// Build the condition for one call. Callers check arity first.
    pub(crate) fn condition(self, property: &str, args: &[Value]) -> Where {
        let mut args = args.iter().cloned();
        let first = args.next().unwrap_or(Value::Null);

        match self {
            Self::Equals => Where::property_equals(property, first),
            Self::Between => {
                Where::property_between(property, first, args.next().unwrap_or(Value::Null))
            }
            Self::After => Where::property_after(property, first),
            Self::Before => Where::property_before(property, first),
        }
    }
}

///
/// Finder
///

#[derive(Clone, Debug)]
pub(crate) struct Finder {
    pub(crate) property: String,
    pub(crate) verb: FinderVerb,
    pub(crate) op: FinderOp,
}

/// Base-operation names synthesis must never clobber.
pub(crate) const RESERVED_METHOD_NAMES: &[&str] = &[
    "count",
    "delete",
    "deleteAll",
    "deleteAllById",
    "deleteById",
    "existsById",
    "findAll",
    "findAllById",
    "findById",
    "save",
    "saveAll",
];

const VERBS: [(FinderVerb, &str); 5] = [
    (FinderVerb::FindAll, "findAllBy"),
    (FinderVerb::Find, "findBy"),
    (FinderVerb::DeleteAll, "deleteAllBy"),
    (FinderVerb::Exists, "existsBy"),
    (FinderVerb::Count, "countBy"),
];

const OPS: [(FinderOp, &str); 4] = [
    (FinderOp::Equals, ""),
    (FinderOp::Between, "Between"),
    (FinderOp::After, "After"),
    (FinderOp::Before, "Before"),
];

/// Twenty finders per field (five verbs by four condition shapes), skipping
/// reserved and already-taken names.
pub(crate) fn synthesize(metadata: &EntityMetadata) -> BTreeMap<String, Finder> {
    let mut finders = BTreeMap::new();

    for field in &metadata.fields {
        let pascal = field.property_name.to_case(Case::Pascal);

        for (verb, prefix) in VERBS {
            for (op, suffix) in OPS {
                let name = format!("{prefix}{pascal}{suffix}");
                if RESERVED_METHOD_NAMES.contains(&name.as_str()) || finders.contains_key(&name) {
                    debug!(method = %name, "skipping synthesized finder, name already taken");
                    continue;
                }

                finders.insert(
                    name,
                    Finder {
                        property: field.property_name.clone(),
                        verb,
                        op,
                    },
                );
            }
        }
    }

    finders
}
