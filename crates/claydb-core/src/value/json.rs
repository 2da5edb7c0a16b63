//! JSON interop for the tagged value model.
//!
//! Entities cross the persister boundary as `Record`s; callers and tests
//! usually hold `serde_json` literals. Conversions are lossless except for
//! non-finite floats, which JSON cannot represent.

use crate::{
    error::Error,
    value::{Record, Value},
};
use serde_json::{Number, Value as JsonValue};
use tracing::warn;

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(v) => Self::Bool(v),
            JsonValue::Number(number) => from_number(&number),
            JsonValue::String(v) => Self::Text(v),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(entries) => Self::Record(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(v) => Self::Bool(v),
            Value::Int(v) => Self::Number(v.into()),
            Value::Uint(v) => Self::Number(v.into()),
            Value::Float(v) => Number::from_f64(v).map_or_else(
                || {
                    warn!(value = v, "dropping non-finite float during JSON conversion");
                    Self::Null
                },
                Self::Number,
            ),
            Value::Text(v) => Self::String(v),
            Value::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Record(record) => Self::Object(
                record
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<JsonValue> for Record {
    type Error = Error;

    /// Entity instances must be JSON objects at the top level.
    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match Value::from(value) {
            Value::Record(record) => Ok(record),
            other => Err(Error::configuration(format!(
                "entity must be a JSON object, got {other:?}"
            ))),
        }
    }
}

impl From<Record> for JsonValue {
    fn from(record: Record) -> Self {
        Value::Record(record).into()
    }
}

// Widest-first: u64, then i64, then f64.
fn from_number(number: &Number) -> Value {
    if let Some(v) = number.as_u64() {
        Value::Uint(v)
    } else if let Some(v) = number.as_i64() {
        Value::Int(v)
    } else {
        Value::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}
