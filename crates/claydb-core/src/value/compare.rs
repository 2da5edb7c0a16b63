use crate::value::{Record, Value};
use std::cmp::Ordering;

/// Total canonical comparator used by `Sort`.
///
/// Ordering rules:
/// 1. Canonical variant rank
/// 2. Variant-specific comparison for same-ranked values
///
/// Mixed-rank comparisons are rank-only and must remain deterministic.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.canonical_rank().cmp(&right.canonical_rank());
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

/// Natural-order comparator used by `Between`/`After`/`Before` predicates.
///
/// Defined for same-variant scalars plus widened numeric pairs. Returns
/// `None` for mismatched or non-orderable variants; the predicate then
/// evaluates to false instead of erroring.
#[must_use]
pub fn order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ if left.canonical_rank() == 2 && right.canonical_rank() == 2 => {
            Some(numeric_cmp(left, right))
        }
        _ => None,
    }
}

/// Deep equality used by `Eq`/`In` predicates and id comparisons.
///
/// Numeric variants compare by magnitude; lists and records compare
/// element-wise.
#[must_use]
pub fn value_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| value_eq(a, b))
        }
        (Value::Record(a), Value::Record(b)) => record_eq(a, b),
        _ => order_cmp(left, right) == Some(Ordering::Equal),
    }
}

fn record_eq(left: &Record, right: &Record) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right.iter())
            .all(|((left_key, left_value), (right_key, right_value))| {
                left_key == right_key && value_eq(left_value, right_value)
            })
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => canonical_cmp_list(a, b),
        (Value::Record(a), Value::Record(b)) => canonical_cmp_record(a, b),
        (Value::Null, Value::Null) => Ordering::Equal,
        // Remaining same-rank pairs are all numeric.
        _ => numeric_cmp(left, right),
    }
}

// Compare two rank-2 values by magnitude. Integer pairs widen to i128;
// int/float pairs compare exactly so the order stays total near the f64
// integer-precision boundary.
fn numeric_cmp(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Uint(a), Value::Uint(b)) => a.cmp(b),
        (Value::Int(a), Value::Uint(b)) => i128::from(*a).cmp(&i128::from(*b)),
        (Value::Uint(a), Value::Int(b)) => i128::from(*a).cmp(&i128::from(*b)),
        (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
        (Value::Int(a), Value::Float(b)) => cmp_i128_f64(i128::from(*a), *b),
        (Value::Uint(a), Value::Float(b)) => cmp_i128_f64(i128::from(*a), *b),
        (Value::Float(a), Value::Int(b)) => cmp_i128_f64(i128::from(*b), *a).reverse(),
        (Value::Float(a), Value::Uint(b)) => cmp_i128_f64(i128::from(*b), *a).reverse(),
        _ => Ordering::Equal,
    }
}

// Exact integer-vs-float comparison consistent with `f64::total_cmp`:
// negative NaN sorts below every integer, positive NaN above, and -0.0
// stays below integer zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn cmp_i128_f64(int: i128, float: f64) -> Ordering {
    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    // i128::MAX rounds up to 2^127 as f64, so >= catches +inf as well.
    let limit = i128::MAX as f64;
    if float >= limit {
        return Ordering::Less;
    }
    if float < -limit {
        return Ordering::Greater;
    }

    // floor() of an in-range f64 converts to i128 exactly.
    let floor = float.floor();
    match int.cmp(&(floor as i128)) {
        Ordering::Equal if float > floor => Ordering::Less,
        Ordering::Equal if int == 0 && float == 0.0 && float.is_sign_negative() => {
            Ordering::Greater
        }
        other => other,
    }
}

fn canonical_cmp_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn canonical_cmp_record(left: &Record, right: &Record) -> Ordering {
    for ((left_key, left_value), (right_key, right_value)) in left.iter().zip(right.iter()) {
        let key_cmp = left_key.cmp(right_key);
        if key_cmp != Ordering::Equal {
            return key_cmp;
        }

        let value_cmp = canonical_cmp(left_value, right_value);
        if value_cmp != Ordering::Equal {
            return value_cmp;
        }
    }

    left.len().cmp(&right.len())
}
