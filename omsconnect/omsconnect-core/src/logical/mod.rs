//! Logical types layered on physical schemas.
//!
//! Each logical type is identified by a fixed name stored on the schema and
//! provides an `encode`/`decode` pair between its runtime value and the
//! physical representation.

pub mod date;
pub mod decimal;
pub mod time;
pub mod timestamp;

use chrono::{DateTime, Utc};

use crate::{Schema, TypeKind, error::ConversionError};

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Logical type names known to this crate.
pub const LOGICAL_NAMES: [&str; 4] = [
    date::LOGICAL_NAME,
    time::LOGICAL_NAME,
    timestamp::LOGICAL_NAME,
    decimal::LOGICAL_NAME,
];

/// Physical kind a logical type name is stored as.
pub fn physical_kind(name: &str) -> Option<TypeKind> {
    match name {
        date::LOGICAL_NAME | time::LOGICAL_NAME => Some(TypeKind::Int32),
        timestamp::LOGICAL_NAME => Some(TypeKind::Int64),
        decimal::LOGICAL_NAME => Some(TypeKind::Bytes),
        _ => None,
    }
}

pub fn is_logical(schema: &Schema) -> bool {
    schema.name().is_some_and(|name| LOGICAL_NAMES.contains(&name))
}

/// True for Date, Time and Timestamp schemas.
pub fn is_temporal(schema: &Schema) -> bool {
    matches!(
        schema.name(),
        Some(date::LOGICAL_NAME | time::LOGICAL_NAME | timestamp::LOGICAL_NAME)
    )
}

fn check_name(
    schema: &Schema,
    expected: &'static str,
    short: &'static str,
) -> Result<(), ConversionError> {
    if schema.has_name(expected) {
        Ok(())
    } else {
        Err(ConversionError::LogicalTypeMismatch {
            expected: short,
            found: schema.name().map(str::to_string),
        })
    }
}

pub(crate) fn from_millis(
    millis: i64,
    logical: &'static str,
) -> Result<DateTime<Utc>, ConversionError> {
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| ConversionError::OutOfRange {
        logical,
        detail: format!("{millis} ms since epoch is not representable"),
    })
}
