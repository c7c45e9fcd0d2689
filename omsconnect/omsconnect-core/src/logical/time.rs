//! Time of day: milliseconds since midnight stored as `int32`.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};

use super::{MILLIS_PER_DAY, check_name, from_millis};
use crate::{Schema, SchemaBuilder, SchemaRef, TypeKind, error::ConversionError};

pub const LOGICAL_NAME: &str = "io.openmessaging.connector.api.data.logical.Time";

pub fn builder() -> SchemaBuilder {
    SchemaBuilder::logical(TypeKind::Int32, LOGICAL_NAME, 1)
}

pub fn schema() -> SchemaRef {
    static SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| builder().build());
    SCHEMA.clone()
}

// Both ends are inclusive; `MILLIS_PER_DAY` itself is accepted.
fn check_range(millis: i64) -> Result<(), ConversionError> {
    if (0..=MILLIS_PER_DAY).contains(&millis) {
        Ok(())
    } else {
        Err(ConversionError::OutOfRange {
            logical: "Time",
            detail: format!("{millis} ms is outside 0..={MILLIS_PER_DAY}"),
        })
    }
}

/// Milliseconds since midnight. The instant must lie on the epoch day.
pub fn encode(schema: &Schema, value: &DateTime<Utc>) -> Result<i32, ConversionError> {
    check_name(schema, LOGICAL_NAME, "Time")?;
    let millis = value.timestamp_millis();
    check_range(millis)?;
    Ok(millis as i32)
}

pub fn decode(schema: &Schema, millis: i32) -> Result<DateTime<Utc>, ConversionError> {
    check_name(schema, LOGICAL_NAME, "Time")?;
    check_range(millis as i64)?;
    from_millis(millis as i64, "Time")
}
