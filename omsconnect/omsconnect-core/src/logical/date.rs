//! Date: days since the Unix epoch stored as `int32`.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};

use super::{MILLIS_PER_DAY, check_name, from_millis};
use crate::{Schema, SchemaBuilder, SchemaRef, TypeKind, error::ConversionError};

pub const LOGICAL_NAME: &str = "io.openmessaging.connector.api.data.logical.Date";

pub fn builder() -> SchemaBuilder {
    SchemaBuilder::logical(TypeKind::Int32, LOGICAL_NAME, 1)
}

pub fn schema() -> SchemaRef {
    static SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| builder().build());
    SCHEMA.clone()
}

/// Number of days since the epoch. The instant must fall exactly on a
/// UTC midnight.
pub fn encode(schema: &Schema, value: &DateTime<Utc>) -> Result<i32, ConversionError> {
    check_name(schema, LOGICAL_NAME, "Date")?;
    let millis = value.timestamp_millis();
    let millis_of_day = millis.rem_euclid(MILLIS_PER_DAY);
    if millis_of_day != 0 {
        return Err(ConversionError::NonZeroTimeComponent { millis_of_day });
    }
    let days = millis.div_euclid(MILLIS_PER_DAY);
    i32::try_from(days).map_err(|_| ConversionError::OutOfRange {
        logical: "Date",
        detail: format!("{days} days does not fit in int32"),
    })
}

pub fn decode(schema: &Schema, days: i32) -> Result<DateTime<Utc>, ConversionError> {
    check_name(schema, LOGICAL_NAME, "Date")?;
    from_millis(days as i64 * MILLIS_PER_DAY, "Date")
}
