//! Timestamp: milliseconds since the Unix epoch stored as `int64`.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};

use super::{check_name, from_millis};
use crate::{Schema, SchemaBuilder, SchemaRef, TypeKind, error::ConversionError};

pub const LOGICAL_NAME: &str = "io.openmessaging.connector.api.data.logical.Timestamp";

pub fn builder() -> SchemaBuilder {
    SchemaBuilder::logical(TypeKind::Int64, LOGICAL_NAME, 1)
}

pub fn schema() -> SchemaRef {
    static SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| builder().build());
    SCHEMA.clone()
}

pub fn encode(schema: &Schema, value: &DateTime<Utc>) -> Result<i64, ConversionError> {
    check_name(schema, LOGICAL_NAME, "Timestamp")?;
    Ok(value.timestamp_millis())
}

pub fn decode(schema: &Schema, millis: i64) -> Result<DateTime<Utc>, ConversionError> {
    check_name(schema, LOGICAL_NAME, "Timestamp")?;
    from_millis(millis, "Timestamp")
}
