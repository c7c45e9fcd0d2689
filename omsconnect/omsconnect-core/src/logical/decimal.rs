//! Decimal: unscaled two's-complement big-endian bytes with a `scale`
//! schema parameter.

use bytes::Bytes;

use super::check_name;
use crate::{Decimal, Schema, SchemaBuilder, SchemaRef, TypeKind, error::ConversionError};

pub const LOGICAL_NAME: &str = "io.openmessaging.connector.api.data.logical.Decimal";
pub const SCALE_FIELD: &str = "scale";

pub fn builder(scale: i32) -> SchemaBuilder {
    SchemaBuilder::logical(TypeKind::Bytes, LOGICAL_NAME, 1).parameter(SCALE_FIELD, scale.to_string())
}

pub fn schema(scale: i32) -> SchemaRef {
    builder(scale).build()
}

/// Scale declared by a Decimal schema.
pub fn scale(schema: &Schema) -> Result<i32, ConversionError> {
    let raw = schema.parameter(SCALE_FIELD);
    raw.and_then(|s| s.parse().ok())
        .ok_or_else(|| ConversionError::MissingOrInvalidScale {
            found: raw.map(str::to_string),
        })
}

pub fn encode(schema: &Schema, value: &Decimal) -> Result<Bytes, ConversionError> {
    check_name(schema, LOGICAL_NAME, "Decimal")?;
    let expected = scale(schema)?;
    if value.scale() != expected {
        return Err(ConversionError::ScaleMismatch {
            expected,
            actual: value.scale(),
        });
    }
    Ok(Bytes::from(value.unscaled_bytes()))
}

pub fn decode(schema: &Schema, bytes: &[u8]) -> Result<Decimal, ConversionError> {
    check_name(schema, LOGICAL_NAME, "Decimal")?;
    Decimal::from_unscaled_bytes(bytes, scale(schema)?)
}
