//! Coercion of values between schemas.

use omsconnect_core::{
    ConversionError, Decimal, Schema, SchemaBuilder, SchemaRef, Struct, TypeKind, Value, logical,
    logical::MILLIS_PER_DAY,
};
use tracing::trace;

use crate::text::{self, Text};

fn unsupported(value: &Value, to: impl ToString) -> ConversionError {
    ConversionError::Unsupported {
        from: value.variant_name().to_string(),
        to: to.to_string(),
    }
}

/// Integer view of a value, truncating fractions.
///
/// Temporal values need `from` to tell which logical encoding applies.
pub fn as_long(value: &Value, from: Option<&Schema>) -> Result<i64, ConversionError> {
    match value {
        Value::Int8(v) => Ok(*v as i64),
        Value::Int16(v) => Ok(*v as i64),
        Value::Int32(v) => Ok(*v as i64),
        Value::Int64(v) => Ok(*v),
        Value::Float32(v) => Ok(*v as i64),
        Value::Float64(v) => Ok(*v as i64),
        Value::Decimal(d) => Ok(d.trunc_i64()),
        Value::String(s) => Ok(s.trim().parse::<Decimal>()?.trunc_i64()),
        Value::DateTime(instant) => match from {
            Some(schema) if schema.has_name(logical::date::LOGICAL_NAME) => {
                Ok(logical::date::encode(schema, instant)? as i64)
            }
            Some(schema) if schema.has_name(logical::time::LOGICAL_NAME) => {
                Ok(logical::time::encode(schema, instant)? as i64)
            }
            Some(schema) if schema.has_name(logical::timestamp::LOGICAL_NAME) => {
                logical::timestamp::encode(schema, instant)
            }
            _ => Err(unsupported(value, "a number")),
        },
        _ => Err(unsupported(value, "a number")),
    }
}

/// Floating point view of a value.
pub fn as_double(value: &Value, from: Option<&Schema>) -> Result<f64, ConversionError> {
    match value {
        Value::Float32(v) => Ok(*v as f64),
        Value::Float64(v) => Ok(*v),
        Value::Int8(v) => Ok(*v as f64),
        Value::Int16(v) => Ok(*v as f64),
        Value::Int32(v) => Ok(*v as f64),
        Value::Int64(v) => Ok(*v as f64),
        Value::Decimal(d) => Ok(d.to_f64()),
        Value::String(s) => Ok(s.trim().parse::<Decimal>()?.to_f64()),
        _ => as_long(value, from).map(|v| v as f64),
    }
}

/// Convert `value`, described by `from` when known, into a value valid for
/// `to`.
///
/// Strings are parsed with the text notation when the target needs a
/// structured or temporal value, and the parsed schema then stands in for
/// `from`. Narrowing numeric conversions wrap like `as` casts.
pub fn convert_to(
    from: Option<&Schema>,
    to: &Schema,
    value: &Value,
) -> Result<Value, ConversionError> {
    if value.is_null() {
        return Err(ConversionError::NullValue);
    }

    match to.kind() {
        TypeKind::Bytes if to.has_name(logical::decimal::LOGICAL_NAME) => match value {
            Value::Bytes(b) => Ok(Value::Decimal(logical::decimal::decode(to, b)?)),
            Value::Decimal(_) => Ok(value.clone()),
            Value::String(s) => Ok(Value::Decimal(s.trim().parse()?)),
            v if v.kind().is_some_and(|k| k.is_numeric()) => {
                Ok(Value::Decimal(Decimal::from_f64(as_double(v, from)?)?))
            }
            _ => Err(unsupported(value, to)),
        },
        TypeKind::Bytes => match value {
            Value::Bytes(_) => Ok(value.clone()),
            Value::Decimal(d) => Ok(Value::bytes(d.unscaled_bytes())),
            _ => Err(unsupported(value, to)),
        },
        TypeKind::String => Ok(Value::string(Text::new(value).to_string())),
        TypeKind::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(s) => match text::parse(s).into_parts().1 {
                Value::Bool(b) => Ok(Value::Bool(b)),
                _ => Ok(Value::Bool(as_long(value, from)? != 0)),
            },
            _ => Ok(Value::Bool(as_long(value, from)? != 0)),
        },
        TypeKind::Int8 => match value {
            Value::Int8(_) => Ok(value.clone()),
            _ => Ok(Value::Int8(as_long(value, from)? as i8)),
        },
        TypeKind::Int16 => match value {
            Value::Int16(_) => Ok(value.clone()),
            _ => Ok(Value::Int16(as_long(value, from)? as i16)),
        },
        TypeKind::Int32 if to.has_name(logical::date::LOGICAL_NAME) => to_date(from, to, value),
        TypeKind::Int32 if to.has_name(logical::time::LOGICAL_NAME) => to_time(from, to, value),
        TypeKind::Int32 => match value {
            Value::Int32(_) => Ok(value.clone()),
            _ => Ok(Value::Int32(as_long(value, from)? as i32)),
        },
        TypeKind::Int64 if to.has_name(logical::timestamp::LOGICAL_NAME) => {
            to_timestamp(from, to, value)
        }
        TypeKind::Int64 => match value {
            Value::Int64(_) => Ok(value.clone()),
            _ => Ok(Value::Int64(as_long(value, from)?)),
        },
        TypeKind::Float32 => match value {
            Value::Float32(_) => Ok(value.clone()),
            _ => Ok(Value::Float32(as_double(value, from)? as f32)),
        },
        TypeKind::Float64 => match value {
            Value::Float64(_) => Ok(value.clone()),
            _ => Ok(Value::Float64(as_double(value, from)?)),
        },
        TypeKind::Array => match parse_if_string(value) {
            (_, parsed @ Value::List(_)) => Ok(parsed),
            _ => Err(unsupported(value, to)),
        },
        TypeKind::Map => match parse_if_string(value) {
            (_, parsed @ Value::Map(_)) => Ok(parsed),
            _ => Err(unsupported(value, to)),
        },
        TypeKind::Struct => match value {
            Value::Struct(_) => Ok(value.clone()),
            Value::Map(entries) => Ok(Value::Struct(map_to_struct(entries)?)),
            _ => Err(unsupported(value, to)),
        },
    }
}

/// Strings are read with the text notation; the parsed schema replaces the
/// unknown source schema.
fn parse_if_string(value: &Value) -> (Option<SchemaRef>, Value) {
    match value {
        Value::String(s) => text::parse(s).into_parts(),
        other => (None, other.clone()),
    }
}

fn resolve_source<'a>(
    from: Option<&'a Schema>,
    parsed_schema: &'a Option<SchemaRef>,
    was_string: bool,
) -> Option<&'a Schema> {
    if was_string {
        parsed_schema.as_deref()
    } else {
        from
    }
}

fn to_date(from: Option<&Schema>, to: &Schema, value: &Value) -> Result<Value, ConversionError> {
    let was_string = matches!(value, Value::String(_));
    let (parsed_schema, value) = parse_if_string(value);
    let from = resolve_source(from, &parsed_schema, was_string);

    if let Value::DateTime(instant) = &value {
        match from.and_then(Schema::name) {
            Some(logical::date::LOGICAL_NAME) => return Ok(value.clone()),
            Some(logical::timestamp::LOGICAL_NAME) => {
                // Day containing the instant; pre-epoch instants floor.
                let days = instant.timestamp_millis().div_euclid(MILLIS_PER_DAY);
                return Ok(Value::DateTime(logical::date::decode(to, days as i32)?));
            }
            _ => {}
        }
    }
    let days = as_long(&value, from)?;
    Ok(Value::DateTime(logical::date::decode(to, days as i32)?))
}

fn to_time(from: Option<&Schema>, to: &Schema, value: &Value) -> Result<Value, ConversionError> {
    let was_string = matches!(value, Value::String(_));
    let (parsed_schema, value) = parse_if_string(value);
    let from = resolve_source(from, &parsed_schema, was_string);

    if let Value::DateTime(instant) = &value {
        match from.and_then(Schema::name) {
            Some(logical::time::LOGICAL_NAME) => return Ok(value.clone()),
            Some(logical::timestamp::LOGICAL_NAME) => {
                let millis = instant.timestamp_millis().rem_euclid(MILLIS_PER_DAY);
                return Ok(Value::DateTime(logical::time::decode(to, millis as i32)?));
            }
            _ => {}
        }
    }
    let millis = as_long(&value, from)?;
    Ok(Value::DateTime(logical::time::decode(to, millis as i32)?))
}

fn to_timestamp(
    from: Option<&Schema>,
    to: &Schema,
    value: &Value,
) -> Result<Value, ConversionError> {
    let was_string = matches!(value, Value::String(_));
    let (parsed_schema, value) = parse_if_string(value);
    let from = resolve_source(from, &parsed_schema, was_string);

    if let (Value::DateTime(instant), Some(source)) = (&value, from) {
        let millis = match source.name() {
            Some(logical::date::LOGICAL_NAME) => {
                Some(logical::date::encode(source, instant)? as i64 * MILLIS_PER_DAY)
            }
            Some(logical::time::LOGICAL_NAME) => Some(logical::time::encode(source, instant)? as i64),
            Some(logical::timestamp::LOGICAL_NAME) => return Ok(value.clone()),
            _ => None,
        };
        if let Some(millis) = millis {
            return Ok(Value::DateTime(logical::timestamp::decode(to, millis)?));
        }
    }
    let millis = as_long(&value, from)?;
    Ok(Value::DateTime(logical::timestamp::decode(to, millis)?))
}

/// Build a struct from map entries, deriving each field's schema by reading
/// the printed entry value back with the text notation.
fn map_to_struct(entries: &[(Value, Value)]) -> Result<Struct, ConversionError> {
    let mut builder = SchemaBuilder::new_struct();
    let mut values = Vec::with_capacity(entries.len());

    for (key, value) in entries {
        let name = Text::new(key).to_string();
        let (schema, field_value) = text::parse(&Text::new(value).to_string()).into_parts();
        let (schema, field_value) = match (schema, field_value) {
            (Some(schema), v) => (schema, v),
            (None, Value::Null) => (Schema::optional_string(), Value::Null),
            (None, Value::Map(nested)) => {
                let nested = map_to_struct(&nested)?;
                (nested.schema().clone(), Value::Struct(nested))
            }
            (None, other) => {
                return Err(ConversionError::Unsupported {
                    from: format!("untyped {} in field {name:?}", other.variant_name()),
                    to: "struct".to_string(),
                });
            }
        };
        trace!(field = %name, schema = %schema, "derived struct field");
        builder = builder.field(name.clone(), schema)?;
        values.push((name, field_value));
    }

    let mut result = Struct::new(builder.build())?;
    for (name, value) in values {
        result.put(&name, value)?;
    }
    Ok(result)
}
