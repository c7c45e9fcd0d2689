use std::sync::Arc;

use crate::{Schema, SchemaBody, TypeKind, Value, error::ValidationError, logical};

/// Name of the [`Value`] variant a schema accepts.
///
/// A logical name takes priority over the physical kind.
fn expected_variant(schema: &Schema) -> &'static str {
    match schema.name() {
        Some(logical::decimal::LOGICAL_NAME) => return "Decimal",
        Some(logical::date::LOGICAL_NAME)
        | Some(logical::time::LOGICAL_NAME)
        | Some(logical::timestamp::LOGICAL_NAME) => return "DateTime",
        _ => {}
    }
    match schema.kind() {
        TypeKind::Int8 => "Int8",
        TypeKind::Int16 => "Int16",
        TypeKind::Int32 => "Int32",
        TypeKind::Int64 => "Int64",
        TypeKind::Float32 => "Float32",
        TypeKind::Float64 => "Float64",
        TypeKind::Boolean => "Bool",
        TypeKind::String => "String",
        TypeKind::Bytes => "Bytes",
        TypeKind::Array => "List",
        TypeKind::Map => "Map",
        TypeKind::Struct => "Struct",
    }
}

/// Check that `value` is acceptable for `schema`, recursing into
/// collections and structs. `field` names the struct field being checked,
/// for error messages.
pub fn validate_value(
    field: Option<&str>,
    schema: &Schema,
    value: &Value,
) -> Result<(), ValidationError> {
    if value.is_null() {
        if schema.is_optional() {
            return Ok(());
        }
        return Err(ValidationError::RequiredFieldMissing {
            field: field.map(str::to_string),
        });
    }

    let expected = expected_variant(schema);
    let found = value.variant_name();
    if expected != found {
        return Err(ValidationError::TypeMismatch {
            field: field.map(str::to_string),
            schema: schema.to_string(),
            expected,
            found,
        });
    }

    match (schema.body(), value) {
        (SchemaBody::Struct { .. }, Value::Struct(s)) => {
            let same = std::ptr::eq(Arc::as_ptr(s.schema()), schema) || **s.schema() == *schema;
            if !same {
                return Err(ValidationError::StructSchemaMismatch {
                    field: field.map(str::to_string),
                });
            }
            s.validate()
        }
        (SchemaBody::Array { element }, Value::List(items)) => {
            for item in items {
                validate_value(None, element, item).map_err(|e| wrap("array element", e))?;
            }
            Ok(())
        }
        (SchemaBody::Map { key, value: value_schema }, Value::Map(entries)) => {
            for (k, v) in entries {
                validate_value(None, key, k).map_err(|e| wrap("map key", e))?;
                validate_value(None, value_schema, v).map_err(|e| wrap("map value", e))?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn wrap(role: &'static str, source: ValidationError) -> ValidationError {
    ValidationError::InvalidElement {
        role,
        source: Box::new(source),
    }
}
