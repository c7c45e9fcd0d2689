use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    Decimal, Field, SchemaRef, TypeKind, Value, error::ValidationError,
    validate::validate_value,
};

/// Fixed-shape record described by a struct-kind schema.
///
/// Values are stored positionally, indexed by [`Field::index`]. Every write
/// goes through validation; a rejected write leaves the struct unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    schema: SchemaRef,
    values: Vec<Value>,
}

impl Struct {
    pub fn new(schema: SchemaRef) -> Result<Self, ValidationError> {
        let len = match schema.fields() {
            Some(fields) => fields.len(),
            None => {
                return Err(ValidationError::NotAStruct {
                    kind: schema.kind(),
                });
            }
        };
        Ok(Self {
            schema,
            values: vec![Value::Null; len],
        })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    fn lookup(&self, name: &str) -> Result<&Field, ValidationError> {
        self.schema
            .field(name)
            .ok_or_else(|| ValidationError::UnknownField {
                name: name.to_string(),
            })
    }

    fn resolve(&self, field: &Field) -> Result<usize, ValidationError> {
        match self.schema.field(&field.name) {
            Some(own) if own == field => Ok(own.index),
            _ => Err(ValidationError::UnknownField {
                name: field.name.clone(),
            }),
        }
    }

    /// Stored value, or the field's default when the slot is null.
    pub fn get(&self, name: &str) -> Result<&Value, ValidationError> {
        let field = self.lookup(name)?;
        Ok(self.with_default(field))
    }

    pub fn get_field(&self, field: &Field) -> Result<&Value, ValidationError> {
        let index = self.resolve(field)?;
        Ok(self.with_default(&self.schema.fields().unwrap_or_default()[index]))
    }

    pub fn get_without_default(&self, name: &str) -> Result<&Value, ValidationError> {
        let field = self.lookup(name)?;
        Ok(&self.values[field.index])
    }

    fn with_default<'a>(&'a self, field: &'a Field) -> &'a Value {
        let value = &self.values[field.index];
        match (value, field.schema.default_value()) {
            (Value::Null, Some(default)) => default,
            _ => value,
        }
    }

    /// Store `value` under the field called `name` after validating it.
    pub fn put(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ValidationError> {
        let field = self.lookup(name)?;
        let index = field.index;
        let schema = Arc::clone(&field.schema);
        let value = value.into();
        validate_value(Some(name), &schema, &value)?;
        self.values[index] = value;
        Ok(self)
    }

    pub fn put_field(
        &mut self,
        field: &Field,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ValidationError> {
        let index = self.resolve(field)?;
        let value = value.into();
        validate_value(Some(&field.name), &field.schema, &value)?;
        self.values[index] = value;
        Ok(self)
    }

    /// Check every field, failing on the first null required field or
    /// invalid value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in self.schema.fields().unwrap_or_default() {
            let value = self.with_default(field);
            validate_value(Some(&field.name), &field.schema, value)?;
        }
        Ok(())
    }

    fn typed(&self, name: &str, expected: TypeKind) -> Result<&Value, ValidationError> {
        let field = self.lookup(name)?;
        if field.schema.kind() != expected {
            return Err(ValidationError::TypeMismatch {
                field: Some(name.to_string()),
                schema: field.schema.to_string(),
                expected: expected.type_name(),
                found: field.schema.kind().type_name(),
            });
        }
        Ok(self.with_default(field))
    }

    fn mismatch(&self, name: &str, expected: &'static str, value: &Value) -> ValidationError {
        ValidationError::TypeMismatch {
            field: Some(name.to_string()),
            schema: self
                .schema
                .field(name)
                .map(|f| f.schema.to_string())
                .unwrap_or_default(),
            expected,
            found: value.variant_name(),
        }
    }

    pub fn get_int8(&self, name: &str) -> Result<Option<i8>, ValidationError> {
        let value = self.typed(name, TypeKind::Int8)?;
        value.try_i8().map_err(|_| self.mismatch(name, "Int8", value))
    }

    pub fn get_int16(&self, name: &str) -> Result<Option<i16>, ValidationError> {
        let value = self.typed(name, TypeKind::Int16)?;
        value.try_i16().map_err(|_| self.mismatch(name, "Int16", value))
    }

    pub fn get_int32(&self, name: &str) -> Result<Option<i32>, ValidationError> {
        let value = self.typed(name, TypeKind::Int32)?;
        value.try_i32().map_err(|_| self.mismatch(name, "Int32", value))
    }

    pub fn get_int64(&self, name: &str) -> Result<Option<i64>, ValidationError> {
        let value = self.typed(name, TypeKind::Int64)?;
        value.try_i64().map_err(|_| self.mismatch(name, "Int64", value))
    }

    pub fn get_float32(&self, name: &str) -> Result<Option<f32>, ValidationError> {
        let value = self.typed(name, TypeKind::Float32)?;
        value.try_f32().map_err(|_| self.mismatch(name, "Float32", value))
    }

    pub fn get_float64(&self, name: &str) -> Result<Option<f64>, ValidationError> {
        let value = self.typed(name, TypeKind::Float64)?;
        value.try_f64().map_err(|_| self.mismatch(name, "Float64", value))
    }

    pub fn get_boolean(&self, name: &str) -> Result<Option<bool>, ValidationError> {
        let value = self.typed(name, TypeKind::Boolean)?;
        value.try_bool().map_err(|_| self.mismatch(name, "Bool", value))
    }

    pub fn get_string(&self, name: &str) -> Result<Option<&str>, ValidationError> {
        let value = self.typed(name, TypeKind::String)?;
        value.try_str().map_err(|_| self.mismatch(name, "String", value))
    }

    pub fn get_bytes(&self, name: &str) -> Result<Option<&[u8]>, ValidationError> {
        let value = self.typed(name, TypeKind::Bytes)?;
        value.try_bytes().map_err(|_| self.mismatch(name, "Bytes", value))
    }

    pub fn get_array(&self, name: &str) -> Result<Option<&[Value]>, ValidationError> {
        let value = self.typed(name, TypeKind::Array)?;
        value.try_list().map_err(|_| self.mismatch(name, "List", value))
    }

    pub fn get_map(&self, name: &str) -> Result<Option<&[(Value, Value)]>, ValidationError> {
        let value = self.typed(name, TypeKind::Map)?;
        value.try_map().map_err(|_| self.mismatch(name, "Map", value))
    }

    pub fn get_struct(&self, name: &str) -> Result<Option<&Struct>, ValidationError> {
        let value = self.typed(name, TypeKind::Struct)?;
        value.try_struct().map_err(|_| self.mismatch(name, "Struct", value))
    }

    /// Decimal stored in a Decimal logical field.
    pub fn get_decimal(&self, name: &str) -> Result<Option<Decimal>, ValidationError> {
        let value = self.typed(name, TypeKind::Bytes)?;
        value.try_decimal().map_err(|_| self.mismatch(name, "Decimal", value))
    }

    /// Instant stored in a Date, Time or Timestamp logical field.
    pub fn get_datetime(&self, name: &str) -> Result<Option<DateTime<Utc>>, ValidationError> {
        let value = self.get(name)?;
        value.try_datetime().map_err(|_| self.mismatch(name, "DateTime", value))
    }

    /// Field values in declaration order, without default substitution.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}
