use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use omsconnect_core::{
    ConversionError, Decimal, Field, Schema, SchemaBody, SchemaBuilder, SchemaRef, Struct,
    TypeKind, ValidationError, Value, ValueTypeError, logical, validate_value,
};

use crate::{
    ParseError,
    convert::convert_to,
    infer::infer_schema,
    text::{self, Text},
};

/// A value together with the schema that describes it.
///
/// The schema may be absent, in which case the value's own shape decides how
/// it prints and converts. Mutators validate against the schema when there
/// is one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueBox {
    schema: Option<SchemaRef>,
    value: Value,
}

/// Insert into ordered map entries, replacing the value of an equal key in
/// place.
pub(crate) fn insert_entry(entries: &mut Vec<(Value, Value)>, key: Value, value: Value) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

fn element_error(role: &'static str, source: ValidationError) -> ValidationError {
    ValidationError::InvalidElement {
        role,
        source: Box::new(source),
    }
}

impl ValueBox {
    /// Empty box for `schema`: structs, arrays and maps start with an empty
    /// container, everything else with null.
    pub fn new(schema: SchemaRef) -> Self {
        let value = match schema.kind() {
            TypeKind::Struct => Struct::new(schema.clone()).map_or(Value::Null, Value::Struct),
            TypeKind::Array => Value::List(Vec::new()),
            TypeKind::Map => Value::Map(Vec::new()),
            _ => Value::Null,
        };
        Self {
            schema: Some(schema),
            value,
        }
    }

    /// Box `value` under `schema`, validating it first.
    pub fn with_value(schema: SchemaRef, value: impl Into<Value>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_value(None, &schema, &value)?;
        Ok(Self {
            schema: Some(schema),
            value,
        })
    }

    /// Box without a schema.
    pub fn untyped(value: impl Into<Value>) -> Self {
        Self {
            schema: None,
            value: value.into(),
        }
    }

    pub(crate) fn from_parts(schema: Option<SchemaRef>, value: Value) -> Self {
        Self { schema, value }
    }

    /// Read a value from the text notation. See [`text::parse`].
    pub fn parse(text: &str) -> Self {
        text::parse(text)
    }

    /// See [`text::try_parse_collection`].
    pub fn try_parse_collection(text: &str) -> Result<Self, ParseError> {
        text::try_parse_collection(text)
    }

    pub fn schema(&self) -> Option<&SchemaRef> {
        self.schema.as_ref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (Option<SchemaRef>, Value) {
        (self.schema, self.value)
    }

    /// Replace the value without validation.
    pub fn set_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.value = value.into();
        self
    }

    /// Store a value: appended for array schemas, replacing otherwise.
    pub fn put(&mut self, value: impl Into<Value>) -> Result<&mut Self, ValidationError> {
        let value = value.into();
        let Some(schema) = &self.schema else {
            self.value = value;
            return Ok(self);
        };
        match schema.body() {
            SchemaBody::Array { element } => {
                validate_value(None, element, &value)
                    .map_err(|e| element_error("array element", e))?;
                self.push(value);
            }
            _ => {
                validate_value(None, schema, &value)?;
                self.value = value;
            }
        }
        Ok(self)
    }

    fn push(&mut self, value: Value) {
        match &mut self.value {
            Value::List(items) => items.push(value),
            slot => *slot = Value::List(vec![value]),
        }
    }

    /// Append every element of `values` to an array box.
    pub fn extend<I, V>(&mut self, values: I) -> Result<&mut Self, ValidationError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if let Some(element) = self.schema.as_ref().and_then(|s| s.element_schema()) {
            for value in &values {
                validate_value(None, element, value)
                    .map_err(|e| element_error("array element", e))?;
            }
        }
        for value in values {
            self.push(value);
        }
        Ok(self)
    }

    /// Insert a map entry; an existing equal key keeps its position.
    pub fn put_entry(
        &mut self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ValidationError> {
        let (key, value) = (key.into(), value.into());
        self.check_entry(&key, &value)?;
        self.insert(key, value);
        Ok(self)
    }

    /// Insert every entry, validating all of them before the first insert.
    pub fn put_entries<I, K, V>(&mut self, entries: I) -> Result<&mut Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let entries: Vec<(Value, Value)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        for (key, value) in &entries {
            self.check_entry(key, value)?;
        }
        for (key, value) in entries {
            self.insert(key, value);
        }
        Ok(self)
    }

    fn check_entry(&self, key: &Value, value: &Value) -> Result<(), ValidationError> {
        if key.is_null() {
            return Err(ValidationError::NullKey);
        }
        if let Some(schema) = &self.schema {
            let (Some(key_schema), Some(value_schema)) = (schema.key_schema(), schema.value_schema())
            else {
                return Err(ValidationError::TypeMismatch {
                    field: None,
                    schema: schema.to_string(),
                    expected: "Map",
                    found: "Map entry",
                });
            };
            validate_value(None, key_schema, key).map_err(|e| element_error("map key", e))?;
            validate_value(None, value_schema, value)
                .map_err(|e| element_error("map value", e))?;
        }
        Ok(())
    }

    fn insert(&mut self, key: Value, value: Value) {
        match &mut self.value {
            Value::Map(entries) => insert_entry(entries, key, value),
            slot => *slot = Value::Map(vec![(key, value)]),
        }
    }

    fn struct_mut(&mut self) -> Result<&mut Struct, ValidationError> {
        match &mut self.value {
            Value::Struct(s) => Ok(s),
            _ => Err(ValidationError::NotAStruct {
                kind: self
                    .schema
                    .as_ref()
                    .map_or(TypeKind::Struct, |s| s.kind()),
            }),
        }
    }

    /// Set a field of a struct box.
    pub fn put_field(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ValidationError> {
        self.struct_mut()?.put(name, value)?;
        Ok(self)
    }

    pub fn put_struct_field(
        &mut self,
        field: &Field,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ValidationError> {
        self.struct_mut()?.put_field(field, value)?;
        Ok(self)
    }

    /// Validate the value against the schema; untyped boxes always pass.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.schema {
            Some(schema) => validate_value(None, schema, &self.value),
            None => Ok(()),
        }
    }

    /// See [`infer_schema`](crate::infer_schema).
    pub fn infer_schema(&self) -> Option<SchemaRef> {
        infer_schema(&self.value)
    }

    /// Convert the value into one valid for `to`.
    pub fn convert_to(&self, to: &Schema) -> Result<Value, ConversionError> {
        convert_to(self.schema.as_deref(), to, &self.value)
    }

    pub fn convert_to_bool(&self) -> Result<bool, ConversionError> {
        self.convert_typed(&Schema::boolean(), |v| v.try_bool())
    }

    pub fn convert_to_int8(&self) -> Result<i8, ConversionError> {
        self.convert_typed(&Schema::int8(), |v| v.try_i8())
    }

    pub fn convert_to_int16(&self) -> Result<i16, ConversionError> {
        self.convert_typed(&Schema::int16(), |v| v.try_i16())
    }

    pub fn convert_to_int32(&self) -> Result<i32, ConversionError> {
        self.convert_typed(&Schema::int32(), |v| v.try_i32())
    }

    pub fn convert_to_int64(&self) -> Result<i64, ConversionError> {
        self.convert_typed(&Schema::int64(), |v| v.try_i64())
    }

    pub fn convert_to_float32(&self) -> Result<f32, ConversionError> {
        self.convert_typed(&Schema::float32(), |v| v.try_f32())
    }

    pub fn convert_to_float64(&self) -> Result<f64, ConversionError> {
        self.convert_typed(&Schema::float64(), |v| v.try_f64())
    }

    pub fn convert_to_string(&self) -> Result<String, ConversionError> {
        self.convert_typed(&Schema::string(), |v| v.try_str().map(|s| s.map(str::to_string)))
    }

    pub fn convert_to_list(&self) -> Result<Vec<Value>, ConversionError> {
        let target = SchemaBuilder::array(Schema::optional_string()).build();
        self.convert_typed(&target, |v| v.try_list().map(|l| l.map(<[Value]>::to_vec)))
    }

    pub fn convert_to_map(&self) -> Result<Vec<(Value, Value)>, ConversionError> {
        let target = SchemaBuilder::map(Schema::string(), Schema::optional_string()).build();
        self.convert_typed(&target, |v| v.try_map().map(|m| m.map(<[_]>::to_vec)))
    }

    pub fn convert_to_struct(&self) -> Result<Struct, ConversionError> {
        let target = SchemaBuilder::new_struct().build();
        self.convert_typed(&target, |v| v.try_struct().map(|s| s.cloned()))
    }

    pub fn convert_to_date(&self) -> Result<DateTime<Utc>, ConversionError> {
        self.convert_typed(&logical::date::schema(), |v| v.try_datetime())
    }

    pub fn convert_to_time(&self) -> Result<DateTime<Utc>, ConversionError> {
        self.convert_typed(&logical::time::schema(), |v| v.try_datetime())
    }

    pub fn convert_to_timestamp(&self) -> Result<DateTime<Utc>, ConversionError> {
        self.convert_typed(&logical::timestamp::schema(), |v| v.try_datetime())
    }

    pub fn convert_to_decimal(&self, scale: i32) -> Result<Decimal, ConversionError> {
        self.convert_typed(&logical::decimal::schema(scale), |v| v.try_decimal())
    }

    fn convert_typed<T>(
        &self,
        to: &Schema,
        extract: impl FnOnce(&Value) -> Result<Option<T>, ValueTypeError>,
    ) -> Result<T, ConversionError> {
        let converted = self.convert_to(to)?;
        match extract(&converted) {
            Ok(Some(v)) => Ok(v),
            _ => Err(ConversionError::Unsupported {
                from: converted.variant_name().to_string(),
                to: to.to_string(),
            }),
        }
    }
}

impl Display for ValueBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Text::new(&self.value).fmt(f)
    }
}
