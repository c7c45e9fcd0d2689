use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use super::{Field, Schema, SchemaBody, SchemaRef};
use crate::{SchemaBuildError, TypeKind, Value, logical, validate::validate_value};

/// Fluent constructor for [`Schema`].
///
/// Builder methods take `self` by value so they chain; the fallible ones
/// return `Result<Self, SchemaBuildError>`. [`build`](Self::build) snapshots
/// the current state, so a builder may keep growing after a schema has been
/// built from it without affecting that schema.
///
/// ```
/// use omsconnect_core::{Schema, SchemaBuilder};
///
/// let schema = SchemaBuilder::new_struct()
///     .name("point")?
///     .field("x", Schema::int32())?
///     .field("y", Schema::int32())?
///     .build();
/// assert_eq!(schema.fields().map(<[_]>::len), Some(2));
/// # Ok::<(), omsconnect_core::SchemaBuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    inner: Schema,
}

impl SchemaBuilder {
    /// Builder for a primitive or struct kind.
    ///
    /// Array and map kinds need their nested schemas up front and fail with
    /// [`SchemaBuildError::NullSchema`]; use [`array`](Self::array) and
    /// [`map`](Self::map) for those.
    pub fn of_kind(kind: TypeKind) -> Result<Self, SchemaBuildError> {
        match kind {
            TypeKind::Array => Err(SchemaBuildError::NullSchema { role: "element" }),
            TypeKind::Map => Err(SchemaBuildError::NullSchema { role: "key" }),
            TypeKind::Struct => Ok(Self::new_struct()),
            _ => Ok(Self::primitive(kind)),
        }
    }

    fn primitive(kind: TypeKind) -> Self {
        Self {
            inner: Schema::bare(kind, false),
        }
    }

    pub fn int8() -> Self {
        Self::primitive(TypeKind::Int8)
    }

    pub fn int16() -> Self {
        Self::primitive(TypeKind::Int16)
    }

    pub fn int32() -> Self {
        Self::primitive(TypeKind::Int32)
    }

    pub fn int64() -> Self {
        Self::primitive(TypeKind::Int64)
    }

    pub fn float32() -> Self {
        Self::primitive(TypeKind::Float32)
    }

    pub fn float64() -> Self {
        Self::primitive(TypeKind::Float64)
    }

    pub fn boolean() -> Self {
        Self::primitive(TypeKind::Boolean)
    }

    pub fn string() -> Self {
        Self::primitive(TypeKind::String)
    }

    pub fn bytes() -> Self {
        Self::primitive(TypeKind::Bytes)
    }

    pub fn new_struct() -> Self {
        let mut inner = Schema::bare(TypeKind::Struct, false);
        inner.body = SchemaBody::Struct {
            fields: Vec::new(),
            by_name: HashMap::new(),
        };
        Self { inner }
    }

    pub fn array(element: SchemaRef) -> Self {
        let mut inner = Schema::bare(TypeKind::Array, false);
        inner.body = SchemaBody::Array { element };
        Self { inner }
    }

    pub fn map(key: SchemaRef, value: SchemaRef) -> Self {
        let mut inner = Schema::bare(TypeKind::Map, false);
        inner.body = SchemaBody::Map { key, value };
        Self { inner }
    }

    pub fn try_array(element: Option<SchemaRef>) -> Result<Self, SchemaBuildError> {
        let element = element.ok_or(SchemaBuildError::NullSchema { role: "element" })?;
        Ok(Self::array(element))
    }

    pub fn try_map(
        key: Option<SchemaRef>,
        value: Option<SchemaRef>,
    ) -> Result<Self, SchemaBuildError> {
        let key = key.ok_or(SchemaBuildError::NullSchema { role: "key" })?;
        let value = value.ok_or(SchemaBuildError::NullSchema { role: "value" })?;
        Ok(Self::map(key, value))
    }

    /// Builder preset with a logical name and version.
    pub(crate) fn logical(kind: TypeKind, name: &str, version: i32) -> Self {
        let mut builder = Self::primitive(kind);
        builder.inner.name = Some(name.to_string());
        builder.inner.version = Some(version);
        builder
    }

    pub fn kind(&self) -> TypeKind {
        self.inner.kind
    }

    /// Set the schema name. Logical type names are only accepted on their
    /// physical kind.
    pub fn name(mut self, name: impl Into<String>) -> Result<Self, SchemaBuildError> {
        let name = name.into();
        if let Some(expected) = logical::physical_kind(&name)
            && expected != self.inner.kind
        {
            return Err(SchemaBuildError::LogicalKindMismatch {
                name,
                expected,
                found: self.inner.kind,
            });
        }
        set_once(&mut self.inner.name, name, "name")?;
        Ok(self)
    }

    pub fn version(mut self, version: i32) -> Result<Self, SchemaBuildError> {
        set_once(&mut self.inner.version, version, "version")?;
        Ok(self)
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Result<Self, SchemaBuildError> {
        set_once(&mut self.inner.doc, doc.into(), "doc")?;
        Ok(self)
    }

    pub fn data_source(mut self, source: impl Into<String>) -> Result<Self, SchemaBuildError> {
        set_once(&mut self.inner.data_source, source.into(), "data source")?;
        Ok(self)
    }

    pub fn optional(mut self) -> Self {
        self.inner.optional = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.inner.optional = false;
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.parameters.insert(key.into(), value.into());
        self
    }

    pub fn parameters<K, V>(mut self, parameters: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner
            .parameters
            .extend(parameters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attach a default value, checked against the schema as built so far.
    pub fn default_value(mut self, value: Value) -> Result<Self, SchemaBuildError> {
        validate_value(None, &self.inner, &value).map_err(|source| {
            SchemaBuildError::InvalidDefault {
                source: Box::new(source),
            }
        })?;
        set_once(&mut self.inner.default_value, value, "default value")?;
        Ok(self)
    }

    /// Append a field to a struct builder.
    pub fn field(
        mut self,
        name: impl Into<String>,
        schema: SchemaRef,
    ) -> Result<Self, SchemaBuildError> {
        let name = name.into();
        let kind = self.inner.kind;
        let SchemaBody::Struct { fields, by_name } = &mut self.inner.body else {
            return Err(SchemaBuildError::NotStruct { name, kind });
        };
        if name.is_empty() {
            return Err(SchemaBuildError::EmptyFieldName);
        }
        if by_name.contains_key(&name) {
            return Err(SchemaBuildError::DuplicateField { name });
        }
        let index = fields.len();
        by_name.insert(name.clone(), index);
        fields.push(Field::new(index, name, schema));
        Ok(self)
    }

    /// Re-declare an existing field (by name and schema) on this builder.
    pub fn field_def(self, field: &Field) -> Result<Self, SchemaBuildError> {
        self.field(field.name.clone(), Arc::clone(&field.schema))
    }

    pub fn build(&self) -> SchemaRef {
        Arc::new(self.inner.clone())
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, attribute: &'static str) -> Result<(), SchemaBuildError>
where
    T: PartialEq + std::fmt::Debug,
{
    match slot {
        Some(current) if *current != value => Err(SchemaBuildError::AlreadySet {
            attribute,
            current: format!("{current:?}"),
            new: format!("{value:?}"),
        }),
        _ => {
            *slot = Some(value);
            Ok(())
        }
    }
}

impl From<&Schema> for SchemaBuilder {
    fn from(schema: &Schema) -> Self {
        Self {
            inner: schema.clone(),
        }
    }
}
