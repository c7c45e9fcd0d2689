use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use omsconnect_codec::ValueBox;
use omsconnect_core::{Decimal, Schema, SchemaRef, Struct, Value, logical};
use tracing::debug;

use crate::ConnectError;

/// A named, typed value attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    key: String,
    data: ValueBox,
}

impl Header {
    /// Header holding `value` under `schema`; the value is validated first.
    pub fn new(
        key: impl Into<String>,
        schema: SchemaRef,
        value: impl Into<Value>,
    ) -> Result<Self, ConnectError> {
        let key = key.into();
        match ValueBox::with_value(schema, value) {
            Ok(data) => Ok(Self { key, data }),
            Err(error) => {
                debug!(header = %key, %error, "rejecting header value");
                Err(error.into())
            }
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn data(&self) -> &ValueBox {
        &self.data
    }

    pub fn schema(&self) -> Option<&SchemaRef> {
        self.data.schema()
    }

    pub fn value(&self) -> &Value {
        self.data.value()
    }

    /// Same key, new schema and value.
    pub fn with(&self, schema: SchemaRef, value: impl Into<Value>) -> Result<Self, ConnectError> {
        Self::new(self.key.clone(), schema, value)
    }

    pub fn rename(&mut self, key: impl Into<String>) -> &mut Self {
        self.key = key.into();
        self
    }
}

/// Ordered collection of [`Header`]s. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers {
    headers: Vec<Header>,
}

macro_rules! typed_adders {
    ($($method:ident($ty:ty) => $schema:ident;)*) => {
        $(
            pub fn $method(&mut self, key: impl Into<String>, value: $ty) -> Result<&mut Self, ConnectError> {
                self.add_value(key, Schema::$schema(), value)
            }
        )*
    };
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.headers.iter()
    }

    /// First header called `key`.
    pub fn find(&self, key: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.key == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Header> {
        self.headers.iter_mut().find(|h| h.key == key)
    }

    /// Headers by key; for repeated keys the last one wins.
    pub fn to_map(&self) -> HashMap<&str, &Header> {
        self.headers.iter().map(|h| (h.key(), h)).collect()
    }

    pub fn add(&mut self, header: Header) -> &mut Self {
        self.headers.push(header);
        self
    }

    pub fn add_value(
        &mut self,
        key: impl Into<String>,
        schema: SchemaRef,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ConnectError> {
        let header = Header::new(key, schema, value)?;
        Ok(self.add(header))
    }

    typed_adders! {
        add_string(&str) => string;
        add_bool(bool) => boolean;
        add_i8(i8) => int8;
        add_i16(i16) => int16;
        add_i32(i32) => int32;
        add_i64(i64) => int64;
        add_f32(f32) => float32;
        add_f64(f64) => float64;
    }

    pub fn add_bytes(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Bytes>,
    ) -> Result<&mut Self, ConnectError> {
        self.add_value(key, Schema::bytes(), Value::Bytes(value.into()))
    }

    /// `schema` must be an array schema describing `values`.
    pub fn add_list(
        &mut self,
        key: impl Into<String>,
        values: Vec<Value>,
        schema: SchemaRef,
    ) -> Result<&mut Self, ConnectError> {
        self.add_value(key, schema, Value::List(values))
    }

    /// `schema` must be a map schema describing `entries`.
    pub fn add_map(
        &mut self,
        key: impl Into<String>,
        entries: Vec<(Value, Value)>,
        schema: SchemaRef,
    ) -> Result<&mut Self, ConnectError> {
        self.add_value(key, schema, Value::Map(entries))
    }

    pub fn add_struct(
        &mut self,
        key: impl Into<String>,
        value: Struct,
    ) -> Result<&mut Self, ConnectError> {
        value.validate()?;
        let schema = value.schema().clone();
        self.add_value(key, schema, value)
    }

    pub fn add_decimal(
        &mut self,
        key: impl Into<String>,
        value: Decimal,
    ) -> Result<&mut Self, ConnectError> {
        self.add_value(key, logical::decimal::schema(value.scale()), value)
    }

    /// The instant must fall on midnight UTC.
    pub fn add_date(
        &mut self,
        key: impl Into<String>,
        value: DateTime<Utc>,
    ) -> Result<&mut Self, ConnectError> {
        let schema = logical::date::schema();
        logical::date::encode(&schema, &value)?;
        self.add_value(key, schema, value)
    }

    /// The instant must lie within the epoch day.
    pub fn add_time(
        &mut self,
        key: impl Into<String>,
        value: DateTime<Utc>,
    ) -> Result<&mut Self, ConnectError> {
        let schema = logical::time::schema();
        logical::time::encode(&schema, &value)?;
        self.add_value(key, schema, value)
    }

    pub fn add_timestamp(
        &mut self,
        key: impl Into<String>,
        value: DateTime<Utc>,
    ) -> Result<&mut Self, ConnectError> {
        self.add_value(key, logical::timestamp::schema(), value)
    }

    /// Drop every header called `key`.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.headers.retain(|h| h.key != key);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.headers.clear();
        self
    }

    pub fn duplicate(&self) -> Self {
        self.clone()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}
