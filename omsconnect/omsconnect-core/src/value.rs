//! Runtime representation of data described by a [`Schema`](crate::Schema).

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::{Decimal, Struct, TypeKind, error::ValueTypeError};

/// Value held by a [`Struct`] slot or a value box.
///
/// Logical values have their own variants: [`Value::Decimal`] for the
/// Decimal logical type and [`Value::DateTime`] for Date, Time and
/// Timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(Arc<str>),
    Bytes(Bytes),
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Struct(Struct),
    Decimal(Decimal),
    DateTime(DateTime<Utc>),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn bytes(b: impl Into<Bytes>) -> Self {
        Self::Bytes(b.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Physical kind a plain (non-logical) schema would need to hold this
    /// value. Null and logical values have no intrinsic kind.
    pub fn kind(&self) -> Option<TypeKind> {
        match self {
            Value::Bool(_) => Some(TypeKind::Boolean),
            Value::Int8(_) => Some(TypeKind::Int8),
            Value::Int16(_) => Some(TypeKind::Int16),
            Value::Int32(_) => Some(TypeKind::Int32),
            Value::Int64(_) => Some(TypeKind::Int64),
            Value::Float32(_) => Some(TypeKind::Float32),
            Value::Float64(_) => Some(TypeKind::Float64),
            Value::String(_) => Some(TypeKind::String),
            Value::Bytes(_) => Some(TypeKind::Bytes),
            Value::List(_) => Some(TypeKind::Array),
            Value::Map(_) => Some(TypeKind::Map),
            Value::Struct(_) => Some(TypeKind::Struct),
            Value::Null | Value::Decimal(_) | Value::DateTime(_) => None,
        }
    }

    /// Look up a map entry by key.
    pub fn map_get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn try_bool(&self) -> Result<Option<bool>, ValueTypeError> {
        match self {
            Value::Bool(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Bool")),
        }
    }

    pub fn try_i8(&self) -> Result<Option<i8>, ValueTypeError> {
        match self {
            Value::Int8(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Int8")),
        }
    }

    pub fn try_i16(&self) -> Result<Option<i16>, ValueTypeError> {
        match self {
            Value::Int16(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Int16")),
        }
    }

    pub fn try_i32(&self) -> Result<Option<i32>, ValueTypeError> {
        match self {
            Value::Int32(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Int32")),
        }
    }

    pub fn try_i64(&self) -> Result<Option<i64>, ValueTypeError> {
        match self {
            Value::Int64(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Int64")),
        }
    }

    pub fn try_f32(&self) -> Result<Option<f32>, ValueTypeError> {
        match self {
            Value::Float32(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Float32")),
        }
    }

    pub fn try_f64(&self) -> Result<Option<f64>, ValueTypeError> {
        match self {
            Value::Float64(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Float64")),
        }
    }

    pub fn try_str(&self) -> Result<Option<&str>, ValueTypeError> {
        match self {
            Value::String(v) => Ok(Some(v.as_ref())),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("String")),
        }
    }

    pub fn try_bytes(&self) -> Result<Option<&[u8]>, ValueTypeError> {
        match self {
            Value::Bytes(v) => Ok(Some(v.as_ref())),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Bytes")),
        }
    }

    pub fn try_list(&self) -> Result<Option<&[Value]>, ValueTypeError> {
        match self {
            Value::List(v) => Ok(Some(v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("List")),
        }
    }

    pub fn try_map(&self) -> Result<Option<&[(Value, Value)]>, ValueTypeError> {
        match self {
            Value::Map(v) => Ok(Some(v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Map")),
        }
    }

    pub fn try_struct(&self) -> Result<Option<&Struct>, ValueTypeError> {
        match self {
            Value::Struct(v) => Ok(Some(v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Struct")),
        }
    }

    pub fn try_decimal(&self) -> Result<Option<Decimal>, ValueTypeError> {
        match self {
            Value::Decimal(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Decimal")),
        }
    }

    pub fn try_datetime(&self) -> Result<Option<DateTime<Utc>>, ValueTypeError> {
        match self {
            Value::DateTime(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("DateTime")),
        }
    }

    pub fn type_mismatch(&self, expected: impl Into<String>) -> ValueTypeError {
        ValueTypeError::new(expected, self.variant_name())
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int8(_) => "Int8",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Struct(_) => "Struct",
            Value::Decimal(_) => "Decimal",
            Value::DateTime(_) => "DateTime",
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    Bytes => Bytes,
    Vec<Value> => List,
    Vec<(Value, Value)> => Map,
    Struct => Struct,
    Decimal => Decimal,
    DateTime<Utc> => DateTime,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Arc::from(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
