use std::fmt::{Display, Formatter, Result};

/// Physical kind of a [`Schema`](crate::Schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    String,
    Bytes,
    Array,
    Map,
    Struct,
}

impl TypeKind {
    pub const ALL: [TypeKind; 12] = [
        TypeKind::Int8,
        TypeKind::Int16,
        TypeKind::Int32,
        TypeKind::Int64,
        TypeKind::Float32,
        TypeKind::Float64,
        TypeKind::Boolean,
        TypeKind::String,
        TypeKind::Bytes,
        TypeKind::Array,
        TypeKind::Map,
        TypeKind::Struct,
    ];

    pub fn is_primitive(&self) -> bool {
        !matches!(self, TypeKind::Array | TypeKind::Map | TypeKind::Struct)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            TypeKind::Int8 | TypeKind::Int16 | TypeKind::Int32 | TypeKind::Int64
        )
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, TypeKind::Float32 | TypeKind::Float64)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            TypeKind::Int8 => "int8",
            TypeKind::Int16 => "int16",
            TypeKind::Int32 => "int32",
            TypeKind::Int64 => "int64",
            TypeKind::Float32 => "float32",
            TypeKind::Float64 => "float64",
            TypeKind::Boolean => "boolean",
            TypeKind::String => "string",
            TypeKind::Bytes => "bytes",
            TypeKind::Array => "array",
            TypeKind::Map => "map",
            TypeKind::Struct => "struct",
        }
    }
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}
