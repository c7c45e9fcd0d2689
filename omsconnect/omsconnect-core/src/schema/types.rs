use std::{
    collections::{BTreeMap, HashMap},
    fmt::{Display, Formatter, Result},
    hash::{Hash, Hasher},
    sync::{Arc, LazyLock},
};

use crate::{TypeKind, Value};

/// Shared handle to an immutable [`Schema`].
pub type SchemaRef = Arc<Schema>;

/// Immutable description of the shape of a value.
///
/// Built once through [`SchemaBuilder`](crate::SchemaBuilder) and shared by
/// reference afterwards. Equality and hashing are structural over kind,
/// logical name, version, parameters, data source, optionality and the
/// kind-specific body. Documentation and default values are descriptive and
/// do not take part in equality.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) kind: TypeKind,
    pub(crate) name: Option<String>,
    pub(crate) version: Option<i32>,
    pub(crate) doc: Option<String>,
    pub(crate) data_source: Option<String>,
    pub(crate) optional: bool,
    pub(crate) default_value: Option<Value>,
    pub(crate) parameters: BTreeMap<String, String>,
    pub(crate) body: SchemaBody,
}

/// Kind-specific payload of a [`Schema`].
#[derive(Debug, Clone)]
pub enum SchemaBody {
    Primitive,
    Array {
        element: SchemaRef,
    },
    Map {
        key: SchemaRef,
        value: SchemaRef,
    },
    Struct {
        fields: Vec<Field>,
        by_name: HashMap<String, usize>,
    },
}

impl PartialEq for SchemaBody {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SchemaBody::Primitive, SchemaBody::Primitive) => true,
            (SchemaBody::Array { element: a }, SchemaBody::Array { element: b }) => a == b,
            (
                SchemaBody::Map { key: ka, value: va },
                SchemaBody::Map { key: kb, value: vb },
            ) => ka == kb && va == vb,
            (SchemaBody::Struct { fields: a, .. }, SchemaBody::Struct { fields: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for SchemaBody {}

impl Hash for SchemaBody {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            SchemaBody::Primitive => {}
            SchemaBody::Array { element } => element.hash(state),
            SchemaBody::Map { key, value } => {
                key.hash(state);
                value.hash(state);
            }
            SchemaBody::Struct { fields, .. } => fields.hash(state),
        }
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.optional == other.optional
            && self.name == other.name
            && self.version == other.version
            && self.data_source == other.data_source
            && self.parameters == other.parameters
            && self.body == other.body
    }
}

impl Eq for Schema {}

impl Hash for Schema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.optional.hash(state);
        self.name.hash(state);
        self.version.hash(state);
        self.data_source.hash(state);
        self.parameters.hash(state);
        self.body.hash(state);
    }
}

macro_rules! predefined_schemas {
    ($($required:ident, $optional:ident => $kind:ident;)*) => {
        $(
            pub fn $required() -> SchemaRef {
                static SCHEMA: LazyLock<SchemaRef> =
                    LazyLock::new(|| Arc::new(Schema::bare(TypeKind::$kind, false)));
                SCHEMA.clone()
            }

            pub fn $optional() -> SchemaRef {
                static SCHEMA: LazyLock<SchemaRef> =
                    LazyLock::new(|| Arc::new(Schema::bare(TypeKind::$kind, true)));
                SCHEMA.clone()
            }
        )*

        /// Shared schema for a primitive kind, `None` for composite kinds.
        pub fn primitive(kind: TypeKind, optional: bool) -> Option<SchemaRef> {
            match (kind, optional) {
                $(
                    (TypeKind::$kind, false) => Some(Self::$required()),
                    (TypeKind::$kind, true) => Some(Self::$optional()),
                )*
                _ => None,
            }
        }
    };
}

impl Schema {
    predefined_schemas! {
        int8, optional_int8 => Int8;
        int16, optional_int16 => Int16;
        int32, optional_int32 => Int32;
        int64, optional_int64 => Int64;
        float32, optional_float32 => Float32;
        float64, optional_float64 => Float64;
        boolean, optional_boolean => Boolean;
        string, optional_string => String;
        bytes, optional_bytes => Bytes;
    }

    pub(crate) fn bare(kind: TypeKind, optional: bool) -> Self {
        Self {
            kind,
            name: None,
            version: None,
            doc: None,
            data_source: None,
            optional,
            default_value: None,
            parameters: BTreeMap::new(),
            body: SchemaBody::Primitive,
        }
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Logical type name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    pub fn version(&self) -> Option<i32> {
        self.version
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn data_source(&self) -> Option<&str> {
        self.data_source.as_deref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    pub fn body(&self) -> &SchemaBody {
        &self.body
    }

    /// Fields of a struct schema in declaration order.
    pub fn fields(&self) -> Option<&[Field]> {
        match &self.body {
            SchemaBody::Struct { fields, .. } => Some(fields),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        match &self.body {
            SchemaBody::Struct { fields, by_name } => by_name.get(name).map(|&i| &fields[i]),
            _ => None,
        }
    }

    pub fn element_schema(&self) -> Option<&SchemaRef> {
        match &self.body {
            SchemaBody::Array { element } => Some(element),
            _ => None,
        }
    }

    pub fn key_schema(&self) -> Option<&SchemaRef> {
        match &self.body {
            SchemaBody::Map { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn value_schema(&self) -> Option<&SchemaRef> {
        match &self.body {
            SchemaBody::Map { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.body {
            SchemaBody::Primitive => write!(f, "{}", self.kind)?,
            SchemaBody::Array { element } => write!(f, "array<{element}>")?,
            SchemaBody::Map { key, value } => write!(f, "map<{key}, {value}>")?,
            SchemaBody::Struct { fields, .. } => {
                f.write_str("struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.schema)?;
                }
                f.write_str(">")?;
            }
        }
        if let Some(name) = &self.name {
            write!(f, "[{name}]")?;
        }
        if self.optional {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Named, positioned member of a struct schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub index: usize,
    pub name: String,
    pub schema: SchemaRef,
}

impl Field {
    pub fn new(index: usize, name: impl Into<String>, schema: SchemaRef) -> Self {
        Self {
            index,
            name: name.into(),
            schema,
        }
    }
}
