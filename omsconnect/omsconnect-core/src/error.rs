//! Error types for schema construction, validation and value conversion.

use crate::TypeKind;

/// Error returned by [`SchemaBuilder`](crate::SchemaBuilder) operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaBuildError {
    /// A struct builder already holds a field with this name.
    #[error("cannot create field because of field name duplication: {name}")]
    DuplicateField { name: String },

    /// Fields can only be added to struct builders.
    #[error("cannot add field '{name}' to a non-struct schema of kind {kind}")]
    NotStruct { name: String, kind: TypeKind },

    /// A single-assignment attribute was set twice with different values.
    #[error("{attribute} has already been set (current: {current}, new: {new})")]
    AlreadySet {
        attribute: &'static str,
        current: String,
        new: String,
    },

    /// A required element, key or value schema was not supplied.
    #[error("{role} schema cannot be null")]
    NullSchema { role: &'static str },

    /// Field names must be non-empty.
    #[error("field name cannot be empty")]
    EmptyFieldName,

    /// A logical type name was given to a schema of the wrong physical kind.
    #[error("logical type {name} requires kind {expected}, found {found}")]
    LogicalKindMismatch {
        name: String,
        expected: TypeKind,
        found: TypeKind,
    },

    /// The default value does not satisfy the schema it is attached to.
    #[error("invalid default value: {source}")]
    InvalidDefault {
        #[source]
        source: Box<ValidationError>,
    },
}

/// Error returned when a value does not satisfy its schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A null value was supplied for a schema that is not optional.
    #[error("{}", required_message(.field))]
    RequiredFieldMissing { field: Option<String> },

    /// The runtime representation of the value is not accepted by the schema.
    #[error("invalid value for {schema}: expected {expected}, found {found}{}", field_suffix(.field))]
    TypeMismatch {
        field: Option<String>,
        schema: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A struct value carries a schema different from the one expected.
    #[error("struct schemas do not match{}", field_suffix(.field))]
    StructSchemaMismatch { field: Option<String> },

    /// An array element, map key or map value is invalid.
    #[error("invalid {role}: {source}")]
    InvalidElement {
        role: &'static str,
        #[source]
        source: Box<ValidationError>,
    },

    /// The struct schema has no field with this name.
    #[error("{name} is not a valid field name")]
    UnknownField { name: String },

    /// A struct was requested for a schema that is not struct-kind.
    #[error("not a struct schema: {kind}")]
    NotAStruct { kind: TypeKind },

    /// Map entries require a key.
    #[error("map key cannot be null")]
    NullKey,
}

fn required_message(field: &Option<String>) -> String {
    match field {
        Some(name) => format!("invalid value: null used for required field \"{name}\""),
        None => "invalid value: null used for required field".to_string(),
    }
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(name) => format!(" (field \"{name}\")"),
        None => String::new(),
    }
}

/// Error returned by logical type codecs and value coercion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Conversion of a null value was requested.
    #[error("cannot convert a null value")]
    NullValue,

    /// No conversion exists between the source representation and the target.
    #[error("cannot convert {from} to {to}")]
    Unsupported { from: String, to: String },

    /// A logical value lies outside the range allowed by its type.
    #[error("{logical} value out of range: {detail}")]
    OutOfRange {
        logical: &'static str,
        detail: String,
    },

    /// A Date was encoded from an instant that is not at midnight.
    #[error("date must not have a time-of-day component (millis of day: {millis_of_day})")]
    NonZeroTimeComponent { millis_of_day: i64 },

    /// A Decimal scale differs from the scale declared by its schema.
    #[error("decimal scale mismatch: schema scale {expected}, value scale {actual}")]
    ScaleMismatch { expected: i32, actual: i32 },

    /// A Decimal schema lacks a parseable `scale` parameter.
    #[error("invalid decimal schema: scale parameter missing or invalid ({found:?})")]
    MissingOrInvalidScale { found: Option<String> },

    /// A logical codec was invoked with a schema of another logical type.
    #[error("schema {found:?} is not a {expected} schema")]
    LogicalTypeMismatch {
        expected: &'static str,
        found: Option<String>,
    },

    /// Text could not be read as a number.
    #[error("invalid number: {text:?}")]
    InvalidNumber { text: String },

    /// A decimal value does not fit in the supported unscaled width.
    #[error("decimal overflow: {detail}")]
    DecimalOverflow { detail: String },

    #[error(transparent)]
    Schema(#[from] SchemaBuildError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Error returned by the typed accessors of [`Value`](crate::Value).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("type mismatch: expected {expected}, found {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: &'static str,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: &'static str) -> Self {
        Self {
            expected: expected.into(),
            actual,
        }
    }
}

/// Umbrella for every data-model error raised by this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error(transparent)]
    Schema(#[from] SchemaBuildError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    ValueType(#[from] ValueTypeError),
}
