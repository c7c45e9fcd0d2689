//! Schema model and validated values for `omsconnect`.
//!
//! This crate provides the schema description ([`Schema`] / [`SchemaBuilder`]),
//! the runtime value representation ([`Value`], [`Struct`], [`Decimal`]), the
//! logical type codecs in [`logical`] and the validation shared by every
//! value container.

mod decimal;
mod error;
mod kind;
pub mod logical;
mod schema;
mod struct_value;
mod validate;
mod value;

pub use decimal::Decimal;
pub use error::{ConversionError, DataError, SchemaBuildError, ValidationError, ValueTypeError};
pub use kind::TypeKind;
pub use schema::{Field, Schema, SchemaBody, SchemaBuilder, SchemaRef, format_schema};
pub use struct_value::Struct;
pub use validate::validate_value;
pub use value::Value;
