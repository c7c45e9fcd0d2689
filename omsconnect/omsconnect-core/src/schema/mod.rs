mod builder;
mod format;
mod types;

pub use builder::SchemaBuilder;
pub use format::format_schema;
pub use types::{Field, Schema, SchemaBody, SchemaRef};
