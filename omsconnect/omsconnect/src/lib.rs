//! Self-describing values for OpenMessaging Connect.
//!
//! - [`core`]: schemas, logical types, [`Struct`](core::Struct) and validation
//! - [`codec`]: [`ValueBox`](codec::ValueBox), coercion and the text notation
//! - [`api`]: connector records and headers (feature `api`)

#[cfg(feature = "api")]
pub use omsconnect_api as api;
pub use omsconnect_codec as codec;
pub use omsconnect_core as core;

pub use omsconnect_codec::ValueBox;
pub use omsconnect_core::{Schema, SchemaBuilder, SchemaRef, Struct, TypeKind, Value};
