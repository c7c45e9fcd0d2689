//! Value boxes and the compact text notation for `omsconnect`.
//!
//! A [`ValueBox`] pairs an optional [`Schema`](omsconnect_core::Schema) with a
//! [`Value`](omsconnect_core::Value). Boxes can be built incrementally,
//! converted between schemas ([`convert_to`]), inspected for an inferred
//! schema ([`infer_schema`]) and read from or written to text with
//! [`text::parse`] and [`text::print`].

mod convert;
mod error;
mod infer;
pub mod text;
mod value_box;

pub use convert::{as_double, as_long, convert_to};
pub use error::ParseError;
pub use infer::infer_schema;
pub use value_box::ValueBox;
