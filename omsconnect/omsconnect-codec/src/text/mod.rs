//! Compact text notation for values.
//!
//! ```text
//! true  -12  4.5  2024-01-31  12:30:00.000Z  2024-01-31T12:30:00.000Z
//! [1,2,3]  {"a":15}  {k:[1,2],other:"quoted \"text\""}
//! ```
//!
//! Parsing infers the narrowest schema for every literal and widens numeric
//! element schemas across a collection. Printing is the inverse; printing a
//! parsed value and parsing it again is stable.

mod lex;
mod parser;
mod printer;
mod temporal;
mod widen;

use omsconnect_core::Value;

pub use parser::{MAX_NESTING_DEPTH, parse, try_parse_collection};
pub use printer::Text;

/// Print a top-level value.
pub fn print(value: &Value) -> String {
    Text::new(value).to_string()
}

/// Print a value as it appears inside a collection, with strings quoted.
pub fn print_embedded(value: &Value) -> String {
    Text::embedded(value).to_string()
}
