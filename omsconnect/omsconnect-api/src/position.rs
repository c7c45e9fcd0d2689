use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

use omsconnect_codec::text::print;
use omsconnect_core::Value;

macro_rules! string_keyed_map {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            entries: BTreeMap<String, Value>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
                self.entries.insert(key.into(), value.into());
                self
            }

            pub fn get(&self, key: &str) -> Option<&Value> {
                self.entries.get(key)
            }

            pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
                self.entries.iter().map(|(k, v)| (k.as_str(), v))
            }

            pub fn is_empty(&self) -> bool {
                self.entries.is_empty()
            }

            /// Entries as a map value, keys first converted to strings.
            pub fn to_value(&self) -> Value {
                Value::Map(
                    self.entries
                        .iter()
                        .map(|(k, v)| (Value::string(k), v.clone()))
                        .collect(),
                )
            }
        }

        impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for $name {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                Self {
                    entries: iter
                        .into_iter()
                        .map(|(k, v)| (k.into(), v.into()))
                        .collect(),
                }
            }
        }

        /// Prints in the text notation, e.g. `{"queue":3}`.
        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str(&print(&self.to_value()))
            }
        }
    };
}

string_keyed_map! {
    /// Identifies the source-side stream a record was read from, such as a
    /// file name or a table and shard.
    RecordPartition
}

string_keyed_map! {
    /// Where in its partition a record was read, such as a line number or a
    /// log sequence number.
    RecordOffset
}

/// Partition and offset of a source record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPosition {
    partition: RecordPartition,
    offset: RecordOffset,
}

impl RecordPosition {
    pub fn new(partition: RecordPartition, offset: RecordOffset) -> Self {
        Self { partition, offset }
    }

    pub fn partition(&self) -> &RecordPartition {
        &self.partition
    }

    pub fn offset(&self) -> &RecordOffset {
        &self.offset
    }
}

impl Display for RecordPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}@{}", self.partition, self.offset)
    }
}
