//! Types exchanged between connector tasks and the runtime.
//!
//! Records carry their key and payload as [`ValueBox`](omsconnect_codec::ValueBox)es
//! that have already passed validation; headers are typed value holders
//! attached to a record. Lifecycle and offset storage contracts live with the
//! runtime, not here.

mod error;
mod header;
mod key_value;
mod position;
mod record;

pub use error::ConnectError;
pub use header::{Header, Headers};
pub use key_value::KeyValue;
pub use position::{RecordOffset, RecordPartition, RecordPosition};
pub use record::{ConnectRecord, SinkRecord, SourceRecord};
