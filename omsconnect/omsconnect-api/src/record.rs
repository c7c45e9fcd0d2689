use omsconnect_codec::ValueBox;
use tracing::debug;

use crate::{ConnectError, Headers, KeyValue, RecordPosition};

fn checked(role: &'static str, topic: &str, value: ValueBox) -> Result<ValueBox, ConnectError> {
    match value.validate() {
        Ok(()) => Ok(value),
        Err(error) => {
            debug!(topic, role, %error, "rejecting record");
            Err(error.into())
        }
    }
}

/// Payload and metadata shared by source and sink records.
///
/// The key and data boxes are validated on construction, so a record never
/// holds a value that disagrees with its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectRecord {
    topic: String,
    timestamp: Option<i64>,
    key: Option<ValueBox>,
    data: ValueBox,
    extensions: KeyValue,
    headers: Headers,
}

impl ConnectRecord {
    pub fn new(topic: impl Into<String>, data: ValueBox) -> Result<Self, ConnectError> {
        let topic = topic.into();
        let data = checked("data", &topic, data)?;
        Ok(Self {
            topic,
            timestamp: None,
            key: None,
            data,
            extensions: KeyValue::new(),
            headers: Headers::new(),
        })
    }

    pub fn with_key(mut self, key: ValueBox) -> Result<Self, ConnectError> {
        self.key = Some(checked("key", &self.topic, key)?);
        Ok(self)
    }

    /// Milliseconds since the epoch.
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_extensions(mut self, extensions: KeyValue) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub fn key(&self) -> Option<&ValueBox> {
        self.key.as_ref()
    }

    pub fn data(&self) -> &ValueBox {
        &self.data
    }

    pub fn extensions(&self) -> &KeyValue {
        &self.extensions
    }

    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions.get_string(key)
    }

    pub fn add_extension(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.extensions.put(key, value.into());
        self
    }

    pub fn add_extensions(&mut self, extensions: &KeyValue) -> &mut Self {
        self.extensions.merge(extensions);
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Copy of this record with a new topic, timestamp, key and payload.
    /// Extensions and headers are carried over.
    pub fn new_record(
        &self,
        topic: impl Into<String>,
        timestamp: Option<i64>,
        key: Option<ValueBox>,
        data: ValueBox,
    ) -> Result<Self, ConnectError> {
        let mut record = Self::new(topic, data)?
            .with_extensions(self.extensions.clone())
            .with_headers(self.headers.clone());
        record.timestamp = timestamp;
        if let Some(key) = key {
            record = record.with_key(key)?;
        }
        Ok(record)
    }
}

/// Record produced by a source task, tagged with where it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    position: RecordPosition,
    record: ConnectRecord,
}

impl SourceRecord {
    pub fn new(position: RecordPosition, record: ConnectRecord) -> Self {
        Self { position, record }
    }

    pub fn position(&self) -> &RecordPosition {
        &self.position
    }

    pub fn record(&self) -> &ConnectRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut ConnectRecord {
        &mut self.record
    }

    pub fn into_record(self) -> ConnectRecord {
        self.record
    }

    /// Re-target the record, keeping its position.
    pub fn new_record(
        &self,
        topic: impl Into<String>,
        timestamp: Option<i64>,
        key: Option<ValueBox>,
        data: ValueBox,
    ) -> Result<Self, ConnectError> {
        Ok(Self {
            position: self.position.clone(),
            record: self.record.new_record(topic, timestamp, key, data)?,
        })
    }
}

/// Record delivered to a sink task, tagged with its queue coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkRecord {
    broker_name: String,
    queue_id: i32,
    queue_offset: i64,
    record: ConnectRecord,
}

impl SinkRecord {
    pub fn new(
        broker_name: impl Into<String>,
        queue_id: i32,
        queue_offset: i64,
        record: ConnectRecord,
    ) -> Self {
        Self {
            broker_name: broker_name.into(),
            queue_id,
            queue_offset,
            record,
        }
    }

    pub fn broker_name(&self) -> &str {
        &self.broker_name
    }

    pub fn queue_id(&self) -> i32 {
        self.queue_id
    }

    pub fn queue_offset(&self) -> i64 {
        self.queue_offset
    }

    pub fn record(&self) -> &ConnectRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut ConnectRecord {
        &mut self.record
    }

    pub fn into_record(self) -> ConnectRecord {
        self.record
    }

    /// Re-target the record, keeping its queue coordinates.
    pub fn new_record(
        &self,
        topic: impl Into<String>,
        timestamp: Option<i64>,
        key: Option<ValueBox>,
        data: ValueBox,
    ) -> Result<Self, ConnectError> {
        Ok(Self {
            broker_name: self.broker_name.clone(),
            queue_id: self.queue_id,
            queue_offset: self.queue_offset,
            record: self.record.new_record(topic, timestamp, key, data)?,
        })
    }
}
