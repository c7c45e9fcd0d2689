//! Error type surfaced to connector tasks.

use omsconnect_core::{ConversionError, DataError, ValidationError};

/// Error returned by connector-facing operations.
///
/// Every variant maps to one of the stable error codes reported by
/// [`code`](Self::code).
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// A key, payload or header value failed validation or conversion.
    #[error("the data is invalid: {0}")]
    InvalidData(#[from] DataError),

    /// A configuration entry exists but cannot be read as the requested type.
    #[error("config key '{key}' has value {value:?}, expected {expected}")]
    InvalidConfig {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("source connector poll failed: {message}")]
    SourcePoll { message: String },

    /// A sink task failed to deliver records; `put_index` points at the first
    /// record that was not written, when known.
    #[error("sink connector put failed: {message}")]
    SinkPut {
        message: String,
        put_index: Option<usize>,
    },

    /// A transient failure; the same operation may succeed when repeated.
    #[error("{message}")]
    Retriable {
        message: String,
        put_index: Option<usize>,
    },

    #[error("timed out: {message}")]
    Timeout { message: String },

    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ConnectError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Stable error code reported to the runtime.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidData(_) => "InvalidData",
            Self::SourcePoll { .. } => "SourceConnectorPollError",
            Self::SinkPut { .. } => "SinkConnectorPutError",
            Self::InvalidConfig { .. }
            | Self::Retriable { .. }
            | Self::Timeout { .. }
            | Self::Internal { .. } => "InternalError",
        }
    }

    /// Whether the runtime may retry the failed operation.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Retriable { .. } | Self::Timeout { .. })
    }
}

impl From<ValidationError> for ConnectError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidData(error.into())
    }
}

impl From<ConversionError> for ConnectError {
    fn from(error: ConversionError) -> Self {
        Self::InvalidData(error.into())
    }
}
