//! Error type for the text notation parser.

use omsconnect_core::ConversionError;

/// Error returned by strict parsing of the text notation.
///
/// The lenient entry point [`parse`](crate::text::parse) never surfaces
/// these; a malformed collection is reread as a plain string there.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed array at byte {position}: {detail}")]
    MalformedArray { position: usize, detail: String },

    #[error("malformed map at byte {position}: {detail}")]
    MalformedMap { position: usize, detail: String },

    #[error("unterminated quoted string starting at byte {position}")]
    UnterminatedString { position: usize },

    #[error("unexpected {token:?} at byte {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("trailing input at byte {position}")]
    TrailingInput { position: usize },

    /// Elements could not be coerced to the collection's common schema.
    #[error("cannot coerce collection element: {0}")]
    Coercion(#[from] ConversionError),
}
