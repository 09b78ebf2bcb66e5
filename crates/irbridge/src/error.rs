//! Conversion error types.

use irbridge_tuya_stream::{InvalidLevel, StreamError};
use thiserror::Error;

/// The decoded bytes do not have the shape of the expected envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("envelope is {len} bytes, shorter than the 4-byte header")]
    HeaderTooShort { len: usize },
    #[error("envelope declares a {declared}-byte body but only {available} bytes follow the header")]
    BodyTruncated { declared: usize, available: usize },
    #[error("timing entry at body offset {offset} runs past the declared {declared}-byte body")]
    EntryPastBoundary { offset: usize, declared: usize },
    #[error("envelope body of {0} bytes does not fit the 16-bit length field")]
    BodyTooLong(usize),
    #[error("odd timing count {0}: the last pulse has no gap")]
    OddTimingCount(usize),
    #[error("envelope holds no timings")]
    EmptySequence,
    #[error("duration of {0} us does not fit in 16 bits")]
    TimingOverflow(u64),
    #[error("payload of {0} bytes is not a whole number of 16-bit timings")]
    OddPayloadLength(usize),
    #[error("stream does not start with the Tuya header")]
    MissingHeader,
}

/// Caller-supplied input rejected before any decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Level(#[from] InvalidLevel),
    #[error("input is empty")]
    EmptyInput,
    #[error("document must be a JSON object")]
    NotAnObject,
    #[error("missing '{0}' field")]
    MissingField(&'static str),
    #[error("'{0}' field must be an object")]
    NotAnObjectField(&'static str),
}

/// Any failure of a single conversion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("invalid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("malformed envelope: {0}")]
    Format(#[from] FormatError),
    #[error("corrupt compressed stream: {0}")]
    CorruptStream(#[from] StreamError),
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// Coarse error category, for callers mapping errors onto status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Decode,
    Format,
    CorruptStream,
    Validation,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::Decode(_) => ErrorKind::Decode,
            ConvertError::Format(_) => ErrorKind::Format,
            ConvertError::CorruptStream(_) => ErrorKind::CorruptStream,
            ConvertError::Validation(_) => ErrorKind::Validation,
        }
    }
}

impl From<InvalidLevel> for ConvertError {
    fn from(err: InvalidLevel) -> Self {
        ConvertError::Validation(err.into())
    }
}
