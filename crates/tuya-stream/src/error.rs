//! Stream decoder error type.

use thiserror::Error;

/// A compressed stream that cannot be decoded consistently.
///
/// Compression itself is infallible; every variant here describes a corrupt
/// token stream handed to [`decompress`](crate::decompress).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("token at offset {offset} is truncated")]
    Truncated { offset: usize },
    #[error("match distance {distance} reaches before the start of output ({produced} bytes produced)")]
    DistanceOutOfRange { distance: usize, produced: usize },
}
