//! Binary buffer utilities for irbridge.
//!
//! Both device envelopes (Broadlink on the way in, Tuya on the way out) are
//! small byte frames that mix single bytes with big- and little-endian 16-bit
//! fields. This crate provides the cursor types the codecs read and write
//! them with.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking.
//!   Every read is bounds-checked and returns [`BufferError`] instead of
//!   panicking, since the input comes from untrusted strings.
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use irbridge_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x26);
//! writer.u16_le(0x0102);
//! writer.u16(0x0304);
//! let data = writer.flush();
//! assert_eq!(data, [0x26, 0x02, 0x01, 0x03, 0x04]);
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8(), Ok(0x26));
//! assert_eq!(reader.u16_le(), Ok(0x0102));
//! assert_eq!(reader.u16(), Ok(0x0304));
//! assert!(reader.u8().is_err());
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer {
        /// Cursor position at which the read started.
        offset: usize,
        /// Number of bytes the read needed.
        wanted: usize,
    },
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer { offset, wanted } => {
                write!(f, "end of buffer: wanted {wanted} byte(s) at offset {offset}")
            }
        }
    }
}

impl std::error::Error for BufferError {}
