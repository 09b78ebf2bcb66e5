//! Tuya IR stream compression.
//!
//! MOES UFO-R11 and other Tuya IR blasters accept timing data as a
//! little-endian `u16` array compressed with the FastLZ level-1 token layout.
//! The firmware's decoder dictates every constant here.
//!
//! # Token layout
//!
//! Each token starts with a control byte `c`; its top three bits `t = c >> 5`
//! select the kind:
//!
//! ```text
//!   t == 0     literal     [000L LLLL] [L+1 raw bytes]              1..=32 bytes
//!   t in 1..=6 short match [tttD DDDD] [DDDD DDDD]                  length t+2
//!   t == 7     long match  [111D DDDD] [extra length] [DDDD DDDD]   length 9+extra
//! ```
//!
//! `D` is `distance - 1` (13 bits, so the window is 8192 bytes). A match copies
//! `length` bytes starting `distance` bytes back in the output already
//! produced; source and destination may overlap.
//!
//! # Levels
//!
//! | level | search |
//! |---|---|
//! | [`CompressionLevel::None`] | literal runs only |
//! | [`CompressionLevel::Fast`] | greedy, first chain candidate |
//! | [`CompressionLevel::Balanced`] | greedy longest candidate, lazy by one byte |
//! | [`CompressionLevel::Optimal`] | shortest-path parse over token costs |
//!
//! A higher level never produces a longer stream than a lower one.
//!
//! # Example
//!
//! ```
//! use irbridge_tuya_stream::{compress, decompress, CompressionLevel};
//!
//! let data = b"abcabcabcabc";
//! let packed = compress(data, CompressionLevel::Balanced);
//! assert!(packed.len() < data.len());
//! assert_eq!(decompress(&packed).unwrap(), data);
//! ```

#[macro_use]
extern crate log;

mod compressor;
mod error;
mod finder;
mod level;
mod strategy;
mod token;

pub use compressor::{compress, decompress, parse};
pub use error::StreamError;
pub use level::{CompressionLevel, InvalidLevel};
pub use token::{compressed_len, tokens, write_tokens, Token, TokenReader};

/// Shortest backreference the firmware decoder understands.
pub const MIN_MATCH: usize = 3;
/// Longest backreference: 7 + 255 encoded length units plus the implicit 2.
pub const MAX_MATCH: usize = 264;
/// Matches of this length and above need the extra length byte.
pub const LONG_MATCH: usize = 9;
/// Largest distance a 13-bit offset field can address.
pub const WINDOW_SIZE: usize = 1 << 13;
/// Longest literal run a single control byte can announce.
pub const MAX_LITERAL: usize = 32;
