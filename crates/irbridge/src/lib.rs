//! Broadlink to Tuya IR code conversion.
//!
//! Broadlink hubs export captures as base64 tick envelopes; Tuya IR blasters
//! such as the MOES UFO-R11 want base64 FastLZ streams of microsecond
//! timings. This crate converts between them, one code at a time or across a
//! whole command tree such as a SmartIR device file.
//!
//! ```
//! use irbridge::{convert, CompressionLevel};
//!
//! let out = convert("JgAKAJKRFDQUEhMABRANBQ==", CompressionLevel::Balanced).unwrap();
//! assert_eq!(out.target_code, "D14RQBFhAjAGYQIkAkMCLJo=");
//! assert_eq!(out.wrapped_payload, r#"{"ir_code_to_send": "D14RQBFhAjAGYQIkAkMCLJo="}"#);
//! ```

#[macro_use]
extern crate log;

pub mod broadlink;
pub mod convert;
pub mod error;
pub mod options;
pub mod smartir;
pub mod timing;
pub mod tuya;

pub use broadlink::BroadlinkSignal;
pub use convert::{convert, convert_tree, count_signals, Conversion, Converter, TreeConversion};
pub use error::{ConvertError, ErrorKind, FormatError, ValidationError};
pub use irbridge_tuya_stream::{CompressionLevel, InvalidLevel};
pub use options::ConvertOptions;
pub use timing::TimingSequence;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

/// Standard alphabet; decoding tolerates missing padding and stray trailing
/// bits, both common in hand-copied codes.
pub(crate) const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);
