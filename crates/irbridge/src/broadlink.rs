//! Broadlink IR envelope.
//!
//! ```text
//!   [type] [repeat] [body length, u16 LE] [body ...] [ignored trailer]
//! ```
//!
//! The body is a run of tick counts. A count below 256 takes one byte; a
//! larger one is written as `0x00` followed by a big-endian `u16`.

use base64::Engine as _;
use irbridge_buffers::{Reader, Writer};

use crate::error::{ConvertError, FormatError, ValidationError};
use crate::timing::{
    microseconds_to_ticks, microseconds_to_tuya_units, ticks_to_microseconds, TimingSequence,
};
use crate::BASE64;

/// Type marker of an infrared capture. RF captures use other values.
pub const IR_TYPE: u8 = 0x26;

const HEADER_LEN: usize = 4;
const EXTENDED: u8 = 0x00;

/// A decoded Broadlink capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadlinkSignal {
    /// Envelope type marker, normally [`IR_TYPE`].
    pub kind: u8,
    /// Additional transmissions requested by the capture.
    pub repeat: u8,
    pub timings: TimingSequence,
}

impl BroadlinkSignal {
    /// An IR signal sent once.
    pub fn ir(timings: TimingSequence) -> Self {
        Self {
            kind: IR_TYPE,
            repeat: 0,
            timings,
        }
    }

    /// Builds the binary envelope.
    ///
    /// Durations are converted back to the nearest tick, so a signal decoded
    /// from a capture re-encodes to the same body.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
        let mut body = Writer::with_capacity(self.timings.len() * 2);
        for &us in self.timings.as_slice() {
            match microseconds_to_ticks(u32::from(us)) {
                ticks @ 1..=0xFF => body.u8(ticks as u8),
                ticks => {
                    body.u8(EXTENDED);
                    body.u16(ticks as u16);
                }
            }
        }
        let body = body.flush();
        let declared =
            u16::try_from(body.len()).map_err(|_| FormatError::BodyTooLong(body.len()))?;

        let mut writer = Writer::with_capacity(HEADER_LEN + body.len());
        writer.u8(self.kind);
        writer.u8(self.repeat);
        writer.u16_le(declared);
        writer.buf(&body);
        Ok(writer.flush())
    }

    /// Base64 text of [`BroadlinkSignal::to_bytes`].
    pub fn to_base64(&self) -> Result<String, FormatError> {
        Ok(BASE64.encode(self.to_bytes()?))
    }
}

/// Decodes a base64 Broadlink code.
pub fn decode(code: &str) -> Result<BroadlinkSignal, ConvertError> {
    if code.is_empty() {
        return Err(ValidationError::EmptyInput.into());
    }
    let bytes = BASE64.decode(code)?;
    Ok(decode_envelope(&bytes)?)
}

/// Decodes a binary Broadlink envelope.
pub fn decode_envelope(bytes: &[u8]) -> Result<BroadlinkSignal, FormatError> {
    let mut reader = Reader::new(bytes);
    let header = |_| FormatError::HeaderTooShort { len: bytes.len() };
    let kind = reader.u8().map_err(header)?;
    let repeat = reader.u8().map_err(header)?;
    let declared = usize::from(reader.u16_le().map_err(header)?);

    let available = reader.size();
    let mut body = reader
        .cut(declared)
        .map_err(|_| FormatError::BodyTruncated {
            declared,
            available,
        })?;
    if kind != IR_TYPE {
        warn!("envelope type 0x{kind:02x} is not an IR capture, decoding anyway");
    }
    if !reader.is_empty() {
        trace!("ignoring {} trailing byte(s) after the body", reader.size());
    }

    let mut timings = Vec::with_capacity(declared);
    while !body.is_empty() {
        let offset = body.x - HEADER_LEN;
        let past = |_| FormatError::EntryPastBoundary { offset, declared };
        let mut ticks = u32::from(body.u8().map_err(past)?);
        if ticks == u32::from(EXTENDED) {
            ticks = u32::from(body.u16().map_err(past)?);
        }
        timings.push(microseconds_to_tuya_units(ticks_to_microseconds(ticks)?)?);
    }
    let timings = TimingSequence::new(timings)?;
    debug!(
        "decoded broadlink envelope: type 0x{kind:02x}, repeat {repeat}, {} timings",
        timings.len()
    );
    Ok(BroadlinkSignal {
        kind,
        repeat,
        timings,
    })
}
