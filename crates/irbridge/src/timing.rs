//! Durations and the pulse/gap sequence shared by both formats.

use irbridge_buffers::{Reader, Writer};

use crate::error::FormatError;

/// A Broadlink tick lasts `TICK_NUMERATOR / TICK_DENOMINATOR` microseconds
/// (about 30.45 us).
pub const TICK_NUMERATOR: u64 = 8192;
pub const TICK_DENOMINATOR: u64 = 269;

/// Converts a Broadlink tick count to whole microseconds, rounding to nearest.
///
/// ```
/// use irbridge::timing::ticks_to_microseconds;
///
/// assert_eq!(ticks_to_microseconds(146), Ok(4446));
/// assert_eq!(ticks_to_microseconds(20), Ok(609));
/// ```
pub fn ticks_to_microseconds(ticks: u32) -> Result<u32, FormatError> {
    let us = (u64::from(ticks) * TICK_NUMERATOR + TICK_DENOMINATOR / 2) / TICK_DENOMINATOR;
    u32::try_from(us).map_err(|_| FormatError::TimingOverflow(us))
}

/// Inverse of [`ticks_to_microseconds`], rounding to the nearest tick.
pub fn microseconds_to_ticks(us: u32) -> u32 {
    let ticks = (u64::from(us) * TICK_DENOMINATOR + TICK_NUMERATOR / 2) / TICK_NUMERATOR;
    // us * 269 / 8192 < us, so this always fits.
    ticks as u32
}

/// Narrows a duration to the 16-bit unit the Tuya payload carries.
///
/// The firmware's unit is one microsecond, so this is a range check.
pub fn microseconds_to_tuya_units(us: u32) -> Result<u16, FormatError> {
    u16::try_from(us).map_err(|_| FormatError::TimingOverflow(u64::from(us)))
}

/// Alternating pulse and gap durations in microseconds, starting with a
/// pulse.
///
/// Always non-empty and of even length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimingSequence(Vec<u16>);

impl TimingSequence {
    pub fn new(timings: Vec<u16>) -> Result<Self, FormatError> {
        if timings.is_empty() {
            return Err(FormatError::EmptySequence);
        }
        if timings.len() % 2 != 0 {
            return Err(FormatError::OddTimingCount(timings.len()));
        }
        Ok(Self(timings))
    }

    /// Parses the little-endian `u16` array carried inside a Tuya stream.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() % 2 != 0 {
            return Err(FormatError::OddPayloadLength(bytes.len()));
        }
        let mut reader = Reader::new(bytes);
        let mut timings = Vec::with_capacity(bytes.len() / 2);
        while let Ok(value) = reader.u16_le() {
            timings.push(value);
        }
        Self::new(timings)
    }

    /// Serializes as a little-endian `u16` array.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut writer = Writer::with_capacity(self.0.len() * 2);
        for &value in &self.0 {
            writer.u16_le(value);
        }
        writer.flush()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(pulse, gap)` pairs in transmission order.
    pub fn pairs(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.0.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Sum of all durations.
    pub fn total_microseconds(&self) -> u64 {
        self.0.iter().map(|&v| u64::from(v)).sum()
    }

    pub fn into_inner(self) -> Vec<u16> {
        self.0
    }
}

impl TryFrom<Vec<u16>> for TimingSequence {
    type Error = FormatError;

    fn try_from(timings: Vec<u16>) -> Result<Self, Self::Error> {
        Self::new(timings)
    }
}

impl AsRef<[u16]> for TimingSequence {
    fn as_ref(&self) -> &[u16] {
        &self.0
    }
}
