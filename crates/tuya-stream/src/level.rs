//! Compression level selection.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Trade-off between search effort and output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CompressionLevel {
    /// Literal runs only; output size depends on input length alone.
    None = 0,
    /// Greedy parse taking the first usable backreference.
    Fast = 1,
    /// Greedy longest-match parse with one byte of lazy lookahead.
    #[default]
    Balanced = 2,
    /// Minimum-cost parse.
    Optimal = 3,
}

/// A level index outside `0..=3`, or an unknown level name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("compression level {0} is outside 0..=3")]
pub struct InvalidLevel(pub String);

impl CompressionLevel {
    /// All levels, cheapest first.
    pub const ALL: [CompressionLevel; 4] = [
        CompressionLevel::None,
        CompressionLevel::Fast,
        CompressionLevel::Balanced,
        CompressionLevel::Optimal,
    ];

    /// Numeric index of the level.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressionLevel::None => "none",
            CompressionLevel::Fast => "fast",
            CompressionLevel::Balanced => "balanced",
            CompressionLevel::Optimal => "optimal",
        }
    }
}

impl TryFrom<i64> for CompressionLevel {
    type Error = InvalidLevel;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CompressionLevel::None),
            1 => Ok(CompressionLevel::Fast),
            2 => Ok(CompressionLevel::Balanced),
            3 => Ok(CompressionLevel::Optimal),
            other => Err(InvalidLevel(other.to_string())),
        }
    }
}

impl TryFrom<u8> for CompressionLevel {
    type Error = InvalidLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        CompressionLevel::try_from(i64::from(value))
    }
}

impl FromStr for CompressionLevel {
    type Err = InvalidLevel;

    /// Accepts either the index (`"2"`) or the name (`"balanced"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<i64>() {
            return CompressionLevel::try_from(index);
        }
        CompressionLevel::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidLevel(s.to_owned()))
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
