//! Conversion settings.

use irbridge_tuya_stream::CompressionLevel;

use crate::error::ValidationError;
use crate::tuya::SIGNAL_FIELD;

/// Settings shared by single and batch conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub level: CompressionLevel,
    /// Wrap converted codes in the MQTT payload object.
    pub wrap: bool,
    /// Key used when wrapping.
    pub signal_field: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            level: CompressionLevel::default(),
            wrap: true,
            signal_field: SIGNAL_FIELD.to_owned(),
        }
    }
}

impl ConvertOptions {
    /// Options with a level given as a raw integer, as it arrives from JSON or
    /// the command line.
    pub fn from_level_index(level: i64) -> Result<Self, ValidationError> {
        Ok(Self::default().with_level(CompressionLevel::try_from(level)?))
    }

    pub fn with_level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_signal_field(mut self, field: impl Into<String>) -> Self {
        self.signal_field = field.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irbridge_tuya_stream::InvalidLevel;

    #[test]
    fn defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.level, CompressionLevel::Balanced);
        assert!(options.wrap);
        assert_eq!(options.signal_field, "ir_code_to_send");
    }

    #[test]
    fn level_index_is_validated() {
        assert_eq!(
            ConvertOptions::from_level_index(3).map(|o| o.level),
            Ok(CompressionLevel::Optimal)
        );
        for bad in [-1, 4, 100] {
            assert_eq!(
                ConvertOptions::from_level_index(bad),
                Err(ValidationError::Level(InvalidLevel(bad.to_string())))
            );
        }
    }
}
