//! Tuya IR code encoding and the MQTT payload wrapper.

use base64::Engine as _;
use irbridge_tuya_stream::{compress, decompress, CompressionLevel};
use serde_json::{Map, Value};

use crate::error::{ConvertError, FormatError, ValidationError};
use crate::timing::TimingSequence;
use crate::BASE64;

/// Bytes preceding the compressed stream. UFO-R11 firmware expects none.
pub const TUYA_HEADER: &[u8] = &[];

/// Key the Tuya MQTT bridge reads the code from.
pub const SIGNAL_FIELD: &str = "ir_code_to_send";

/// Encodes timings as a base64 Tuya code.
///
/// The Tuya format has no repeat field; `repeat` only shows up in the log.
pub fn encode(timings: &TimingSequence, repeat: u8, level: CompressionLevel) -> String {
    if repeat > 0 {
        debug!("dropping repeat count {repeat}: the Tuya stream cannot carry it");
    }
    let payload = timings.to_le_bytes();
    let mut bytes = TUYA_HEADER.to_vec();
    bytes.extend_from_slice(&compress(&payload, level));
    BASE64.encode(bytes)
}

/// Decodes a base64 Tuya code back to its timings.
pub fn decode(code: &str) -> Result<TimingSequence, ConvertError> {
    if code.is_empty() {
        return Err(ValidationError::EmptyInput.into());
    }
    let bytes = BASE64.decode(code)?;
    let stream = bytes
        .strip_prefix(TUYA_HEADER)
        .ok_or(FormatError::MissingHeader)?;
    let payload = decompress(stream)?;
    Ok(TimingSequence::from_le_bytes(&payload)?)
}

/// Wraps a code in the single-key MQTT payload object.
///
/// ```
/// assert_eq!(
///     irbridge::tuya::wrap("D14RQA=="),
///     r#"{"ir_code_to_send": "D14RQA=="}"#
/// );
/// ```
pub fn wrap(code: &str) -> String {
    wrap_with(code, SIGNAL_FIELD)
}

/// [`wrap`] with a custom key.
pub fn wrap_with(code: &str, field: &str) -> String {
    format!("{{{}: {}}}", Value::from(field), Value::from(code))
}

/// Reverses [`wrap_with`] anywhere inside `value`.
///
/// A string holding a wrapped payload becomes the bare code; an object with a
/// string under `field` becomes that string. Other objects and arrays are
/// walked, everything else is returned unchanged.
pub fn unwrap_value(value: Value, field: &str) -> Value {
    match value {
        Value::String(text) => match unwrap_text(&text, field) {
            Some(code) => Value::String(code),
            None => Value::String(text),
        },
        Value::Object(map) => {
            if let Some(Value::String(code)) = map.get(field) {
                return Value::String(code.clone());
            }
            let map: Map<String, Value> = map
                .into_iter()
                .map(|(key, child)| (key, unwrap_value(child, field)))
                .collect();
            Value::Object(map)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|child| unwrap_value(child, field))
                .collect(),
        ),
        other => other,
    }
}

fn unwrap_text(text: &str, field: &str) -> Option<String> {
    if !text.trim_start().starts_with('{') {
        return None;
    }
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(mut map) => match map.remove(field)? {
            Value::String(code) => Some(code),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> TimingSequence {
        TimingSequence::new(vec![4446, 4416, 609, 1584, 609, 548, 579, 39468]).unwrap()
    }

    #[test]
    fn encode_golden() {
        for level in CompressionLevel::ALL {
            assert_eq!(encode(&sample(), 0, level), "D14RQBFhAjAGYQIkAkMCLJo=");
        }
    }

    #[test]
    fn repeat_does_not_change_the_code() {
        let level = CompressionLevel::Optimal;
        assert_eq!(encode(&sample(), 5, level), encode(&sample(), 0, level));
    }

    #[test]
    fn decode_inverts_encode() {
        for level in CompressionLevel::ALL {
            assert_eq!(decode(&encode(&sample(), 0, level)), Ok(sample()));
        }
    }

    #[test]
    fn decode_reports_each_failure_kind() {
        assert_eq!(
            decode(""),
            Err(ConvertError::Validation(ValidationError::EmptyInput))
        );
        assert!(matches!(decode("***"), Err(ConvertError::Decode(_))));
        // Literal header announcing 6 bytes with only 2 present.
        assert!(matches!(
            decode(&BASE64.encode([0x05, 1, 2])),
            Err(ConvertError::CorruptStream(_))
        ));
        // Three payload bytes cannot be u16 timings.
        assert_eq!(
            decode(&BASE64.encode([0x02, 1, 2, 3])),
            Err(ConvertError::Format(FormatError::OddPayloadLength(3)))
        );
    }

    #[test]
    fn wrap_escapes_and_keeps_the_spacing() {
        assert_eq!(wrap("abc"), r#"{"ir_code_to_send": "abc"}"#);
        assert_eq!(wrap_with("a\"b", "code"), r#"{"code": "a\"b"}"#);
    }

    #[test]
    fn unwrap_inverts_wrap() {
        let code = "D14RQBFhAjAGYQIkAkMCLJo=";
        assert_eq!(
            unwrap_value(Value::String(wrap(code)), SIGNAL_FIELD),
            json!(code)
        );
    }

    #[test]
    fn unwrap_walks_containers() {
        let tree = json!({
            "off": wrap("A"),
            "cool": {"16": {"ir_code_to_send": "B"}, "17": [wrap("C"), 3]},
            "note": "{not json",
            "other": "{\"x\": 1}"
        });
        assert_eq!(
            unwrap_value(tree, SIGNAL_FIELD),
            json!({
                "off": "A",
                "cool": {"16": "B", "17": ["C", 3]},
                "note": "{not json",
                "other": "{\"x\": 1}"
            })
        );
    }
}
