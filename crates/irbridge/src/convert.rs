//! Broadlink to Tuya conversion, for one code or a whole command tree.

use irbridge_tuya_stream::CompressionLevel;
use serde::Serialize;
use serde_json::Value;

use crate::broadlink;
use crate::error::ConvertError;
use crate::options::ConvertOptions;
use crate::tuya;

/// Result of converting a single code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    /// Bare base64 Tuya code.
    pub target_code: String,
    /// `target_code` inside the MQTT payload object.
    pub wrapped_payload: String,
    /// Length of the Broadlink input, in characters.
    pub original_length: usize,
    /// Length of `target_code`, in characters.
    pub result_length: usize,
}

/// Result of converting a command tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeConversion {
    pub tree: Value,
    /// Number of string leaves that were converted.
    pub commands_processed: usize,
}

/// Converts codes with a fixed set of options.
///
/// ```
/// use irbridge::{ConvertOptions, Converter};
///
/// let converter = Converter::new(ConvertOptions::default());
/// let out = converter.convert("JgAKAJKRFDQUEhMABRANBQ==").unwrap();
/// assert_eq!(out.target_code, "D14RQBFhAjAGYQIkAkMCLJo=");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converts a Broadlink code to a bare Tuya code.
    pub fn convert_code(&self, source: &str) -> Result<String, ConvertError> {
        let signal = broadlink::decode(source)?;
        Ok(tuya::encode(
            &signal.timings,
            signal.repeat,
            self.options.level,
        ))
    }

    pub fn convert(&self, source: &str) -> Result<Conversion, ConvertError> {
        let target_code = self.convert_code(source)?;
        let wrapped_payload = tuya::wrap_with(&target_code, &self.options.signal_field);
        let conversion = Conversion {
            original_length: source.chars().count(),
            result_length: target_code.chars().count(),
            target_code,
            wrapped_payload,
        };
        debug!(
            "converted code: {} -> {} chars at level {}",
            conversion.original_length, conversion.result_length, self.options.level
        );
        Ok(conversion)
    }

    /// Converts a code straight to the MQTT payload, or to the bare code when
    /// wrapping is off.
    pub fn convert_to_payload(&self, source: &str) -> Result<String, ConvertError> {
        let code = self.convert_code(source)?;
        Ok(self.finish(code))
    }

    /// Replaces every convertible string leaf of `tree`.
    ///
    /// Leaves that fail to convert are kept as they were; the tree's shape
    /// and key order never change.
    pub fn convert_tree(&self, mut tree: Value) -> TreeConversion {
        let mut processed = 0;
        self.rewrite(&mut tree, &mut String::new(), &mut processed);
        info!("converted {processed} command(s)");
        TreeConversion {
            tree,
            commands_processed: processed,
        }
    }

    fn rewrite(&self, value: &mut Value, path: &mut String, processed: &mut usize) {
        match value {
            Value::String(text) => match self.convert_code(text) {
                Ok(code) => {
                    trace!("{path}: converted");
                    *text = self.finish(code);
                    *processed += 1;
                }
                Err(err) => debug!("{path}: left unchanged ({err})"),
            },
            Value::Array(items) => {
                for (i, item) in items.iter_mut().enumerate() {
                    let len = path.len();
                    path.push_str(&format!("[{i}]"));
                    self.rewrite(item, path, processed);
                    path.truncate(len);
                }
            }
            Value::Object(map) => {
                for (key, item) in map.iter_mut() {
                    let len = path.len();
                    path.push('/');
                    path.push_str(key);
                    self.rewrite(item, path, processed);
                    path.truncate(len);
                }
            }
            _ => {}
        }
    }

    fn finish(&self, code: String) -> String {
        if self.options.wrap {
            tuya::wrap_with(&code, &self.options.signal_field)
        } else {
            code
        }
    }
}

/// Converts one Broadlink code at `level`.
pub fn convert(source: &str, level: CompressionLevel) -> Result<Conversion, ConvertError> {
    Converter::new(ConvertOptions::default().with_level(level)).convert(source)
}

/// Converts every string leaf of `tree`.
pub fn convert_tree(tree: Value, level: CompressionLevel, wrap: bool) -> TreeConversion {
    let options = ConvertOptions::default().with_level(level).with_wrap(wrap);
    Converter::new(options).convert_tree(tree)
}

/// Number of string leaves in `tree`, i.e. conversion candidates.
pub fn count_signals(tree: &Value) -> usize {
    match tree {
        Value::String(_) => 1,
        Value::Array(items) => items.iter().map(count_signals).sum(),
        Value::Object(map) => map.values().map(count_signals).sum(),
        _ => 0,
    }
}
