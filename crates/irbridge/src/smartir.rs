//! SmartIR device files.
//!
//! A SmartIR climate/media file keeps its captured codes under `commands`,
//! nested by mode, fan speed and temperature. Converting a file rewrites that
//! subtree and marks the file as an MQTT/raw one so SmartIR hands the payloads
//! to the Tuya bridge untouched.

use serde_json::Value;

use crate::convert::{count_signals, Converter, TreeConversion};
use crate::error::ValidationError;

pub const COMMANDS: &str = "commands";
pub const SUPPORTED_CONTROLLER: &str = "supportedController";
pub const COMMANDS_ENCODING: &str = "commandsEncoding";

/// Controller and encoding written into a converted file.
pub const MQTT_CONTROLLER: &str = "MQTT";
pub const RAW_ENCODING: &str = "Raw";

/// Checks the document shape and returns the number of conversion
/// candidates under `commands`.
pub fn validate(document: &Value) -> Result<usize, ValidationError> {
    let root = document.as_object().ok_or(ValidationError::NotAnObject)?;
    let commands = root
        .get(COMMANDS)
        .ok_or(ValidationError::MissingField(COMMANDS))?;
    if !commands.is_object() {
        return Err(ValidationError::NotAnObjectField(COMMANDS));
    }
    Ok(count_signals(commands))
}

/// Converts the `commands` subtree of a SmartIR document.
///
/// Every other field is kept, in its original position.
pub fn convert_document(
    mut document: Value,
    converter: &Converter,
) -> Result<TreeConversion, ValidationError> {
    let candidates = validate(&document)?;
    let Some(root) = document.as_object_mut() else {
        return Err(ValidationError::NotAnObject);
    };
    if let Some(manufacturer) = root.get("manufacturer").and_then(Value::as_str) {
        info!("converting {manufacturer} file with {candidates} candidate code(s)");
    }

    let commands = root.get_mut(COMMANDS).map(Value::take).unwrap_or_default();
    let converted = converter.convert_tree(commands);
    root.insert(COMMANDS.to_owned(), converted.tree);
    root.insert(SUPPORTED_CONTROLLER.to_owned(), Value::from(MQTT_CONTROLLER));
    root.insert(COMMANDS_ENCODING.to_owned(), Value::from(RAW_ENCODING));

    Ok(TreeConversion {
        tree: document,
        commands_processed: converted.commands_processed,
    })
}
