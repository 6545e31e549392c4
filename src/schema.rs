//! JSON Schema for configuration layers.
//!
//! Every key is optional because a layer only overrides what it sets, but
//! the keys that are present must have the right type and enum value, and
//! unknown keys are rejected.

use serde_json::{json, Value};

use crate::error::{Error, Result};

fn barrel_update_schema() -> Value {
    json!({
        "type": "object",
        "required": ["file", "template"],
        "additionalProperties": false,
        "properties": {
            "file": { "type": "string" },
            "template": { "type": "string" },
            "position": { "enum": ["append", "prepend", "alphabetical"] },
            "skipIfExists": { "type": "boolean" }
        }
    })
}

fn post_creation_message_schema() -> Value {
    json!({
        "type": "object",
        "required": ["message"],
        "additionalProperties": false,
        "properties": {
            "message": { "type": "string" }
        }
    })
}

/// Returns the schema a single configuration layer must satisfy.
pub fn partial_config_schema() -> Value {
    let barrels = json!({ "type": "array", "items": barrel_update_schema() });
    let message = post_creation_message_schema();

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "component": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "directory": { "type": "string" },
                    "styleSystem": {
                        "enum": ["css-modules", "styled-components", "tailwind", "none"]
                    },
                    "withTest": { "type": "boolean" },
                    "withStory": { "type": "boolean" },
                    "appRouterBarrel": { "type": "boolean" },
                    "updateBarrels": barrels,
                    "postCreationMessage": message
                }
            },
            "hook": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "directory": { "type": "string" },
                    "withTest": { "type": "boolean" },
                    "useDirectory": { "type": "boolean" },
                    "updateBarrels": barrels,
                    "postCreationMessage": message
                }
            },
            "context": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "directory": { "type": "string" },
                    "withTest": { "type": "boolean" },
                    "updateBarrels": barrels,
                    "postCreationMessage": message
                }
            },
            "page": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "directory": { "type": "string" },
                    "router": { "enum": ["app", "pages"] },
                    "postCreationMessage": message
                }
            }
        }
    })
}

/// Validates one configuration layer.
///
/// # Errors
/// * `Error::ConfigError` listing every violation
pub fn validate_partial(instance: &Value) -> Result<()> {
    let schema = partial_config_schema();
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| Error::ConfigError(format!("Invalid configuration schema: {e}")))?;

    let violations: Vec<String> = validator.iter_errors(instance).map(|e| e.to_string()).collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::ConfigError(violations.join("; ")))
    }
}
