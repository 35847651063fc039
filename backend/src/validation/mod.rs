//! JSON Schema validation for candidate payloads.
//!
//! # Embedded Schemas
//!
//! Schemas are embedded at compile time from the `schemas/` directory:
//! - `candidate-identity.json` - inbound `name` / `surname` form fields
//! - `candidate-record.json` - persisted candidate as served by the API
//!
//! # Example
//!
//! ```rust,ignore
//! use intake::{validate_identity, Identity};
//!
//! assert!(validate_identity(&Identity::new("Ada", "Lovelace")).is_ok());
//!
//! let errors = validate_identity(&Identity::new("", "Lovelace")).unwrap_err();
//! assert!(errors[0].starts_with("name:"));
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::models::Identity;

static IDENTITY_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/candidate-identity.json"))
        .expect("Invalid embedded schema")
});

static RECORD_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/candidate-record.json"))
        .expect("Invalid embedded schema")
});

/// Validate an object against a JSON schema.
///
/// # Returns
/// * `Ok(())` when valid
/// * `Err(Vec<String>)` with every violation otherwise
///
/// # Example
/// ```ignore
/// use serde_json::json;
/// use intake::validation::validate;
///
/// let schema = json!({
///     "type": "object",
///     "required": ["name"],
///     "properties": { "name": { "type": "string" } }
/// });
///
/// assert!(validate(&schema, &json!({ "name": "Ada" })).is_ok());
/// assert!(validate(&schema, &json!({ "age": 42 })).is_err());
/// ```
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick true/false check.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate the identity form fields.
///
/// Each property is checked against its own sub-schema so every message is
/// prefixed with the field it concerns (`"name: ..."`).
pub fn validate_identity(identity: &Identity) -> Result<(), Vec<String>> {
    let data = serde_json::to_value(identity).map_err(|e| vec![e.to_string()])?;
    validate_fields(&IDENTITY_SCHEMA, &data)
}

/// Validate a serialized [`crate::models::CandidateRecord`].
pub fn validate_candidate_record(data: &Value) -> Result<(), Vec<String>> {
    validate(&RECORD_SCHEMA, data)
}

fn validate_fields(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(properties) = schema["properties"].as_object() {
        for (field, field_schema) in properties {
            let value = data.get(field).unwrap_or(&Value::Null);
            if let Err(field_errors) = validate(field_schema, value) {
                errors.extend(
                    field_errors
                        .into_iter()
                        .map(|e| format!("{}: {}", field, e)),
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
