use crate::{
    error::{ClientError, Result},
    schemas::{PayloadSchema, SchemaHandle},
};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Check a raw JSON payload against a request schema before it is sent.
pub fn validate_payload(schema: &SchemaHandle, payload: &Value) -> Result<()> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.json())
        .map_err(|err| {
            ClientError::Validation(format!(
                "Failed to prepare `{}` schema for validation: {}",
                schema.name(),
                err
            ))
        })?;

    let Err(errors) = validator.validate(payload) else {
        return Ok(());
    };

    let mut details = Vec::new();
    let mut truncated = false;

    for (idx, error) in errors.enumerate() {
        if idx == MAX_SCHEMA_ERRORS {
            truncated = true;
            break;
        }
        let mut path = error.instance_path.to_string();
        if path.is_empty() {
            path = "<root>".to_string();
        }
        details.push(format!("{}: {}", path, error));
    }

    let mut detail_str = if details.is_empty() {
        "payload failed schema validation".to_string()
    } else {
        details.join("; ")
    };

    if truncated {
        detail_str.push_str("; additional errors truncated");
    }

    Err(ClientError::Validation(format!(
        "Payload does not match `{}` schema: {}",
        schema.name(),
        detail_str
    )))
}

/// Validate `payload` against `T`'s schema, then deserialize it with the
/// failing field path in any error.
pub fn decode_payload<T: PayloadSchema>(payload: Value) -> Result<T> {
    let schema = T::schema();
    validate_payload(schema, &payload)?;

    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        ClientError::Validation(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.name(),
            location,
            err.inner()
        ))
    })
}
