//! # Asset Codec
//!
//! Translates between untyped client payloads, stored bytes and kind-tagged
//! [`AssetRecord`]s.
//!
//! ## Encode
//!
//! ```text
//! payload ──object?──► type? ──lookup──► validate ──► assign id ──► canonical JSON
//! ```
//!
//! ## Decode
//!
//! ```text
//! bytes ──parse──► type? ──lookup──► id + required fields? ──► typed Asset
//! ```
//!
//! The codec holds no mutable state; the registry is shared read-only.
//! Stored bytes are self-describing: they always carry their own `type`.

use crate::domain::entities::{
    Asset, AssetId, AssetRecord, EncodedAsset, DISCRIMINATOR_FIELD, ID_FIELD,
};
use crate::domain::errors::AssetError;
use crate::domain::registry::{FieldSpec, VariantRegistry, VariantSpec};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Stateless encoder/decoder over a shared [`VariantRegistry`].
#[derive(Debug, Clone)]
pub struct AssetCodec {
    registry: Arc<VariantRegistry>,
}

impl AssetCodec {
    pub fn new(registry: Arc<VariantRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// Validate a client payload and produce the bytes to persist.
    ///
    /// ## Errors
    ///
    /// - `MalformedPayload`: payload is not a JSON object
    /// - `MissingDiscriminator`: no string `type` field
    /// - `UnknownVariant`: `type` is not registered
    /// - `ValidationError`: a field is missing, mistyped or unexpected
    pub fn encode(&self, payload: Value) -> Result<EncodedAsset, AssetError> {
        let mut map = match payload {
            Value::Object(map) => map,
            other => {
                return Err(AssetError::MalformedPayload {
                    reason: format!("expected a JSON object, got {}", json_type_name(&other)),
                })
            }
        };

        let spec = match map.get(DISCRIMINATOR_FIELD) {
            Some(Value::String(kind)) => self.registry.lookup(kind)?,
            _ => return Err(AssetError::MissingDiscriminator),
        };

        validate_payload(spec, &map)?;

        // Explicit nulls on optional fields are stored as absent.
        map.retain(|_, value| !value.is_null());

        let id = AssetId::generate();
        if let Some(previous) = map.insert(ID_FIELD.to_string(), Value::String(id.to_string())) {
            debug!(client_id = %previous, id = %id, "discarding client-supplied id");
        }

        // serde_json maps are key-ordered, so the output is canonical.
        let bytes = serde_json::to_vec_pretty(&map).map_err(|e| AssetError::MalformedPayload {
            reason: e.to_string(),
        })?;

        Ok(EncodedAsset { id, bytes })
    }

    /// Decode stored bytes back into a typed record.
    ///
    /// Extra fields not declared by the variant are ignored. Missing required
    /// fields are never defaulted.
    ///
    /// ## Errors
    ///
    /// - `CorruptRecord`: bytes are not a JSON object, or lack `type`, `id`
    ///   or a well-typed required field
    /// - `UnknownVariant`: the stored kind is no longer registered
    pub fn decode(&self, bytes: &[u8]) -> Result<AssetRecord, AssetError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| AssetError::corrupt(format!("not valid JSON: {}", e)))?;
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(AssetError::corrupt(format!(
                    "expected a JSON object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let spec = match map.get(DISCRIMINATOR_FIELD) {
            Some(Value::String(kind)) => self.registry.lookup(kind)?,
            _ => return Err(AssetError::corrupt("missing 'type' discriminator")),
        };

        let id = match map.remove(ID_FIELD) {
            Some(Value::String(id)) => AssetId::from_stored(id),
            _ => return Err(AssetError::corrupt("missing 'id' field")),
        };

        for field in &spec.required {
            match map.get(field.name) {
                Some(value) if field.field_type.accepts(value) => {}
                Some(value) => {
                    return Err(AssetError::corrupt(format!(
                        "field '{}' is {}, expected {}",
                        field.name,
                        json_type_name(value),
                        field.field_type
                    )))
                }
                None => {
                    return Err(AssetError::corrupt(format!(
                        "required field '{}' is missing",
                        field.name
                    )))
                }
            }
        }
        for field in &spec.optional {
            if let Some(value) = map.get(field.name) {
                if !value.is_null() && !field.field_type.accepts(value) {
                    return Err(AssetError::corrupt(format!(
                        "field '{}' is {}, expected {}",
                        field.name,
                        json_type_name(value),
                        field.field_type
                    )));
                }
            }
        }

        let fields: Map<String, Value> = map
            .into_iter()
            .filter(|(name, _)| spec.declares(name))
            .collect();
        let asset = Asset::from_fields(spec.kind, fields)
            .map_err(|e| AssetError::corrupt(e.to_string()))?;

        Ok(AssetRecord { id, asset })
    }
}

/// Check a payload object against its variant.
///
/// Required fields are checked in declaration order, then optional fields,
/// then unexpected fields in key order, so the reported field is stable.
fn validate_payload(spec: &VariantSpec, map: &Map<String, Value>) -> Result<(), AssetError> {
    for field in &spec.required {
        match map.get(field.name) {
            None | Some(Value::Null) => {
                return Err(AssetError::validation(
                    field.name,
                    format!("required field missing (expected {})", field.field_type),
                ))
            }
            Some(value) => check_field(field, value)?,
        }
    }

    for field in &spec.optional {
        match map.get(field.name) {
            None | Some(Value::Null) => {}
            Some(value) => check_field(field, value)?,
        }
    }

    for name in map.keys() {
        if name == DISCRIMINATOR_FIELD || name == ID_FIELD {
            continue;
        }
        if !spec.declares(name) {
            return Err(AssetError::validation(
                name.as_str(),
                format!("unexpected field for asset type '{}'", spec.kind),
            ));
        }
    }

    Ok(())
}

fn check_field(field: &FieldSpec, value: &Value) -> Result<(), AssetError> {
    if !field.field_type.accepts(value) {
        return Err(AssetError::validation(
            field.name,
            format!(
                "expected {}, got {}",
                field.field_type,
                json_type_name(value)
            ),
        ));
    }
    if !field.field_type.holds_exactly(value) {
        return Err(AssetError::validation(
            field.name,
            "integer magnitude exceeds 2^53 and cannot be stored exactly",
        ));
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
