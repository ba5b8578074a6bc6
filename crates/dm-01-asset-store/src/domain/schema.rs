//! # Schema Publishing
//!
//! Builds the OpenAPI document for the asset endpoints from the
//! [`VariantRegistry`]. Nothing here hardcodes a variant shape: adding a
//! variant to the registry adds it to the published request and response
//! `oneOf` unions.

use crate::domain::entities::{AssetKind, DISCRIMINATOR_FIELD, ID_FIELD};
use crate::domain::registry::{VariantRegistry, VariantSpec};
use serde_json::{json, Map, Value};

/// Component name of the request schema for `kind`.
pub fn request_schema_name(kind: AssetKind) -> String {
    format!("{}Asset", kind.label())
}

/// Component name of the response schema for `kind`.
pub fn response_schema_name(kind: AssetKind) -> String {
    format!("{}AssetResponse", kind.label())
}

/// JSON Schema for one variant as submitted by a client.
pub fn variant_schema(spec: &VariantSpec) -> Value {
    object_schema(spec, false)
}

/// JSON Schema for one variant as returned on read (includes `id`).
pub fn variant_response_schema(spec: &VariantSpec) -> Value {
    object_schema(spec, true)
}

fn object_schema(spec: &VariantSpec, with_id: bool) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    if with_id {
        properties.insert(
            ID_FIELD.to_string(),
            json!({
                "type": "string",
                "format": "uuid",
                "description": "asset unique identifier",
            }),
        );
        required.push(Value::from(ID_FIELD));
    }

    properties.insert(
        DISCRIMINATOR_FIELD.to_string(),
        json!({
            "type": "string",
            "enum": [spec.kind.as_str()],
            "description": "Asset type",
        }),
    );
    required.push(Value::from(DISCRIMINATOR_FIELD));

    for field in spec.fields() {
        properties.insert(
            field.name.to_string(),
            json!({
                "type": field.field_type.type_name(),
                "description": field.description,
            }),
        );
    }
    required.extend(spec.required.iter().map(|f| Value::from(f.name)));

    json!({
        "type": "object",
        "description": spec.description,
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn union(registry: &VariantRegistry, name: fn(AssetKind) -> String) -> Value {
    let mut one_of = Vec::new();
    let mut mapping = Map::new();
    for spec in registry.specs() {
        let reference = format!("#/components/schemas/{}", name(spec.kind));
        one_of.push(json!({ "$ref": reference }));
        mapping.insert(spec.kind.as_str().to_string(), Value::String(reference));
    }

    json!({
        "oneOf": one_of,
        "discriminator": {
            "propertyName": DISCRIMINATOR_FIELD,
            "mapping": mapping,
        },
    })
}

/// Full OpenAPI 3.1 document for the asset API.
pub fn openapi_document(registry: &VariantRegistry, title: &str, version: &str) -> Value {
    let mut schemas = Map::new();
    for spec in registry.specs() {
        schemas.insert(request_schema_name(spec.kind), variant_schema(spec));
        schemas.insert(
            response_schema_name(spec.kind),
            variant_response_schema(spec),
        );
    }
    schemas.insert(
        "AssetCreated".to_string(),
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "string", "format": "uuid" },
                "message": { "type": "string", "description": "Operation response" },
            },
            "required": ["id", "message"],
        }),
    );
    schemas.insert(
        "ErrorModel".to_string(),
        json!({
            "type": "object",
            "properties": {
                "status": { "type": "integer" },
                "title": { "type": "string" },
                "detail": { "type": "string" },
                "errors": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "location": { "type": "string" },
                            "message": { "type": "string" },
                        },
                    },
                },
            },
            "required": ["status", "title", "detail"],
        }),
    );

    let error = |description: &str| {
        json!({
            "description": description,
            "content": {
                "application/problem+json": {
                    "schema": { "$ref": "#/components/schemas/ErrorModel" }
                }
            },
        })
    };

    json!({
        "openapi": "3.1.0",
        "info": { "title": title, "version": version },
        "paths": {
            "/asset": {
                "post": {
                    "operationId": "create-asset",
                    "description": "Create an entry",
                    "requestBody": {
                        "description": "Expected body",
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": union(registry, request_schema_name)
                            }
                        },
                    },
                    "responses": {
                        "200": {
                            "description": "Asset stored",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/AssetCreated" }
                                }
                            },
                        },
                        "400": error("Invalid Request"),
                        "422": error("Validation failed"),
                        "500": error("Storage failure"),
                    },
                }
            },
            "/asset/{id}": {
                "get": {
                    "operationId": "get-asset",
                    "description": "Retrieve an entry",
                    "parameters": [{
                        "name": "id",
                        "in": "path",
                        "required": true,
                        "description": "Asset id to retrieve",
                        "schema": { "type": "string" },
                    }],
                    "responses": {
                        "200": {
                            "description": "Stored asset",
                            "content": {
                                "application/json": {
                                    "schema": union(registry, response_schema_name)
                                }
                            },
                        },
                        "404": error("Asset not found"),
                        "500": error("Stored record unreadable"),
                    },
                }
            },
        },
        "components": { "schemas": schemas },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_published() {
        let registry = VariantRegistry::builtin().unwrap();
        let doc = openapi_document(&registry, "Data Manager API", "1.0.0");

        let schemas = doc["components"]["schemas"].as_object().unwrap();
        for kind in registry.kinds() {
            let spec = registry.lookup(kind).unwrap();
            assert!(schemas.contains_key(&request_schema_name(spec.kind)));
            assert!(schemas.contains_key(&response_schema_name(spec.kind)));
        }

        let request = &doc["paths"]["/asset"]["post"]["requestBody"]["content"]
            ["application/json"]["schema"];
        assert_eq!(request["oneOf"].as_array().unwrap().len(), registry.len());
        assert_eq!(request["discriminator"]["propertyName"], "type");
        assert_eq!(
            request["discriminator"]["mapping"]["type2"],
            "#/components/schemas/PaymentAsset"
        );
    }

    #[test]
    fn test_variant_schema_fields() {
        let registry = VariantRegistry::builtin().unwrap();
        let spec = registry.lookup("type1").unwrap();

        let schema = variant_schema(spec);
        assert_eq!(schema["properties"]["type"]["enum"][0], "type1");
        assert_eq!(schema["properties"]["name"]["type"], "string");
        assert!(schema["properties"].get("id").is_none());
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&Value::from("name")));
        assert!(!required.contains(&Value::from("description")));

        let response = variant_response_schema(spec);
        assert_eq!(response["properties"]["id"]["format"], "uuid");
        assert!(response["required"]
            .as_array()
            .unwrap()
            .contains(&Value::from("id")));
    }

    #[test]
    fn test_document_info() {
        let registry = VariantRegistry::builtin().unwrap();
        let doc = openapi_document(&registry, "Data Manager API", "1.0.0");
        assert_eq!(doc["openapi"], "3.1.0");
        assert_eq!(doc["info"]["title"], "Data Manager API");
        assert_eq!(doc["info"]["version"], "1.0.0");
    }
}
