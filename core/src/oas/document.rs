#![deny(missing_docs)]

//! # Raw Document Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to the OpenAPI 3 JSON document.
//!
//! Only the fields the descriptor builder consumes are typed; sections the
//! generator parses but does not use semantically (examples, headers,
//! security schemes, links, callbacks) are retained as raw JSON values.
//! Key order is preserved everywhere: "first media type wins" depends on it.

use crate::oas::refs::RefOr;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// The root OpenAPI 3 document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    /// OpenAPI version string. Parsed, never interpreted.
    pub openapi: Option<String>,
    /// Metadata about the API. Parsed, never interpreted.
    pub info: Option<JsonValue>,
    /// Server configuration; only the first server's `basePath` variable
    /// default participates in base-path resolution.
    pub servers: Option<Vec<RawServer>>,
    /// Path items keyed by path template, in document order.
    pub paths: Option<IndexMap<String, RefOr<RawPathItem>>>,
    /// Reusable components.
    pub components: Option<RawComponents>,
    /// Global security requirements. Parsed, never interpreted.
    pub security: Option<JsonValue>,
    /// Tag metadata. Parsed, never interpreted.
    pub tags: Option<JsonValue>,
    /// External documentation. Parsed, never interpreted.
    #[serde(rename = "externalDocs")]
    pub external_docs: Option<JsonValue>,
}

/// A server entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawServer {
    /// Server URL. Parsed, never interpreted.
    pub url: Option<String>,
    /// Server name. Parsed, never interpreted.
    pub name: Option<String>,
    /// Server description. Parsed, never interpreted.
    pub description: Option<String>,
    /// Variable substitutions; `basePath.default` feeds base-path resolution.
    pub variables: Option<IndexMap<String, RawServerVariable>>,
}

/// A server variable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawServerVariable {
    /// Allowed values. Parsed, never interpreted.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    /// Default substitution value.
    pub default: Option<String>,
    /// Variable description. Parsed, never interpreted.
    pub description: Option<String>,
}

/// Reusable components. Schemas, parameters and request bodies are
/// pre-registered into the top-level registries; the remaining sections are
/// parsed but carry no semantics here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComponents {
    /// Named schemas.
    pub schemas: Option<IndexMap<String, RefOr<RawSchema>>>,
    /// Named responses. Not pre-registered: a response reference that only
    /// exists here degrades to an unknown-typed schema downstream.
    pub responses: Option<IndexMap<String, RefOr<RawResponse>>>,
    /// Named parameters.
    pub parameters: Option<IndexMap<String, RefOr<RawParameter>>>,
    /// Named request bodies.
    #[serde(rename = "requestBodies")]
    pub request_bodies: Option<IndexMap<String, RefOr<RawRequestBody>>>,
    /// Named examples. Parsed, never interpreted.
    pub examples: Option<IndexMap<String, JsonValue>>,
    /// Named headers. Parsed, never interpreted.
    pub headers: Option<IndexMap<String, JsonValue>>,
    /// Named security schemes. Parsed, never interpreted.
    #[serde(rename = "securitySchemes")]
    pub security_schemes: Option<IndexMap<String, JsonValue>>,
    /// Named links. Parsed, never interpreted.
    pub links: Option<IndexMap<String, JsonValue>>,
    /// Named callbacks. Parsed, never interpreted.
    pub callbacks: Option<IndexMap<String, JsonValue>>,
}

/// A path item. Only the four supported verbs are typed; any other verb
/// present in the document is silently ignored by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPathItem {
    /// Path summary. Parsed, never interpreted.
    pub summary: Option<String>,
    /// Path description. Parsed, never interpreted.
    pub description: Option<String>,
    /// GET operation.
    pub get: Option<RawOperation>,
    /// PUT operation.
    pub put: Option<RawOperation>,
    /// POST operation.
    pub post: Option<RawOperation>,
    /// DELETE operation.
    pub delete: Option<RawOperation>,
    /// Path-level parameters. Parsed, never interpreted.
    pub parameters: Option<JsonValue>,
    /// Path-level servers. Parsed, never interpreted.
    pub servers: Option<JsonValue>,
}

/// A single operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOperation {
    /// Unique operation identifier; when absent an id is synthesized from
    /// the verb and path.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Short summary, re-emitted as comment lines above the action.
    pub summary: Option<String>,
    /// Long description. Parsed, never interpreted.
    pub description: Option<String>,
    /// Operation tags. Parsed, never interpreted.
    pub tags: Option<Vec<String>>,
    /// Operation parameters.
    pub parameters: Option<Vec<RefOr<RawParameter>>>,
    /// Request body.
    #[serde(rename = "requestBody")]
    pub request_body: Option<RefOr<RawRequestBody>>,
    /// Responses keyed by status code string, in document order.
    pub responses: Option<IndexMap<String, RefOr<RawResponse>>>,
    /// Deprecation marker. Parsed, never interpreted.
    pub deprecated: Option<bool>,
    /// Callback definitions. Parsed, never interpreted.
    pub callbacks: Option<JsonValue>,
    /// Security requirements. Parsed, never interpreted.
    pub security: Option<JsonValue>,
}

/// An operation or component parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct RawParameter {
    /// Parameter name in the source.
    pub name: String,
    /// Location: `query`, `header`, `path` or `cookie`.
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter must be present.
    pub required: Option<bool>,
    /// Parameter schema.
    pub schema: Option<RefOr<RawSchema>>,
    /// Parameter description. Parsed, never interpreted.
    pub description: Option<String>,
}

/// A request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRequestBody {
    /// Body description. Parsed, never interpreted.
    pub description: Option<String>,
    /// Media types keyed by content type, in document order.
    pub content: Option<IndexMap<String, RawMediaType>>,
    /// Whether the body must be present. Parsed, never interpreted.
    pub required: Option<bool>,
}

/// A response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponse {
    /// Response description. Parsed, never interpreted.
    pub description: Option<String>,
    /// Media types keyed by content type, in document order.
    pub content: Option<IndexMap<String, RawMediaType>>,
    /// Response headers. Parsed, never interpreted.
    pub headers: Option<JsonValue>,
    /// Response links. Parsed, never interpreted.
    pub links: Option<JsonValue>,
}

/// A media type entry. Only the schema is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMediaType {
    /// The payload schema.
    pub schema: Option<RefOr<RawSchema>>,
}

/// The `additionalProperties` keyword: a boolean or a schema.
///
/// `true` stands for "any shape" and maps to an UNKNOWN-typed additional
/// schema; `false` counts as absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAdditionalProperties {
    /// The boolean form.
    Flag(bool),
    /// The schema form.
    Schema(Box<RefOr<RawSchema>>),
}

/// A schema object. All fields are optional: classification happens in the
/// descriptor builder, and an object carrying none of these keys builds to
/// an unknown-typed node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSchema {
    /// The primitive/structural `type` keyword.
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    /// Conjunction members.
    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<RefOr<RawSchema>>>,
    /// Exclusive-union members.
    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<RefOr<RawSchema>>>,
    /// Inclusive-union members.
    #[serde(rename = "anyOf")]
    pub any_of: Option<Vec<RefOr<RawSchema>>>,
    /// Enum literals. Non-string scalars are coerced to their JSON text.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<JsonValue>>,
    /// Object properties, in document order.
    pub properties: Option<IndexMap<String, RefOr<RawSchema>>>,
    /// Dictionary value schema, or a boolean.
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<RawAdditionalProperties>,
    /// Names of required properties.
    pub required: Option<Vec<String>>,
    /// Array element schema.
    pub items: Option<Box<RefOr<RawSchema>>>,
    /// Nullability marker (OpenAPI 3.0 style).
    #[serde(default)]
    pub nullable: bool,
    /// Maximum string length, carried into the validator projection only.
    #[serde(rename = "maxLength")]
    pub max_length: Option<u64>,
    /// Schema description. Parsed, never interpreted.
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_key_order_is_preserved() {
        let body: RawRequestBody = serde_json::from_str(
            r#"{
                "content": {
                    "application/xml": {},
                    "application/json": {"schema": {"type": "string"}}
                }
            }"#,
        )
        .unwrap();

        let content = body.content.unwrap();
        let first = content.keys().next().unwrap();
        assert_eq!(first, "application/xml");
    }

    #[test]
    fn test_additional_properties_forms() {
        let flag: RawSchema =
            serde_json::from_str(r#"{"type": "object", "additionalProperties": true}"#).unwrap();
        assert!(matches!(
            flag.additional_properties,
            Some(RawAdditionalProperties::Flag(true))
        ));

        let schema: RawSchema = serde_json::from_str(
            r#"{"type": "object", "additionalProperties": {"type": "integer"}}"#,
        )
        .unwrap();
        assert!(matches!(
            schema.additional_properties,
            Some(RawAdditionalProperties::Schema(_))
        ));
    }

    #[test]
    fn test_unknown_verbs_are_ignored() {
        let item: RawPathItem = serde_json::from_str(
            r#"{"get": {"operationId": "list"}, "patch": {"operationId": "fix"}}"#,
        )
        .unwrap();
        assert!(item.get.is_some());
    }
}
