#![deny(missing_docs)]

//! # Descriptor Builder
//!
//! Walks the raw document and produces the normalized descriptor graph.
//!
//! Construction is two-phase: every named schema is first reserved as a
//! placeholder in the registry (so a schema body can reference itself or a
//! sibling that has not been visited yet), then the bodies are filled in a
//! second pass. Named parameters and request bodies are built eagerly before
//! the path walk. The finished graph is handed to the cycle detector before
//! it is returned.

use crate::error::{AppError, AppResult};
use crate::oas::cycles::find_and_fix_loops;
use crate::oas::descriptor::{
    ApiDescriptor, Components, Operation, ParamLocation, Parameter, PathItem, RequestBody,
    Response, Schema, SchemaKind, SchemaOrType, TypeRef, Verb,
};
use crate::oas::document::{
    RawAdditionalProperties, RawDocument, RawMediaType, RawOperation, RawParameter, RawPathItem,
    RawResponse, RawSchema,
};
use crate::oas::refs::{ref_target_name, RefOr};
use heck::ToUpperCamelCase;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Name of the synthesized sentinel type shared by contentless responses.
pub const EMPTY_SCHEMA_KEY: &str = "__Empty";

/// Options controlling descriptor construction.
#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilderOptions {
    /// When set, a property absent from `required` is marked nullable in
    /// addition to optional (models absent-or-null semantics for consumers
    /// that do not distinguish the two).
    pub non_required_property_is_null: bool,
    /// Explicit base-path override. Wins over server metadata.
    pub base_path: Option<String>,
}

/// Builds the descriptor graph for a raw document.
pub fn build_api_descriptor(
    document: &RawDocument,
    options: DescriptorBuilderOptions,
) -> AppResult<ApiDescriptor> {
    DescriptorBuilder::new(document, options)?.build()
}

struct DescriptorBuilder<'a> {
    document: &'a RawDocument,
    options: DescriptorBuilderOptions,
    schemas: IndexMap<String, Schema>,
    parameters: IndexMap<String, Parameter>,
    request_bodies: IndexMap<String, RequestBody>,
}

impl<'a> DescriptorBuilder<'a> {
    fn new(document: &'a RawDocument, options: DescriptorBuilderOptions) -> AppResult<Self> {
        let mut builder = Self {
            document,
            options,
            schemas: IndexMap::new(),
            parameters: IndexMap::new(),
            request_bodies: IndexMap::new(),
        };
        builder.register_schema_placeholders();
        builder.build_top_parameters()?;
        builder.build_top_request_bodies()?;
        Ok(builder)
    }

    fn build(mut self) -> AppResult<ApiDescriptor> {
        let base_path = self.base_path();
        self.fill_schema_components()?;
        let paths = self.paths()?;

        let mut descriptor = ApiDescriptor {
            base_path,
            components: Components {
                schemas: self.schemas,
            },
            paths,
        };

        find_and_fix_loops(&mut descriptor.components.schemas);

        Ok(descriptor)
    }

    /// Phase one: reserve every named schema so that forward and self
    /// references resolve by name during phase two.
    fn register_schema_placeholders(&mut self) {
        let document = self.document;
        let raw_schemas = document.components.as_ref().and_then(|c| c.schemas.as_ref());
        if let Some(raw_schemas) = raw_schemas {
            for (type_name, _) in sorted_entries(raw_schemas) {
                self.schemas.insert(type_name.clone(), Schema::unknown());
            }
        }
    }

    /// Phase two: build each schema body in place over its placeholder.
    fn fill_schema_components(&mut self) -> AppResult<()> {
        let document = self.document;
        let raw_schemas = document.components.as_ref().and_then(|c| c.schemas.as_ref());
        if let Some(raw_schemas) = raw_schemas {
            for (type_name, entry) in sorted_entries(raw_schemas) {
                let raw = entry.as_item().ok_or_else(|| {
                    AppError::Unsupported("Invalid reference found at component level".into())
                })?;
                let schema = self.schema_value(raw)?;
                if let Some(slot) = self.schemas.get_mut(type_name) {
                    *slot = schema;
                }
            }
        }

        Ok(())
    }

    fn build_top_parameters(&mut self) -> AppResult<()> {
        let document = self.document;
        let raw_parameters = document
            .components
            .as_ref()
            .and_then(|c| c.parameters.as_ref());
        if let Some(raw_parameters) = raw_parameters {
            for (type_name, entry) in sorted_entries(raw_parameters) {
                let raw = entry.as_item().ok_or_else(|| {
                    AppError::Unsupported("Invalid reference found at parameters level".into())
                })?;
                let parameter = self.parameter_value(raw)?;
                self.parameters.insert(type_name.clone(), parameter);
            }
        }

        Ok(())
    }

    fn build_top_request_bodies(&mut self) -> AppResult<()> {
        let document = self.document;
        let raw_bodies = document
            .components
            .as_ref()
            .and_then(|c| c.request_bodies.as_ref());
        if let Some(raw_bodies) = raw_bodies {
            for (type_name, entry) in sorted_entries(raw_bodies) {
                let raw = entry.as_item().ok_or_else(|| {
                    AppError::Unsupported("Invalid reference found at request bodies level".into())
                })?;
                let schema = self.payload_schema(None, raw.content.as_ref())?;
                self.request_bodies
                    .insert(type_name.clone(), RequestBody { schema });
            }
        }

        Ok(())
    }

    fn paths(&mut self) -> AppResult<Vec<PathItem>> {
        let document = self.document;
        let mut paths = Vec::new();

        if let Some(raw_paths) = &document.paths {
            for (path_key, raw_item) in sorted_entries(raw_paths) {
                let mut path = PathItem {
                    path: path_key.clone(),
                    operations: Vec::new(),
                };

                for verb in Verb::ALL {
                    let item = raw_item.as_item().ok_or_else(|| {
                        AppError::Unsupported(
                            "Unimplemented behavior for paths as references".into(),
                        )
                    })?;

                    let Some(raw_op) = operation_of_path(item, verb) else {
                        continue;
                    };

                    let id = self.operation_id(raw_op, verb, path_key);

                    let request_body = match &raw_op.request_body {
                        Some(RefOr::Ref(r)) => Some(RequestBody {
                            schema: self.payload_schema(Some(&r.target), None)?,
                        }),
                        Some(RefOr::Item(body)) => Some(RequestBody {
                            schema: self.payload_schema(None, body.content.as_ref())?,
                        }),
                        None => None,
                    };

                    let responses = self.responses(raw_op.responses.as_ref())?;
                    let parameters = self.operation_parameters(raw_op.parameters.as_ref())?;

                    path.operations.push(Operation {
                        id,
                        path: path_key.clone(),
                        verb,
                        description: raw_op.summary.clone(),
                        has_params: request_body.is_some() || !parameters.is_empty(),
                        parameters,
                        request_body,
                        responses,
                    });
                }

                paths.push(path);
            }
        }

        Ok(paths)
    }

    /// Derives the unique operation id: `operationId` when present, else a
    /// synthesized `Verb_path` with `{` marking a `By` segment.
    fn operation_id(&self, raw_op: &RawOperation, verb: Verb, path_key: &str) -> String {
        match &raw_op.operation_id {
            Some(id) => id.to_upper_camel_case(),
            None => format!(
                "{}_{}",
                verb.as_str(),
                path_key.replace('{', "By_").replace(['/', '}'], "_")
            )
            .to_upper_camel_case(),
        }
    }

    fn responses(
        &mut self,
        raw: Option<&IndexMap<String, RefOr<RawResponse>>>,
    ) -> AppResult<Vec<Response>> {
        let mut responses = Vec::new();

        if let Some(raw) = raw {
            if raw.contains_key("default") {
                return Err(AppError::Unsupported(
                    "default response not yet supported".into(),
                ));
            }

            for (status, entry) in sorted_entries(raw) {
                let schema = match entry {
                    RefOr::Ref(r) => self.payload_schema(Some(&r.target), None)?,
                    RefOr::Item(response) => {
                        self.payload_schema(None, response.content.as_ref())?
                    }
                };

                let schema = if self.is_schema_empty(&schema) {
                    self.empty_type()
                } else {
                    schema
                };

                responses.push(Response {
                    status: status.clone(),
                    schema,
                });
            }
        }

        Ok(responses)
    }

    /// Shared resolution for request-body and response payloads.
    ///
    /// A reference is looked up in the request-body registry by its final
    /// name segment and degrades to UNKNOWN when absent (soft degradation,
    /// never a failure). An inline payload uses the first media type's
    /// schema; no media types at all yields EMPTY, replaced upstream.
    fn payload_schema(
        &self,
        reference: Option<&str>,
        content: Option<&IndexMap<String, RawMediaType>>,
    ) -> AppResult<SchemaOrType> {
        if let Some(target) = reference {
            let type_name = ref_target_name(target);
            if let Some(body) = self.request_bodies.get(type_name) {
                return Ok(body.schema.clone());
            }

            return Ok(SchemaOrType::Schema(Schema::unknown()));
        }

        if let Some(content) = content {
            if let Some((_, media)) = content.first() {
                if let Some(schema) = &media.schema {
                    return self.schema(schema);
                }
            }
        }

        Ok(SchemaOrType::Schema(Schema::new(SchemaKind::Empty)))
    }

    /// Returns the shared sentinel type for contentless responses, creating
    /// the `__Empty` registry entry on first use.
    fn empty_type(&mut self) -> SchemaOrType {
        if !self.schemas.contains_key(EMPTY_SCHEMA_KEY) {
            self.schemas.insert(
                EMPTY_SCHEMA_KEY.to_string(),
                Schema {
                    kind: SchemaKind::String {
                        max_length: Some(0),
                    },
                    is_optional: true,
                    is_nullable: false,
                },
            );
        }

        SchemaOrType::Type(TypeRef::new(EMPTY_SCHEMA_KEY))
    }

    fn operation_parameters(
        &self,
        raw: Option<&Vec<RefOr<RawParameter>>>,
    ) -> AppResult<Vec<Parameter>> {
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        let mut parameters = Vec::new();
        for entry in raw {
            match entry {
                RefOr::Ref(r) => {
                    let type_name = ref_target_name(&r.target);
                    let parameter = self.parameters.get(type_name).ok_or_else(|| {
                        AppError::Unsupported(format!(
                            "Unknown parameter reference: {}",
                            type_name
                        ))
                    })?;
                    parameters.push(parameter.clone());
                }
                RefOr::Item(raw_param) => parameters.push(self.parameter_value(raw_param)?),
            }
        }

        Ok(parameters)
    }

    fn parameter_value(&self, raw: &RawParameter) -> AppResult<Parameter> {
        let location = param_location(&raw.location)?;

        let mut schema = match &raw.schema {
            Some(schema) => self.schema(schema)?,
            None => SchemaOrType::Schema(Schema::unknown()),
        };

        // Path parameters and required parameters are forced non-optional.
        if raw.required.unwrap_or(false) || location == ParamLocation::Path {
            schema.set_optional(false);
        } else {
            schema.set_optional(true);
        }

        Ok(Parameter {
            location,
            name: raw.name.clone(),
            schema,
        })
    }

    fn schema(&self, node: &RefOr<RawSchema>) -> AppResult<SchemaOrType> {
        match node {
            RefOr::Ref(r) => Ok(SchemaOrType::Type(TypeRef::new(ref_target_name(
                &r.target,
            )))),
            RefOr::Item(raw) => Ok(SchemaOrType::Schema(self.schema_value(raw)?)),
        }
    }

    fn schema_value(&self, raw: &RawSchema) -> AppResult<Schema> {
        let mut schema = Schema::new(self.schema_kind(raw)?);
        if raw.nullable {
            schema.is_nullable = true;
        }

        Ok(schema)
    }

    /// Classification priority: allOf, oneOf, anyOf, enum, `type`, then a
    /// typeless-but-propertied object, then UNKNOWN.
    fn schema_kind(&self, raw: &RawSchema) -> AppResult<SchemaKind> {
        if let Some(members) = &raw.all_of {
            return Ok(SchemaKind::AllOf {
                members: self.schema_list(members)?,
            });
        }

        if let Some(members) = &raw.one_of {
            return Ok(SchemaKind::OneOf {
                members: self.schema_list(members)?,
            });
        }

        if let Some(members) = &raw.any_of {
            return Ok(SchemaKind::AnyOf {
                members: self.schema_list(members)?,
            });
        }

        if let Some(values) = &raw.enum_values {
            return Ok(SchemaKind::Enum {
                values: values.iter().map(enum_literal).collect(),
            });
        }

        if let Some(schema_type) = &raw.schema_type {
            return match schema_type.as_str() {
                "array" => Ok(SchemaKind::Array {
                    items: Box::new(match &raw.items {
                        Some(items) => self.schema(items)?,
                        None => SchemaOrType::Schema(Schema::unknown()),
                    }),
                }),
                "number" => Ok(SchemaKind::Number),
                "integer" => Ok(SchemaKind::Integer),
                "string" => Ok(SchemaKind::String {
                    max_length: raw.max_length,
                }),
                "boolean" => Ok(SchemaKind::Boolean),
                "null" => Ok(SchemaKind::Null),
                "object" => self.object_kind(raw),
                other => Err(AppError::Unsupported(format!(
                    "Unknown type found: {}",
                    other
                ))),
            };
        }

        if raw.properties.is_some() {
            // No `type`, but properties are present.
            return self.object_kind(raw);
        }

        Ok(SchemaKind::Unknown)
    }

    fn schema_list(&self, members: &[RefOr<RawSchema>]) -> AppResult<Vec<SchemaOrType>> {
        members.iter().map(|m| self.schema(m)).collect()
    }

    /// An object with neither properties nor additional properties has no
    /// shape and degrades to UNKNOWN, not to an empty structural type.
    fn object_kind(&self, raw: &RawSchema) -> AppResult<SchemaKind> {
        let has_properties = raw.properties.is_some();
        let has_additional = match &raw.additional_properties {
            Some(RawAdditionalProperties::Flag(flag)) => *flag,
            Some(RawAdditionalProperties::Schema(_)) => true,
            None => false,
        };

        if !has_properties && !has_additional {
            return Ok(SchemaKind::Unknown);
        }

        let additional_properties = match &raw.additional_properties {
            Some(RawAdditionalProperties::Flag(true)) => {
                Some(Box::new(SchemaOrType::Schema(Schema::unknown())))
            }
            Some(RawAdditionalProperties::Schema(inner)) => Some(Box::new(self.schema(inner)?)),
            Some(RawAdditionalProperties::Flag(false)) | None => None,
        };

        let properties = match &raw.properties {
            Some(raw_properties) => {
                let mut properties = IndexMap::new();
                for (key, value) in sorted_entries(raw_properties) {
                    let mut schema = self.schema(value)?;
                    let required = raw
                        .required
                        .as_ref()
                        .map(|r| r.iter().any(|name| name == key))
                        .unwrap_or(false);
                    if !required {
                        schema.set_optional(true);
                        if self.options.non_required_property_is_null {
                            schema.set_nullable(true);
                        }
                    }
                    properties.insert(key.clone(), schema);
                }
                Some(properties)
            }
            None => None,
        };

        Ok(SchemaKind::Object {
            properties,
            additional_properties,
        })
    }

    fn is_schema_empty(&self, node: &SchemaOrType) -> bool {
        node.resolve(&self.schemas)
            .map(|schema| schema.kind == SchemaKind::Empty)
            .unwrap_or(false)
    }

    /// Precedence: explicit override, then the first server's `basePath`
    /// variable default, then the empty string.
    fn base_path(&self) -> String {
        match &self.options.base_path {
            Some(base_path) if !base_path.is_empty() => return base_path.clone(),
            _ => {}
        }

        if let Some(servers) = &self.document.servers {
            if let Some(first) = servers.first() {
                if let Some(variables) = &first.variables {
                    if let Some(default) = variables
                        .get("basePath")
                        .and_then(|variable| variable.default.as_ref())
                    {
                        return default.clone();
                    }
                }
            }
        }

        String::new()
    }
}

fn operation_of_path(item: &RawPathItem, verb: Verb) -> Option<&RawOperation> {
    match verb {
        Verb::Get => item.get.as_ref(),
        Verb::Post => item.post.as_ref(),
        Verb::Put => item.put.as_ref(),
        Verb::Delete => item.delete.as_ref(),
    }
}

fn param_location(raw: &str) -> AppResult<ParamLocation> {
    match raw {
        "header" => Ok(ParamLocation::Header),
        "query" => Ok(ParamLocation::Query),
        "cookie" => Ok(ParamLocation::Cookie),
        "path" => Ok(ParamLocation::Path),
        other => Err(AppError::Unsupported(format!(
            "Unknown parameter location: {}",
            other
        ))),
    }
}

fn enum_literal(value: &JsonValue) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Entries of an order-preserving map, sorted lexicographically by key.
fn sorted_entries<V>(map: &IndexMap<String, V>) -> Vec<(&String, &V)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}
